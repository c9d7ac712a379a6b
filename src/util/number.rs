//! Utilities for reading numbers the way people type them into the studio's
//! forms.

use crate::error::{Error, Result};

/// Parse a measurement or price typed by a person.
///
/// Accepts either `.` or `,` as the decimal separator ("2,5" and "2.5" are
/// the same). Empty text, text that isn't a number, and non-finite values are
/// rejected so they never reach the costing function.
pub fn parse_number(field: &str, text: &str) -> Result<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(Error::InvalidNumber(field.into(), text.into()))?;
    }
    let normalized = if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };
    let val = normalized.parse::<f64>()
        .map_err(|_| Error::InvalidNumber(field.into(), text.into()))?;
    if !val.is_finite() {
        Err(Error::InvalidNumber(field.into(), text.into()))?;
    }
    Ok(val)
}
