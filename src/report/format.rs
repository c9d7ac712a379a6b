//! Currency formatting for reports. This is the only place values get rounded,
//! and only for display.

use getset::{CopyGetters, Getters};
use serde::{Serialize, Deserialize};

/// How money is written out.
#[derive(Clone, Debug, PartialEq, Getters, CopyGetters, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    /// Goes in front of the amount, separated by a space
    #[getset(get = "pub")]
    symbol: String,
    /// What to write in place of the decimal point
    #[getset(get_copy = "pub")]
    decimal_separator: char,
}

impl CurrencyFormat {
    pub fn new<T: Into<String>>(symbol: T, decimal_separator: char) -> Self {
        Self {
            symbol: symbol.into(),
            decimal_separator,
        }
    }

    /// Format an amount to two decimal places, ie `R$ 46,50`.
    pub fn format(&self, amount: f64) -> String {
        let fixed = format!("{:.2}", amount);
        let fixed = if self.decimal_separator == '.' {
            fixed
        } else {
            fixed.replace('.', &self.decimal_separator.to_string())
        };
        if self.symbol.is_empty() {
            fixed
        } else {
            format!("{} {}", self.symbol, fixed)
        }
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::new("R$", ',')
    }
}
