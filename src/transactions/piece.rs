//! Recording and removing pieces.
//!
//! There is no update: a piece that was recorded wrong gets deleted and
//! recorded again.

use chrono::{DateTime, TimeZone};
use crate::{
    error::{Error, Result},
    models::{
        Op,
        Modifications,
        piece::{ClaySource, Measurements, NewPiece, Piece},
        user::User,
    },
    pricing::Pricing,
    util::number::parse_number,
};
use std::fmt::Display;

/// The new-piece form, exactly as typed. Every number is still text here;
/// [PieceForm::parse] is the boundary where it gets read.
///
/// [PieceForm::parse]: struct.PieceForm.html#method.parse
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PieceForm {
    pub person_name: String,
    pub piece_type: String,
    pub production_date: String,
    pub weight_kg: String,
    pub height_cm: String,
    pub width_cm: String,
    pub depth_cm: String,
    pub clay: ClaySource,
    /// Only read when `clay` is `ClaySource::Own`.
    pub own_clay_price_per_kg: String,
}

impl PieceForm {
    /// Read the form's numbers and turn it into a `NewPiece`. Text fields are
    /// trimmed; blank ones are left for [create] to reject.
    ///
    /// [create]: fn.create.html
    pub fn parse(&self) -> Result<NewPiece> {
        let measurements = Measurements::new(
            parse_number("weight", &self.weight_kg)?,
            parse_number("height", &self.height_cm)?,
            parse_number("width", &self.width_cm)?,
            parse_number("depth", &self.depth_cm)?,
        );
        let own_clay_price_per_kg = match self.clay {
            ClaySource::Own => parse_number("own clay price", &self.own_clay_price_per_kg)?,
            _ => 0.0,
        };
        NewPiece::builder()
            .person_name(self.person_name.trim())
            .piece_type(self.piece_type.trim())
            .production_date(self.production_date.trim())
            .measurements(measurements)
            .clay(self.clay)
            .own_clay_price_per_kg(own_clay_price_per_kg)
            .build()
            .map_err(|e| Error::BuilderFailed(e))
    }
}

fn require_text(field: &str, val: &str) -> Result<()> {
    if val.trim().is_empty() {
        Err(Error::Validation(format!("{} is required", field)))?;
    }
    Ok(())
}

fn validate(new: &NewPiece) -> Result<()> {
    require_text("person name", new.person_name())?;
    require_text("piece type", new.piece_type())?;
    require_text("production date", new.production_date())?;
    let measurements = new.measurements();
    let mut all = vec![
        ("weight", measurements.weight_kg()),
        ("height", measurements.height_cm()),
        ("width", measurements.width_cm()),
        ("depth", measurements.depth_cm()),
    ];
    // the own price is zeroed for any other clay, so only check it when it's used
    if new.clay() == ClaySource::Own {
        all.push(("own clay price", new.own_clay_price_per_kg()));
    }
    for (field, val) in all.iter() {
        if !val.is_finite() || *val < 0.0 {
            Err(Error::Validation(format!("{} must be zero or more", field)))?;
        }
    }
    if measurements.weight_kg() == 0.0 {
        Err(Error::Validation("weight cannot be zero".into()))?;
    }
    Ok(())
}

/// Record a new piece on behalf of `caller`, pricing it with `pricing`.
/// The piece's registration date is `now`'s calendar day in its own time zone.
pub fn create<Tz: TimeZone>(caller: &User, new: NewPiece, pricing: &Pricing, now: &DateTime<Tz>) -> Result<Modifications>
    where Tz::Offset: Display
{
    validate(&new)?;
    let model = Piece::create(new.with_user_id(caller.id().clone()), pricing, now);
    Ok(Modifications::new_single(Op::Create, model))
}

/// Delete a piece. Only the user who recorded a piece may delete it; pieces
/// with no recorded owner may be deleted by anyone.
pub fn delete(caller: &User, subject: Piece) -> Result<Modifications> {
    if let Some(owner) = subject.user_id() {
        if owner != caller.id() {
            Err(Error::InsufficientPrivileges)?;
        }
    }
    Ok(Modifications::new_single(Op::Delete, subject))
}
