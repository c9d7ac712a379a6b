//! A piece is one ceramic item, made by one person on one date. It carries the
//! measurements the studio charges against and the costs derived from them.
//!
//! Pieces are created from a submitted form (see the [piece transactions]) or
//! reconstructed from a stored [PieceRecord]. Once built they never change: to
//! correct a piece, delete it and record it again.
//!
//! [piece transactions]: ../../transactions/piece/index.html
//! [PieceRecord]: ../record/struct.PieceRecord.html

use chrono::{DateTime, TimeZone};
use crate::{
    costs::{self, PieceCosts},
    models::{
        record::PieceRecord,
        user::UserID,
    },
    pricing::Pricing,
    util,
};
use derive_builder::Builder;
use getset::{CopyGetters, Getters};
use serde::{Serialize, Deserialize};
use std::fmt::Display;

/// Physical measurements for a piece.
#[derive(Clone, Copy, Debug, Default, PartialEq, CopyGetters, Serialize, Deserialize)]
#[getset(get_copy = "pub")]
pub struct Measurements {
    weight_kg: f64,
    height_cm: f64,
    width_cm: f64,
    depth_cm: f64,
}

impl Measurements {
    /// Create a new measurement set.
    pub fn new(weight_kg: f64, height_cm: f64, width_cm: f64, depth_cm: f64) -> Self {
        Self {
            weight_kg,
            height_cm,
            width_cm,
            depth_cm,
        }
    }

    /// Bounding-box volume. No attempt is made to correct for the piece's
    /// actual shape.
    pub fn volume_cm3(&self) -> f64 {
        self.height_cm * self.width_cm * self.depth_cm
    }
}

/// Where the clay for a piece came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaySource {
    /// No clay cost is tracked for this piece
    #[serde(rename = "nenhuma")]
    None,
    /// Clay bought from the studio, at the studio's price
    #[serde(rename = "atelie")]
    Studio,
    /// The maker's own clay, at a price they give us
    #[serde(rename = "propria")]
    Own,
}

impl ClaySource {
    /// The value this source is stored as.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaySource::None => "nenhuma",
            ClaySource::Studio => "atelie",
            ClaySource::Own => "propria",
        }
    }

    /// Read a stored clay source value.
    pub fn from_stored(val: &str) -> Option<Self> {
        match val {
            "nenhuma" => Some(ClaySource::None),
            "atelie" => Some(ClaySource::Studio),
            "propria" => Some(ClaySource::Own),
            _ => None,
        }
    }
}

impl Default for ClaySource {
    fn default() -> Self {
        ClaySource::None
    }
}

/// Decides what happens to stored costs when a piece is reconstructed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CostPolicy {
    /// Keep the costs exactly as stored. Records priced under older rules keep
    /// their historical totals.
    Frozen,
    /// Throw the stored costs away and price the piece again.
    Recompute(Pricing),
}

impl Default for CostPolicy {
    fn default() -> Self {
        CostPolicy::Frozen
    }
}

/// The data needed to record a new piece, usually straight from a form.
#[derive(Clone, Debug, PartialEq, Getters, CopyGetters, Builder)]
#[builder(pattern = "owned", setter(into))]
pub struct NewPiece {
    /// Leave empty to have an ID generated.
    #[builder(setter(strip_option), default)]
    #[getset(get = "pub")]
    id: Option<PieceID>,
    #[builder(setter(strip_option), default)]
    #[getset(get = "pub")]
    user_id: Option<UserID>,
    /// DD/MM/YYYY, kept as text.
    #[getset(get = "pub")]
    production_date: String,
    #[getset(get = "pub")]
    person_name: String,
    #[getset(get = "pub")]
    piece_type: String,
    #[getset(get_copy = "pub")]
    measurements: Measurements,
    #[builder(default)]
    #[getset(get_copy = "pub")]
    clay: ClaySource,
    #[builder(default)]
    #[getset(get_copy = "pub")]
    own_clay_price_per_kg: f64,
}

impl NewPiece {
    pub fn builder() -> NewPieceBuilder {
        NewPieceBuilder::default()
    }

    /// Stamp the recording user onto the piece.
    pub(crate) fn with_user_id(mut self, user_id: UserID) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

studio_model! {
    /// The `Piece` model. All four cost fields are derived, either by the
    /// costing function or (for stored pieces) by reading them back.
    pub struct Piece {
        id: <<PieceID>>,
        /// Who recorded this piece. Photos live under this user's namespace.
        user_id: Option<UserID>,
        /// DD/MM/YYYY. Never parsed, compared as text.
        production_date: String,
        /// Who made the piece.
        person_name: String,
        /// Free-form category, "cup", "vase", etc.
        piece_type: String,
        measurements: Measurements,
        clay: ClaySource,
        /// Only ever non-zero when `clay` is `ClaySource::Own`.
        own_clay_price_per_kg: f64,
        /// The day this piece was first recorded, DD/MM/YYYY.
        registration_date: String,
        /// Stored photo reference, relative to the owner's namespace.
        photo_path: Option<String>,
        costs: PieceCosts,
    }
}

/// Own-clay pricing only applies to own clay.
fn effective_own_price(clay: ClaySource, own_clay_price_per_kg: f64) -> f64 {
    if clay == ClaySource::Own { own_clay_price_per_kg } else { 0.0 }
}

impl Piece {
    /// Build a brand new piece, generating its ID (if needed), stamping today's
    /// date as its registration date, and pricing it. "Today" is `now`'s
    /// calendar day in its own time zone, so pass local time.
    pub fn create<Tz: TimeZone>(new: NewPiece, pricing: &Pricing, now: &DateTime<Tz>) -> Self
        where Tz::Offset: Display
    {
        let NewPiece { id, user_id, production_date, person_name, piece_type, measurements, clay, own_clay_price_per_kg } = new;
        let own_clay_price_per_kg = effective_own_price(clay, own_clay_price_per_kg);
        let costs = costs::calculate_costs(&measurements, clay, own_clay_price_per_kg, pricing);
        Self {
            id: id.unwrap_or_else(PieceID::create),
            user_id,
            production_date,
            person_name,
            piece_type,
            measurements,
            clay,
            own_clay_price_per_kg,
            registration_date: util::time::format_date(now),
            photo_path: None,
            costs,
        }
    }

    /// Rebuild a piece from its stored record.
    ///
    /// With `CostPolicy::Frozen`, the stored clay/firing/glaze costs are taken
    /// as-is and the total is derived from them. If the stored total disagrees,
    /// the record is still loaded but we complain about it.
    pub fn from_record(record: PieceRecord, policy: CostPolicy) -> Self {
        let PieceRecord {
            id, user_id, production_date, person_name, piece_type,
            weight_kg, height_cm, width_cm, depth_cm,
            clay_source, own_clay_price_per_kg, registration_date, photo_path,
            clay_cost, firing_cost, glaze_cost, total_cost,
        } = record;
        let measurements = Measurements::new(weight_kg, height_cm, width_cm, depth_cm);
        let own_clay_price_per_kg = effective_own_price(clay_source, own_clay_price_per_kg);
        let costs = match policy {
            CostPolicy::Frozen => {
                let costs = PieceCosts::from_components(clay_cost, firing_cost, glaze_cost);
                if costs.total() != total_cost {
                    tracing::warn!(piece = id.as_str(), stored = total_cost, derived = costs.total(), "stored total disagrees with stored cost components");
                }
                costs
            }
            CostPolicy::Recompute(pricing) => {
                costs::calculate_costs(&measurements, clay_source, own_clay_price_per_kg, &pricing)
            }
        };
        Self {
            id,
            user_id,
            production_date,
            person_name,
            piece_type,
            measurements,
            clay: clay_source,
            own_clay_price_per_kg,
            registration_date,
            photo_path,
            costs,
        }
    }

    /// Convert this piece into its storage shape.
    pub fn to_record(&self) -> PieceRecord {
        PieceRecord {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            production_date: self.production_date.clone(),
            person_name: self.person_name.clone(),
            piece_type: self.piece_type.clone(),
            weight_kg: self.measurements.weight_kg(),
            height_cm: self.measurements.height_cm(),
            width_cm: self.measurements.width_cm(),
            depth_cm: self.measurements.depth_cm(),
            clay_source: self.clay,
            own_clay_price_per_kg: self.own_clay_price_per_kg,
            registration_date: self.registration_date.clone(),
            photo_path: self.photo_path.clone(),
            clay_cost: self.costs.clay(),
            firing_cost: self.costs.firing(),
            glaze_cost: self.costs.glaze(),
            total_cost: self.costs.total(),
        }
    }

    /// Attach a stored photo reference. Only used while a piece is being saved,
    /// before it has ever been persisted.
    pub(crate) fn with_photo_path<T: Into<String>>(mut self, photo_path: T) -> Self {
        self.photo_path = Some(photo_path.into());
        self
    }

    /// A human-readable one-liner, used when picking a piece from a list.
    pub fn label(&self) -> String {
        format!("{} - {} (by {})", self.production_date, self.piece_type, self.person_name)
    }

    pub fn total_cost(&self) -> f64 {
        self.costs.total()
    }
}
