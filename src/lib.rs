//! Welcome to the studio core. This crate prices ceramic pieces and sums them
//! up into reports.
//!
//! Every piece recorded at the studio is charged three ways: a bisque firing
//! charge by weight, a glaze firing charge by volume, and a clay charge that
//! depends on whose clay was used. The [costs] module does that arithmetic,
//! the [transactions] validate and build pieces, and the [inventory] keeps a
//! user's pieces in step with whatever [storage] backs them. [report] filters
//! and totals pieces, and lays them out for export.
//!
//! The core doesn't talk to any database or bucket itself. Storage is reached
//! through the traits in [storage], so a hosted backend and the in-memory
//! stores look the same from here.
//!
//! [costs]: costs/index.html
//! [transactions]: transactions/index.html
//! [inventory]: inventory/index.html
//! [storage]: storage/index.html
//! [report]: report/index.html

pub mod error;
pub mod util;
pub mod models;
pub mod pricing;
pub mod costs;
pub mod config;
pub mod storage;
pub mod transactions;
pub mod inventory;
pub mod report;

pub use crate::{
    config::Config,
    error::{Error, Result},
    inventory::Inventory,
    models::{
        piece::{ClaySource, CostPolicy, Measurements, NewPiece, Piece, PieceID},
        user::{User, UserID},
    },
    pricing::Pricing,
    report::{Report, ReportFilter},
};
