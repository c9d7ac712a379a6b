//! Transactions are the primary interface for recording and removing pieces.
//! They take the needed information (which must be passed in), check it, and
//! return a list of modifications that the caller is responsible for applying
//! to whatever storage medium they are using.
//!
//! Storage happens somewhere else and we don't touch it here. The
//! [Inventory] is one such caller: it applies modifications through the
//! storage collaborators and keeps its cached piece list in step.
//!
//! [Inventory]: ../inventory/struct.Inventory.html

pub mod piece;
