//! The main error enum for the studio core lives here, and documents the
//! various conditions that can arise while creating, storing, and reporting on
//! pieces.

use thiserror::Error;

/// This is our error enum. It contains an entry for any part of the system in
/// which an expectation is not met or a problem occurs.
#[derive(Error, Debug, PartialEq)]
pub enum Error {
    /// A model builder failed to build (usually a missing field)
    #[error("error building object {0}")]
    BuilderFailed(String),
    /// Configuration could not be read or parsed
    #[error("configuration error: {0}")]
    Config(String),
    /// You don't have permission to perform this action
    #[error("insufficient privileges")]
    InsufficientPrivileges,
    /// A stored field had the wrong type or an unparseable value
    #[error("invalid field {0}: {1}")]
    InvalidField(String, String),
    /// A piece of numeric input could not be read as a number
    #[error("{0} must be a number (got {1:?})")]
    InvalidNumber(String, String),
    /// A required field was absent from a stored record
    #[error("missing required field {0}")]
    MissingField(String),
    /// When we try to pull a model out of a modification and expect the wrong
    /// operation
    #[error("operation mismatch")]
    OpMismatch,
    /// The load/insert/delete call against the piece repository failed
    #[error("persistence error: {0}")]
    Persistence(String),
    /// A photo upload or removal failed
    #[error("photo store error: {0}")]
    PhotoStore(String),
    /// We tried to operate on a piece that isn't in the inventory
    #[error("piece not found: {0}")]
    PieceNotFound(String),
    /// Generating a report document failed
    #[error("report rendering failed: {0}")]
    Render(String),
    /// Input given to a transaction was incomplete or out of range
    #[error("validation error: {0}")]
    Validation(String),
    /// When we try to convert a model into a specific type but the model is not
    /// of that type
    #[error("wrong model type")]
    WrongModelType,
}

/// Wraps `std::result::Result` around our `Error` enum
pub type Result<T> = std::result::Result<T, Error>;
