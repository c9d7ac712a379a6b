//! The storage collaborators the studio core talks to.
//!
//! The core never stores anything itself. A `PieceRepository` keeps the piece
//! table, a `PhotoStore` keeps the photos, and whatever backs them (a hosted
//! database, a bucket, an in-memory map) is the caller's business. Every call
//! is all-or-nothing from our point of view: it either did the whole thing or
//! it failed.
//!
//! The [memory] module has implementations that keep everything in process,
//! for tests and local use.
//!
//! [memory]: memory/index.html

pub mod memory;

use crate::{
    error::Result,
    models::{
        piece::PieceID,
        record::PieceRecord,
        user::UserID,
    },
};
use getset::Getters;
use url::Url;

/// The piece table.
pub trait PieceRepository {
    /// Load every stored piece, most recently created first.
    fn load_all(&self) -> Result<Vec<PieceRecord>>;

    /// Store a new piece.
    fn insert(&mut self, record: &PieceRecord) -> Result<()>;

    /// Delete a piece by ID. Deleting a piece that isn't there is not an
    /// error.
    fn delete(&mut self, id: &PieceID) -> Result<()>;
}

/// Photo storage, namespaced per owning user.
pub trait PhotoStore {
    /// Store a photo for a piece, returning the reference to save on the piece
    /// (relative to `namespace`). Storing over an existing photo replaces it.
    fn put(&mut self, namespace: &UserID, piece_id: &PieceID, extension: &str, bytes: &[u8], content_type: &str) -> Result<String>;

    /// Remove a stored photo. Removing a photo that isn't there is not an
    /// error.
    fn remove(&mut self, namespace: &UserID, reference: &str) -> Result<()>;

    /// Where the photo can be viewed, if anywhere.
    fn public_url(&self, namespace: &UserID, reference: &str) -> Option<Url>;
}

/// The full object path of a photo: `<namespace>/<reference>`.
pub fn object_path(namespace: &UserID, reference: &str) -> String {
    format!("{}/{}", namespace.as_str(), reference)
}

/// The reference a piece's photo is stored under: `<piece id><extension>`.
pub fn photo_reference(piece_id: &PieceID, extension: &str) -> String {
    format!("{}{}", piece_id.as_str(), extension)
}

/// A photo someone attached to a new piece.
#[derive(Clone, Debug, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct Photo {
    /// The name of the uploaded file, used only for its extension
    file_name: String,
    bytes: Vec<u8>,
    /// ie `image/jpeg`
    content_type: String,
}

impl Photo {
    pub fn new<T: Into<String>, C: Into<String>>(file_name: T, bytes: Vec<u8>, content_type: C) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
            content_type: content_type.into(),
        }
    }

    /// The file extension, dot included (`.jpg`), or empty if there is none.
    /// A leading dot (`.hidden`) doesn't count as an extension.
    pub fn extension(&self) -> &str {
        let name = match self.file_name.rfind(|c| c == '/' || c == '\\') {
            Some(idx) => &self.file_name[idx + 1..],
            None => self.file_name.as_str(),
        };
        match name.rfind('.') {
            Some(idx) if idx > 0 => &name[idx..],
            _ => "",
        }
    }
}
