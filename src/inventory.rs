//! The inventory is a logged-in user's working set of pieces.
//!
//! It sits between the transactions and the storage collaborators: it runs a
//! transaction, applies the resulting modifications through the
//! [PieceRepository] and [PhotoStore], and keeps a cached copy of the piece
//! list in step. The cache belongs to whoever owns the `Inventory` (one per
//! session) and is only ever replaced by a load or changed by a successful
//! save/remove. Call [Inventory::invalidate] to force the next read to go back
//! to storage.
//!
//! Saving and removing are not atomic across the two stores:
//!
//! - saving uploads the photo first. If the upload fails nothing is inserted.
//!   If the insert fails the photo is removed again (best effort).
//! - removing deletes the photo first, and carries on to delete the record
//!   even if that fails. If the record delete then fails, the photo is
//!   already gone.
//!
//! [PieceRepository]: ../storage/trait.PieceRepository.html
//! [PhotoStore]: ../storage/trait.PhotoStore.html
//! [Inventory::invalidate]: struct.Inventory.html#method.invalidate

use chrono::{DateTime, TimeZone};
use crate::{
    error::{Error, Result},
    models::{
        Op,
        Modifications,
        piece::{CostPolicy, NewPiece, Piece, PieceID},
        user::{User, UserID},
    },
    pricing::Pricing,
    report::{self, Report, ReportFilter},
    storage::{self, Photo, PhotoStore, PieceRepository},
    transactions,
};
use std::fmt::Display;
use url::Url;

/// A user's pieces, backed by a repository and a photo store.
pub struct Inventory<R, P> {
    owner: User,
    repo: R,
    photos: P,
    pricing: Pricing,
    policy: CostPolicy,
    /// `None` until loaded (or after being invalidated)
    pieces: Option<Vec<Piece>>,
}

impl<R: PieceRepository, P: PhotoStore> Inventory<R, P> {
    /// Create an inventory for `owner`. Nothing is loaded until it's needed.
    pub fn new(owner: User, repo: R, photos: P, pricing: Pricing) -> Self {
        Self {
            owner,
            repo,
            photos,
            pricing,
            policy: CostPolicy::default(),
            pieces: None,
        }
    }

    /// Choose how stored costs are treated on load (the default is to keep them
    /// as stored).
    pub fn with_cost_policy(mut self, policy: CostPolicy) -> Self {
        self.policy = policy;
        self.pieces = None;
        self
    }

    pub fn owner(&self) -> &User {
        &self.owner
    }

    pub fn pricing(&self) -> &Pricing {
        &self.pricing
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn photos(&self) -> &P {
        &self.photos
    }

    pub fn is_loaded(&self) -> bool {
        self.pieces.is_some()
    }

    /// Drop the cached piece list. The next read loads from storage.
    pub fn invalidate(&mut self) {
        self.pieces = None;
    }

    /// Load every piece from storage, replacing the cache.
    ///
    /// If the load fails the cache is left empty (unloaded), never partially
    /// filled.
    pub fn reload(&mut self) -> Result<&[Piece]> {
        self.pieces = None;
        let records = self.repo.load_all()
            .map_err(|e| {
                tracing::error!(error = %e, "failed to load pieces");
                e
            })?;
        let policy = self.policy;
        let pieces: Vec<Piece> = records.into_iter()
            .map(|rec| Piece::from_record(rec, policy))
            .collect();
        tracing::debug!(count = pieces.len(), "loaded pieces");
        Ok(self.pieces.get_or_insert(pieces).as_slice())
    }

    /// The cached pieces, most recent first, loading them if needed.
    pub fn pieces(&mut self) -> Result<&[Piece]> {
        if self.pieces.is_none() {
            return self.reload();
        }
        Ok(self.pieces.as_deref().unwrap_or(&[]))
    }

    /// Find a piece by ID.
    pub fn get(&mut self, id: &PieceID) -> Result<Option<&Piece>> {
        Ok(self.pieces()?.iter().find(|p| p.id() == id))
    }

    /// Record a new piece (with an optional photo) and return it.
    pub fn add<Tz: TimeZone>(&mut self, new: NewPiece, photo: Option<Photo>, now: &DateTime<Tz>) -> Result<Piece>
        where Tz::Offset: Display
    {
        let mods = transactions::piece::create(&self.owner, new, &self.pricing, now)?;
        let piece = single(mods)?.expect_op::<Piece>(Op::Create)?;
        self.save(piece, photo)
    }

    /// Remove a piece (and its photo) by ID, returning what was removed.
    pub fn remove(&mut self, id: &PieceID) -> Result<Piece> {
        let piece = self.get(id)?
            .cloned()
            .ok_or_else(|| Error::PieceNotFound(id.to_string()))?;
        let mods = transactions::piece::delete(&self.owner, piece)?;
        let piece = single(mods)?.expect_op::<Piece>(Op::Delete)?;
        self.destroy(piece)
    }

    /// The public URL of a piece's photo, if it has one.
    pub fn photo_url(&self, piece: &Piece) -> Option<Url> {
        let reference = piece.photo_path().as_ref()?;
        self.photos.public_url(self.namespace_of(piece), reference)
    }

    /// Everyone who has a piece in the inventory, for filtering.
    pub fn people(&mut self) -> Result<Vec<String>> {
        Ok(report::people(self.pieces()?))
    }

    /// Build a report over the inventory.
    pub fn report(&mut self, filter: &ReportFilter) -> Result<Report> {
        Ok(report::build_report(self.pieces()?, filter))
    }

    /// Photos live under the piece's recorded owner, falling back to ours for
    /// pieces that predate owner tracking.
    fn namespace_of<'a>(&'a self, piece: &'a Piece) -> &'a UserID {
        piece.user_id().as_ref().unwrap_or_else(|| self.owner.id())
    }

    fn save(&mut self, piece: Piece, photo: Option<Photo>) -> Result<Piece> {
        let namespace = self.namespace_of(&piece).clone();
        let piece = match photo {
            Some(photo) => {
                let uploaded = self.photos.put(&namespace, piece.id(), photo.extension(), photo.bytes(), photo.content_type());
                match uploaded {
                    Ok(reference) => piece.with_photo_path(reference),
                    Err(e) => {
                        tracing::error!(piece = piece.id().as_str(), error = %e, "photo upload failed");
                        // the upload may have landed partially
                        let reference = storage::photo_reference(piece.id(), photo.extension());
                        if let Err(e2) = self.photos.remove(&namespace, &reference) {
                            tracing::warn!(piece = piece.id().as_str(), error = %e2, "could not clean up failed upload");
                        }
                        return Err(photo_error(e));
                    }
                }
            }
            None => piece,
        };

        if let Err(e) = self.repo.insert(&piece.to_record()) {
            tracing::error!(piece = piece.id().as_str(), error = %e, "failed to save piece");
            if let Some(reference) = piece.photo_path() {
                if let Err(e2) = self.photos.remove(&namespace, reference) {
                    tracing::warn!(piece = piece.id().as_str(), error = %e2, "could not remove photo of unsaved piece");
                }
            }
            return Err(persistence_error(e));
        }

        tracing::info!(piece = piece.id().as_str(), person = piece.person_name().as_str(), "piece saved");
        if let Some(pieces) = self.pieces.as_mut() {
            pieces.insert(0, piece.clone());
        }
        Ok(piece)
    }

    fn destroy(&mut self, piece: Piece) -> Result<Piece> {
        if let Some(reference) = piece.photo_path() {
            let namespace = self.namespace_of(&piece).clone();
            if let Err(e) = self.photos.remove(&namespace, reference) {
                tracing::warn!(piece = piece.id().as_str(), error = %e, "failed to remove photo, deleting piece anyway");
            }
        }
        if let Err(e) = self.repo.delete(piece.id()) {
            tracing::error!(piece = piece.id().as_str(), error = %e, "failed to delete piece");
            return Err(persistence_error(e));
        }
        tracing::info!(piece = piece.id().as_str(), "piece deleted");
        if let Some(pieces) = self.pieces.as_mut() {
            pieces.retain(|p| p.id() != piece.id());
        }
        Ok(piece)
    }
}

/// Transactions on a single piece give back exactly one modification.
fn single(mods: Modifications) -> Result<crate::models::Modification> {
    mods.into_vec().into_iter().next().ok_or(Error::OpMismatch)
}

fn photo_error(err: Error) -> Error {
    match err {
        Error::PhotoStore(msg) => Error::PhotoStore(msg),
        other => Error::PhotoStore(other.to_string()),
    }
}

fn persistence_error(err: Error) -> Error {
    match err {
        Error::Persistence(msg) => Error::Persistence(msg),
        other => Error::Persistence(other.to_string()),
    }
}
