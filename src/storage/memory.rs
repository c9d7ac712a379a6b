//! In-process storage. Nothing survives the process, which makes these handy
//! for tests and for running the studio tools without a backend.

use crate::{
    error::{Error, Result},
    models::{
        piece::PieceID,
        record::PieceRecord,
        user::UserID,
    },
    storage::{self, PhotoStore, PieceRepository},
};
use std::collections::HashMap;
use url::Url;

/// A piece table held in a `Vec`, most recent first.
#[derive(Clone, Debug, Default)]
pub struct MemoryRepository {
    records: Vec<PieceRecord>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: &PieceID) -> bool {
        self.records.iter().any(|rec| &rec.id == id)
    }
}

impl PieceRepository for MemoryRepository {
    fn load_all(&self) -> Result<Vec<PieceRecord>> {
        Ok(self.records.clone())
    }

    fn insert(&mut self, record: &PieceRecord) -> Result<()> {
        if self.contains(&record.id) {
            Err(Error::Persistence(format!("duplicate piece id {}", record.id)))?;
        }
        self.records.insert(0, record.clone());
        Ok(())
    }

    fn delete(&mut self, id: &PieceID) -> Result<()> {
        self.records.retain(|rec| &rec.id != id);
        Ok(())
    }
}

/// A stored photo.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredPhoto {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Photos held in a map keyed by object path.
#[derive(Clone, Debug)]
pub struct MemoryPhotoStore {
    base_url: Url,
    photos: HashMap<String, StoredPhoto>,
}

impl MemoryPhotoStore {
    /// Create a photo store whose public URLs hang off of `base_url`.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            photos: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// Grab a photo by its full object path.
    pub fn get(&self, path: &str) -> Option<&StoredPhoto> {
        self.photos.get(path)
    }
}

impl PhotoStore for MemoryPhotoStore {
    fn put(&mut self, namespace: &UserID, piece_id: &PieceID, extension: &str, bytes: &[u8], content_type: &str) -> Result<String> {
        let reference = storage::photo_reference(piece_id, extension);
        let photo = StoredPhoto {
            bytes: bytes.to_vec(),
            content_type: content_type.into(),
        };
        self.photos.insert(storage::object_path(namespace, &reference), photo);
        Ok(reference)
    }

    fn remove(&mut self, namespace: &UserID, reference: &str) -> Result<()> {
        self.photos.remove(&storage::object_path(namespace, reference));
        Ok(())
    }

    fn public_url(&self, namespace: &UserID, reference: &str) -> Option<Url> {
        let path = storage::object_path(namespace, reference);
        if !self.photos.contains_key(&path) {
            return None;
        }
        self.base_url.join(&path).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::piece::CostPolicy,
        util::test::*,
    };

    #[test]
    fn repository_keeps_newest_first() {
        let mut repo = MemoryRepository::new();
        let piece1 = make_piece("Ana", "01/01/2024");
        let piece2 = make_piece("Bea", "02/01/2024");
        repo.insert(&piece1.to_record()).unwrap();
        repo.insert(&piece2.to_record()).unwrap();
        let records = repo.load_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0].id, piece2.id());
        assert_eq!(&records[1].id, piece1.id());

        let res = repo.insert(&piece1.to_record());
        assert!(matches!(res, Err(Error::Persistence(_))));
        assert_eq!(repo.len(), 2);

        repo.delete(piece2.id()).unwrap();
        repo.delete(piece2.id()).unwrap();
        assert_eq!(repo.len(), 1);
        assert!(repo.contains(piece1.id()));
        assert_eq!(crate::models::piece::Piece::from_record(repo.load_all().unwrap()[0].clone(), CostPolicy::Frozen), piece1);
    }

    #[test]
    fn photo_store_namespaces() {
        let mut photos = MemoryPhotoStore::new(Url::parse("https://photos.example.com/public/fotos-pecas/").unwrap());
        let user = UserID::new("u-1");
        let piece_id = PieceID::new("p-1");
        let reference = photos.put(&user, &piece_id, ".png", &[1, 2, 3], "image/png").unwrap();
        assert_eq!(reference, "p-1.png");
        assert_eq!(photos.get("u-1/p-1.png").unwrap().content_type, "image/png");

        let url = photos.public_url(&user, &reference).unwrap();
        assert_eq!(url.as_str(), "https://photos.example.com/public/fotos-pecas/u-1/p-1.png");
        assert_eq!(photos.public_url(&UserID::new("u-2"), &reference), None);

        photos.remove(&user, &reference).unwrap();
        photos.remove(&user, &reference).unwrap();
        assert!(photos.is_empty());
        assert_eq!(photos.public_url(&user, &reference), None);
    }
}
