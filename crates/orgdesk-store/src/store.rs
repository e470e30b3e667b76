//! The live document and its durable mirror.

use orgdesk_model::{Document, Entity, EntityId};

use crate::codec::{decode_document, encode_document};
use crate::error::{PersistenceError, Result};
use crate::storage::{DOCUMENT_KEY, Storage};

/// How the live document came to be installed by [`DocumentStore::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    /// Parsed from storage.
    Stored,
    /// Storage held no document; seed data was installed.
    SeededEmpty,
    /// The stored blob was unreadable and was replaced by seed data.
    SeededCorrupt,
}

impl LoadOrigin {
    pub fn is_seeded(&self) -> bool {
        !matches!(self, Self::Stored)
    }
}

/// Owns the in-memory [`Document`] and writes it back to storage after
/// every mutation.
///
/// Mutations run against a working copy ([`DocumentStore::transact`]); the
/// copy only replaces the live document once it has been saved, so a
/// failed precondition or a failed write leaves everything untouched.
#[derive(Debug)]
pub struct DocumentStore<S> {
    storage: S,
    document: Document,
    origin: LoadOrigin,
}

impl<S: Storage> DocumentStore<S> {
    /// Read the document from `storage`, installing seed data when it is
    /// absent or unreadable.
    ///
    /// A corrupt blob is never reported as an error; only failures of the
    /// storage itself are.
    pub fn load(storage: S) -> Result<Self> {
        let (document, origin) = match storage.get(DOCUMENT_KEY)? {
            None => (Document::seed(), LoadOrigin::SeededEmpty),
            Some(blob) => match decode_document(&blob) {
                Ok(document) => (document, LoadOrigin::Stored),
                Err(error) => {
                    tracing::warn!(%error, "stored document unreadable, reseeding");
                    (Document::seed(), LoadOrigin::SeededCorrupt)
                }
            },
        };

        let mut store = Self {
            storage,
            document,
            origin,
        };
        if origin.is_seeded() {
            store.save()?;
            tracing::info!(?origin, "installed seed document");
        } else {
            tracing::info!(
                accounts = store.document.accounts.len(),
                departments = store.document.departments.len(),
                employees = store.document.employees.len(),
                requests = store.document.requests.len(),
                "loaded document"
            );
        }
        Ok(store)
    }

    pub fn origin(&self) -> LoadOrigin {
        self.origin
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Borrow the document and the storage at the same time.
    pub fn parts_mut(&mut self) -> (&Document, &mut S) {
        (&self.document, &mut self.storage)
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Serialize the live document and overwrite the stored blob.
    pub fn save(&mut self) -> Result<()> {
        let blob = encode_document(&self.document)?;
        self.storage.set(DOCUMENT_KEY, &blob)?;
        tracing::debug!(bytes = blob.len(), "saved document");
        Ok(())
    }

    /// Run `change` against a copy of the document, save the copy, then
    /// install it. Nothing changes if `change` or the save fails.
    pub fn transact<T, E>(
        &mut self,
        change: impl FnOnce(&mut Document) -> std::result::Result<T, E>,
    ) -> std::result::Result<T, E>
    where
        E: From<PersistenceError>,
    {
        let mut working = self.document.clone();
        let output = change(&mut working)?;
        let blob = encode_document(&working)?;
        self.storage.set(DOCUMENT_KEY, &blob)?;
        self.document = working;
        Ok(output)
    }

    pub fn find<E: Entity>(&self, predicate: impl Fn(&E) -> bool) -> Option<&E> {
        self.document.find(predicate)
    }

    pub fn get<E: Entity>(&self, id: &EntityId) -> Option<&E> {
        self.document.get(id)
    }

    /// Insert a new entity with a freshly assigned id and save.
    pub fn insert<E: Entity>(&mut self, build: impl FnOnce(EntityId) -> E) -> Result<E> {
        self.transact(|doc| Ok(doc.insert(build).clone()))
    }

    /// Patch the entity with `id` in place and save. Returns false, without
    /// saving, when no such entity exists.
    pub fn update<E: Entity>(&mut self, id: &EntityId, patch: impl FnOnce(&mut E)) -> Result<bool> {
        if !self.document.contains::<E>(id) {
            return Ok(false);
        }
        self.transact(|doc| Ok(doc.update(id, patch)))
    }

    /// Remove the entity with `id` and save. Returns false, without saving,
    /// when no such entity exists.
    pub fn remove<E: Entity>(&mut self, id: &EntityId) -> Result<bool> {
        if !self.document.contains::<E>(id) {
            return Ok(false);
        }
        self.transact(|doc| Ok(doc.remove::<E>(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use orgdesk_model::Department;

    #[test]
    fn test_load_empty_storage_seeds_and_saves() {
        let store = DocumentStore::load(MemoryStorage::new()).unwrap();
        assert_eq!(store.origin(), LoadOrigin::SeededEmpty);
        assert_eq!(store.document(), &Document::seed());
        assert!(store.storage().get(DOCUMENT_KEY).unwrap().is_some());
    }

    #[test]
    fn test_load_corrupt_blob_reseeds() {
        let storage = MemoryStorage::new().with_entry(DOCUMENT_KEY, "{{{ nope");
        let store = DocumentStore::load(storage).unwrap();
        assert_eq!(store.origin(), LoadOrigin::SeededCorrupt);
        assert_eq!(store.document(), &Document::seed());

        let blob = store.storage().get(DOCUMENT_KEY).unwrap().unwrap();
        assert_eq!(decode_document(&blob).unwrap(), Document::seed());
    }

    #[test]
    fn test_transact_error_leaves_document_untouched() {
        let mut store = DocumentStore::load(MemoryStorage::new()).unwrap();
        let before_blob = store.storage().get(DOCUMENT_KEY).unwrap();

        let result: std::result::Result<(), PersistenceError> = store.transact(|doc| {
            doc.departments.clear();
            Err(PersistenceError::UnsupportedVersion {
                found: 2,
                max_supported: 1,
            })
        });

        assert!(result.is_err());
        assert_eq!(store.document().departments.len(), 2);
        assert_eq!(store.storage().get(DOCUMENT_KEY).unwrap(), before_blob);
    }

    #[test]
    fn test_update_missing_id_is_noop() {
        let mut store = DocumentStore::load(MemoryStorage::new()).unwrap();
        let missing = EntityId::new("dept_404").unwrap();
        assert!(!store
            .update::<Department>(&missing, |d| d.name.clear())
            .unwrap());
        assert!(!store.remove::<Department>(&missing).unwrap());
        assert_eq!(store.document(), &Document::seed());
    }
}
