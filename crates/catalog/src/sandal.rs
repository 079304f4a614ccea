use std::sync::Arc;

use serde::{Deserialize, Serialize};

use sandalia_core::{DomainError, DomainResult, SandalId};

/// Catalog record: one sandal model as stocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sandal {
    pub id: SandalId,
    /// Business code; the catalog does not require it to be unique.
    pub code: String,
    pub name: String,
    /// Price in smallest currency unit (e.g., cents).
    pub price: u64,
    pub color: String,
    pub size: u32,
    /// On-hand stock; corrections may drive it negative.
    pub quantity: i64,
}

/// Sandal fields supplied by the caller; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSandal {
    pub code: String,
    pub name: String,
    pub price: u64,
    pub color: String,
    pub size: u32,
    pub quantity: i64,
}

/// Storage contract for sandal records. Same id and miss semantics as the
/// client store: monotonic ids starting at 1, `None` for a missing record.
pub trait SandalStore: Send + Sync {
    fn create(&self, new: NewSandal) -> DomainResult<Sandal>;
    fn get(&self, id: SandalId) -> DomainResult<Option<Sandal>>;
    fn update(&self, id: SandalId, new: NewSandal) -> DomainResult<Option<Sandal>>;
    fn delete(&self, id: SandalId) -> DomainResult<Option<Sandal>>;
    fn list(&self) -> DomainResult<Vec<Sandal>>;
}

impl<S> SandalStore for Arc<S>
where
    S: SandalStore + ?Sized,
{
    fn create(&self, new: NewSandal) -> DomainResult<Sandal> {
        (**self).create(new)
    }

    fn get(&self, id: SandalId) -> DomainResult<Option<Sandal>> {
        (**self).get(id)
    }

    fn update(&self, id: SandalId, new: NewSandal) -> DomainResult<Option<Sandal>> {
        (**self).update(id, new)
    }

    fn delete(&self, id: SandalId) -> DomainResult<Option<Sandal>> {
        (**self).delete(id)
    }

    fn list(&self) -> DomainResult<Vec<Sandal>> {
        (**self).list()
    }
}

/// Application service for catalog CRUD.
#[derive(Debug, Clone)]
pub struct CatalogService<S> {
    store: S,
}

impl<S: SandalStore> CatalogService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn create(&self, new: NewSandal) -> DomainResult<Sandal> {
        self.store.create(new)
    }

    pub fn get(&self, id: SandalId) -> DomainResult<Sandal> {
        self.store.get(id)?.ok_or_else(|| not_found(id))
    }

    pub fn update(&self, id: SandalId, new: NewSandal) -> DomainResult<Sandal> {
        self.store.update(id, new)?.ok_or_else(|| not_found(id))
    }

    pub fn delete(&self, id: SandalId) -> DomainResult<Sandal> {
        self.store.delete(id)?.ok_or_else(|| not_found(id))
    }

    pub fn list(&self) -> DomainResult<Vec<Sandal>> {
        self.store.list()
    }
}

fn not_found(id: SandalId) -> DomainError {
    DomainError::not_found(format!("sandal {id} not found"))
}
