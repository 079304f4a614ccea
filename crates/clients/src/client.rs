use std::sync::Arc;

use serde::{Deserialize, Serialize};

use sandalia_core::{ClientId, DomainError, DomainResult};

/// Client record as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub phone: String,
    pub address: String,
}

/// Client fields supplied by the caller; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub phone: String,
    pub address: String,
}

impl NewClient {
    /// A client must have a non-empty name.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::invalid_argument("name cannot be empty"));
        }
        Ok(())
    }
}

/// Storage contract for client records.
///
/// Id assignment: smallest integer greater than any id the store has ever
/// issued (1 when empty); ids are never reused after deletion. A miss on
/// get/update/delete is `None`, not an error; the error channel carries
/// storage faults only.
pub trait ClientStore: Send + Sync {
    fn create(&self, new: NewClient) -> DomainResult<Client>;
    fn get(&self, id: ClientId) -> DomainResult<Option<Client>>;
    fn update(&self, id: ClientId, new: NewClient) -> DomainResult<Option<Client>>;
    fn delete(&self, id: ClientId) -> DomainResult<Option<Client>>;
    fn list(&self) -> DomainResult<Vec<Client>>;
}

impl<S> ClientStore for Arc<S>
where
    S: ClientStore + ?Sized,
{
    fn create(&self, new: NewClient) -> DomainResult<Client> {
        (**self).create(new)
    }

    fn get(&self, id: ClientId) -> DomainResult<Option<Client>> {
        (**self).get(id)
    }

    fn update(&self, id: ClientId, new: NewClient) -> DomainResult<Option<Client>> {
        (**self).update(id, new)
    }

    fn delete(&self, id: ClientId) -> DomainResult<Option<Client>> {
        (**self).delete(id)
    }

    fn list(&self) -> DomainResult<Vec<Client>> {
        (**self).list()
    }
}

/// Application service for client CRUD.
#[derive(Debug, Clone)]
pub struct ClientService<S> {
    store: S,
}

impl<S: ClientStore> ClientService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn create(&self, new: NewClient) -> DomainResult<Client> {
        new.validate()?;
        self.store.create(new)
    }

    pub fn get(&self, id: ClientId) -> DomainResult<Client> {
        self.store.get(id)?.ok_or_else(|| not_found(id))
    }

    pub fn update(&self, id: ClientId, new: NewClient) -> DomainResult<Client> {
        new.validate()?;
        self.store.update(id, new)?.ok_or_else(|| not_found(id))
    }

    pub fn delete(&self, id: ClientId) -> DomainResult<Client> {
        self.store.delete(id)?.ok_or_else(|| not_found(id))
    }

    pub fn list(&self) -> DomainResult<Vec<Client>> {
        self.store.list()
    }
}

fn not_found(id: ClientId) -> DomainError {
    DomainError::not_found(format!("client {id} not found"))
}
