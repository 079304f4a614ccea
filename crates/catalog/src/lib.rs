//! Catalog domain module.
//!
//! This crate contains the sandal (product) record and the storage contract
//! it is persisted through (no IO, no HTTP).

pub mod sandal;

pub use sandal::{CatalogService, NewSandal, Sandal, SandalStore};
