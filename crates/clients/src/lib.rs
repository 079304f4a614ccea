//! Clients domain module.
//!
//! This crate contains the client record, its domain rules, and the storage
//! contract the record is persisted through (no IO, no HTTP).

pub mod client;

pub use client::{Client, ClientService, ClientStore, NewClient};
