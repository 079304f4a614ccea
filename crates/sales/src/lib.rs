//! Sales domain module.
//!
//! This crate contains the sale aggregate: the sale header, its line items,
//! the storage contract they are persisted through, and the service that
//! validates cross-references against the client and catalog stores.

pub mod sale;

pub use sale::{
    LineItem, NewLineItem, NewSale, ResolvedLineItem, Sale, SaleService, SaleStore, SaleWithItems,
};
