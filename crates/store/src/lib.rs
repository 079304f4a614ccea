//! `sandalia-store` — in-memory persistence for the sandalia domain.
//!
//! One [`MemoryStore`] implements every domain storage port, so
//! cross-entity reads and reference checks observe a single dataset.

pub mod memory;
pub mod snapshot;

pub use memory::MemoryStore;
pub use snapshot::{SnapshotSource, StoreSnapshot};
