use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sandalia_catalog::Sandal;
use sandalia_clients::Client;
use sandalia_core::DomainResult;
use sandalia_sales::{LineItem, Sale};

/// Point-in-time copy of every table, taken under a single read lock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub taken_at: DateTime<Utc>,
    pub clients: Vec<Client>,
    pub sandals: Vec<Sandal>,
    pub sales: Vec<Sale>,
    pub line_items: Vec<LineItem>,
}

/// Read-only view of the whole dataset for exports.
pub trait SnapshotSource: Send + Sync {
    fn snapshot(&self) -> DomainResult<StoreSnapshot>;
}

impl<S> SnapshotSource for Arc<S>
where
    S: SnapshotSource + ?Sized,
{
    fn snapshot(&self) -> DomainResult<StoreSnapshot> {
        (**self).snapshot()
    }
}
