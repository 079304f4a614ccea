//! Single-process storage backing every domain port.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use sandalia_catalog::{NewSandal, Sandal, SandalStore};
use sandalia_clients::{Client, ClientStore, NewClient};
use sandalia_core::{ClientId, DomainError, DomainResult, LineItemId, SaleId, SandalId};
use sandalia_sales::{LineItem, NewLineItem, NewSale, Sale, SaleStore};

use crate::snapshot::{SnapshotSource, StoreSnapshot};

/// One table of rows keyed by id.
///
/// `next_id` is a high-water mark: it only ever grows, so ids of deleted
/// rows are never reassigned. Iteration order is ascending id, which is
/// creation order.
#[derive(Debug, Clone)]
struct Table<R> {
    rows: BTreeMap<u64, R>,
    next_id: u64,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 0,
        }
    }
}

impl<R: Clone> Table<R> {
    fn insert_with(&mut self, make: impl FnOnce(u64) -> R) -> R {
        self.next_id += 1;
        let row = make(self.next_id);
        self.rows.insert(self.next_id, row.clone());
        row
    }

    fn get(&self, id: u64) -> Option<R> {
        self.rows.get(&id).cloned()
    }

    fn contains(&self, id: u64) -> bool {
        self.rows.contains_key(&id)
    }

    fn update(&mut self, id: u64, apply: impl FnOnce(&mut R)) -> Option<R> {
        let row = self.rows.get_mut(&id)?;
        apply(row);
        Some(row.clone())
    }

    fn remove(&mut self, id: u64) -> Option<R> {
        self.rows.remove(&id)
    }

    fn retain(&mut self, mut keep: impl FnMut(&R) -> bool) {
        self.rows.retain(|_, row| keep(row));
    }

    fn list(&self) -> Vec<R> {
        self.rows.values().cloned().collect()
    }

    fn values(&self) -> impl Iterator<Item = &R> {
        self.rows.values()
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug, Clone, Default)]
struct Tables {
    clients: Table<Client>,
    sandals: Table<Sandal>,
    sales: Table<Sale>,
    line_items: Table<LineItem>,
}

/// In-memory store implementing every domain port over one lock, so a
/// reference check and the write it guards see the same dataset.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> DomainResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| DomainError::operational("storage lock poisoned"))
    }

    fn write(&self) -> DomainResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| DomainError::operational("storage lock poisoned"))
    }

    /// Run a multi-row mutation as a unit: on error the tables are restored
    /// to their state before the closure ran.
    fn mutate<T>(&self, op: impl FnOnce(&mut Tables) -> DomainResult<T>) -> DomainResult<T> {
        let mut tables = self.write()?;
        let before = tables.clone();
        match op(&mut tables) {
            Ok(value) => Ok(value),
            Err(err) => {
                *tables = before;
                tracing::warn!("storage mutation failed, rolled back: {err}");
                Err(err)
            }
        }
    }
}

impl ClientStore for MemoryStore {
    fn create(&self, new: NewClient) -> DomainResult<Client> {
        let mut tables = self.write()?;
        Ok(tables.clients.insert_with(|id| Client {
            id: ClientId::new(id),
            name: new.name,
            phone: new.phone,
            address: new.address,
        }))
    }

    fn get(&self, id: ClientId) -> DomainResult<Option<Client>> {
        Ok(self.read()?.clients.get(id.as_u64()))
    }

    fn update(&self, id: ClientId, new: NewClient) -> DomainResult<Option<Client>> {
        let mut tables = self.write()?;
        Ok(tables.clients.update(id.as_u64(), |row| {
            row.name = new.name;
            row.phone = new.phone;
            row.address = new.address;
        }))
    }

    fn delete(&self, id: ClientId) -> DomainResult<Option<Client>> {
        Ok(self.write()?.clients.remove(id.as_u64()))
    }

    fn list(&self) -> DomainResult<Vec<Client>> {
        Ok(self.read()?.clients.list())
    }
}

impl SandalStore for MemoryStore {
    fn create(&self, new: NewSandal) -> DomainResult<Sandal> {
        let mut tables = self.write()?;
        Ok(tables.sandals.insert_with(|id| Sandal {
            id: SandalId::new(id),
            code: new.code,
            name: new.name,
            price: new.price,
            color: new.color,
            size: new.size,
            quantity: new.quantity,
        }))
    }

    fn get(&self, id: SandalId) -> DomainResult<Option<Sandal>> {
        Ok(self.read()?.sandals.get(id.as_u64()))
    }

    fn update(&self, id: SandalId, new: NewSandal) -> DomainResult<Option<Sandal>> {
        let mut tables = self.write()?;
        Ok(tables.sandals.update(id.as_u64(), |row| {
            row.code = new.code;
            row.name = new.name;
            row.price = new.price;
            row.color = new.color;
            row.size = new.size;
            row.quantity = new.quantity;
        }))
    }

    fn delete(&self, id: SandalId) -> DomainResult<Option<Sandal>> {
        Ok(self.write()?.sandals.remove(id.as_u64()))
    }

    fn list(&self) -> DomainResult<Vec<Sandal>> {
        Ok(self.read()?.sandals.list())
    }
}

impl SaleStore for MemoryStore {
    fn create(&self, new: NewSale, items: Vec<NewLineItem>) -> DomainResult<(Sale, Vec<LineItem>)> {
        self.mutate(|tables| {
            let sale = tables.sales.insert_with(|id| Sale {
                id: SaleId::new(id),
                client_id: new.client_id,
                total_value: new.total_value,
            });
            let items = items
                .into_iter()
                .map(|item| {
                    tables.line_items.insert_with(|id| LineItem {
                        id: LineItemId::new(id),
                        sale_id: sale.id,
                        sandal_id: item.sandal_id,
                        quantity: item.quantity,
                    })
                })
                .collect();
            Ok((sale, items))
        })
    }

    fn get(&self, id: SaleId) -> DomainResult<Option<Sale>> {
        Ok(self.read()?.sales.get(id.as_u64()))
    }

    fn update(&self, id: SaleId, new: NewSale) -> DomainResult<Option<Sale>> {
        let mut tables = self.write()?;
        Ok(tables.sales.update(id.as_u64(), |row| {
            row.client_id = new.client_id;
            row.total_value = new.total_value;
        }))
    }

    fn delete(&self, id: SaleId) -> DomainResult<Option<Sale>> {
        self.mutate(|tables| {
            let removed = tables.sales.remove(id.as_u64());
            if removed.is_some() {
                tables.line_items.retain(|item| item.sale_id != id);
            }
            Ok(removed)
        })
    }

    fn list(&self) -> DomainResult<Vec<Sale>> {
        Ok(self.read()?.sales.list())
    }

    fn count(&self) -> DomainResult<u64> {
        Ok(self.read()?.sales.len() as u64)
    }

    fn attach_item(&self, sale_id: SaleId, item: NewLineItem) -> DomainResult<Option<LineItem>> {
        let mut tables = self.write()?;
        if !tables.sales.contains(sale_id.as_u64()) {
            return Ok(None);
        }
        Ok(Some(tables.line_items.insert_with(|id| LineItem {
            id: LineItemId::new(id),
            sale_id,
            sandal_id: item.sandal_id,
            quantity: item.quantity,
        })))
    }

    fn line_items(&self, sale_id: SaleId) -> DomainResult<Vec<LineItem>> {
        Ok(self
            .read()?
            .line_items
            .values()
            .filter(|item| item.sale_id == sale_id)
            .cloned()
            .collect())
    }

    fn references_client(&self, id: ClientId) -> DomainResult<bool> {
        Ok(self.read()?.sales.values().any(|sale| sale.client_id == id))
    }

    fn references_sandal(&self, id: SandalId) -> DomainResult<bool> {
        Ok(self
            .read()?
            .line_items
            .values()
            .any(|item| item.sandal_id == id))
    }
}

impl SnapshotSource for MemoryStore {
    fn snapshot(&self) -> DomainResult<StoreSnapshot> {
        let tables = self.read()?;
        Ok(StoreSnapshot {
            taken_at: Utc::now(),
            clients: tables.clients.list(),
            sandals: tables.sandals.list(),
            sales: tables.sales.list(),
            line_items: tables.line_items.list(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_client(name: &str) -> NewClient {
        NewClient {
            name: name.to_string(),
            phone: "+55 11 91234-5678".to_string(),
            address: "Rua das Flores 10".to_string(),
        }
    }

    fn new_sandal(code: &str) -> NewSandal {
        NewSandal {
            code: code.to_string(),
            name: "Praia Alta".to_string(),
            price: 5000,
            color: "blue".to_string(),
            size: 38,
            quantity: 10,
        }
    }

    fn new_sale(client_id: ClientId) -> NewSale {
        NewSale {
            client_id,
            total_value: 5000,
        }
    }

    fn item(sandal_id: u64) -> NewLineItem {
        NewLineItem {
            sandal_id: SandalId::new(sandal_id),
            quantity: 1,
        }
    }

    #[test]
    fn each_table_assigns_its_own_sequence() {
        let store = MemoryStore::new();
        let clients: &dyn ClientStore = &store;
        let catalog: &dyn SandalStore = &store;
        let sales: &dyn SaleStore = &store;

        let first = clients.create(new_client("Ana")).unwrap();
        let second = clients.create(new_client("Bia")).unwrap();
        let sandal = catalog.create(new_sandal("S1")).unwrap();
        let (sale, _) = sales.create(new_sale(first.id), Vec::new()).unwrap();

        assert_eq!(first.id.as_u64(), 1);
        assert_eq!(second.id.as_u64(), 2);
        assert_eq!(sandal.id.as_u64(), 1);
        assert_eq!(sale.id.as_u64(), 1);
    }

    #[test]
    fn deleted_ids_are_never_reassigned() {
        let store = MemoryStore::new();
        let clients: &dyn ClientStore = &store;

        let first = clients.create(new_client("Ana")).unwrap();
        clients.delete(first.id).unwrap();
        let second = clients.create(new_client("Bia")).unwrap();

        assert_eq!(second.id.as_u64(), 2);
        assert!(clients.get(first.id).unwrap().is_none());
    }

    #[test]
    fn update_overwrites_and_misses_return_none() {
        let store = MemoryStore::new();
        let clients: &dyn ClientStore = &store;

        let created = clients.create(new_client("Ana")).unwrap();
        let updated = clients.update(created.id, new_client("Bia")).unwrap();
        assert_eq!(updated.map(|c| c.name), Some("Bia".to_string()));
        assert_eq!(clients.get(created.id).unwrap().map(|c| c.name), Some("Bia".to_string()));

        assert!(clients.update(ClientId::new(9), new_client("X")).unwrap().is_none());
        assert!(clients.delete(ClientId::new(9)).unwrap().is_none());
    }

    #[test]
    fn list_returns_rows_in_creation_order() {
        let store = MemoryStore::new();
        let clients: &dyn ClientStore = &store;

        for name in ["Ana", "Bia", "Clara"] {
            clients.create(new_client(name)).unwrap();
        }
        let names: Vec<String> = clients
            .list()
            .unwrap()
            .into_iter()
            .map(|client| client.name)
            .collect();
        assert_eq!(names, ["Ana", "Bia", "Clara"]);
    }

    #[test]
    fn sale_create_persists_header_and_items_together() {
        let store = MemoryStore::new();
        let sales: &dyn SaleStore = &store;

        let (sale, items) = sales
            .create(new_sale(ClientId::new(1)), vec![item(1), item(2)])
            .unwrap();

        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|li| li.sale_id == sale.id));
        assert_eq!(sales.line_items(sale.id).unwrap(), items);
    }

    #[test]
    fn sale_delete_cascades_line_items() {
        let store = MemoryStore::new();
        let sales: &dyn SaleStore = &store;

        let (sale, _) = sales
            .create(new_sale(ClientId::new(1)), vec![item(1)])
            .unwrap();
        sales.delete(sale.id).unwrap();

        assert!(sales.get(sale.id).unwrap().is_none());
        assert!(sales.line_items(sale.id).unwrap().is_empty());
        assert!(!sales.references_sandal(SandalId::new(1)).unwrap());
    }

    #[test]
    fn attach_item_returns_none_for_missing_sale() {
        let store = MemoryStore::new();
        let sales: &dyn SaleStore = &store;
        assert!(sales.attach_item(SaleId::new(1), item(1)).unwrap().is_none());
    }

    #[test]
    fn line_items_keep_attach_order() {
        let store = MemoryStore::new();
        let sales: &dyn SaleStore = &store;

        let (sale, _) = sales.create(new_sale(ClientId::new(1)), Vec::new()).unwrap();
        for sandal_id in [3, 1, 2] {
            sales.attach_item(sale.id, item(sandal_id)).unwrap();
        }

        let order: Vec<u64> = sales
            .line_items(sale.id)
            .unwrap()
            .into_iter()
            .map(|li| li.sandal_id.as_u64())
            .collect();
        assert_eq!(order, [3, 1, 2]);
    }

    #[test]
    fn line_items_cover_only_the_requested_sale() {
        let store = MemoryStore::new();
        let sales: &dyn SaleStore = &store;

        let (first, _) = sales
            .create(new_sale(ClientId::new(1)), vec![item(1)])
            .unwrap();
        let (second, _) = sales
            .create(new_sale(ClientId::new(1)), vec![item(2), item(3)])
            .unwrap();

        assert_eq!(sales.line_items(first.id).unwrap().len(), 1);
        assert_eq!(sales.line_items(second.id).unwrap().len(), 2);
    }

    #[test]
    fn count_reflects_live_sales() {
        let store = MemoryStore::new();
        let sales: &dyn SaleStore = &store;
        assert_eq!(sales.count().unwrap(), 0);

        let (first, _) = sales.create(new_sale(ClientId::new(1)), Vec::new()).unwrap();
        sales.create(new_sale(ClientId::new(1)), Vec::new()).unwrap();
        assert_eq!(sales.count().unwrap(), 2);

        sales.delete(first.id).unwrap();
        assert_eq!(sales.count().unwrap(), 1);
    }

    #[test]
    fn references_observe_headers_and_items() {
        let store = MemoryStore::new();
        let sales: &dyn SaleStore = &store;
        let client_id = ClientId::new(1);
        let sandal_id = SandalId::new(1);

        assert!(!sales.references_client(client_id).unwrap());
        assert!(!sales.references_sandal(sandal_id).unwrap());

        let (sale, _) = sales.create(new_sale(client_id), Vec::new()).unwrap();
        sales.attach_item(sale.id, item(1)).unwrap();
        assert!(sales.references_client(client_id).unwrap());
        assert!(sales.references_sandal(sandal_id).unwrap());

        sales.delete(sale.id).unwrap();
        assert!(!sales.references_client(client_id).unwrap());
        assert!(!sales.references_sandal(sandal_id).unwrap());
    }

    #[test]
    fn failed_mutations_roll_back() {
        let store = MemoryStore::new();
        let clients: &dyn ClientStore = &store;
        clients.create(new_client("Ana")).unwrap();

        let result: DomainResult<()> = store.mutate(|tables| {
            tables.clients.insert_with(|id| Client {
                id: ClientId::new(id),
                name: "Bia".to_string(),
                phone: String::new(),
                address: String::new(),
            });
            tables.sales.insert_with(|id| Sale {
                id: SaleId::new(id),
                client_id: ClientId::new(1),
                total_value: 1,
            });
            Err(DomainError::operational("forced failure"))
        });
        assert!(matches!(result.unwrap_err(), DomainError::Operational(_)));

        assert_eq!(clients.list().unwrap().len(), 1);
        let sales: &dyn SaleStore = &store;
        assert_eq!(sales.count().unwrap(), 0);
    }

    #[test]
    fn snapshot_copies_every_table() {
        let store = MemoryStore::new();
        let clients: &dyn ClientStore = &store;
        let catalog: &dyn SandalStore = &store;
        let sales: &dyn SaleStore = &store;

        let client = clients.create(new_client("Ana")).unwrap();
        let sandal = catalog.create(new_sandal("S1")).unwrap();
        let (sale, _) = sales
            .create(new_sale(client.id), vec![item(sandal.id.as_u64())])
            .unwrap();

        let snap = store.snapshot().unwrap();
        assert_eq!(snap.clients, vec![client]);
        assert_eq!(snap.sandals, vec![sandal]);
        assert_eq!(snap.sales, vec![sale]);
        assert_eq!(snap.line_items.len(), 1);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::BTreeSet;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            #[test]
            fn sale_ids_stay_unique_across_interleaved_deletes(
                ops in proptest::collection::vec(any::<bool>(), 1..40)
            ) {
                let store = MemoryStore::new();
                let sales: &dyn SaleStore = &store;
                let mut seen = BTreeSet::new();
                let mut live = Vec::new();

                for create in ops {
                    if create || live.is_empty() {
                        let (sale, _) = sales
                            .create(new_sale(ClientId::new(1)), Vec::new())
                            .unwrap();
                        prop_assert!(seen.insert(sale.id.as_u64()));
                        live.push(sale.id);
                    } else {
                        let id = live.pop().unwrap();
                        prop_assert!(sales.delete(id).unwrap().is_some());
                    }
                }
            }
        }
    }
}
