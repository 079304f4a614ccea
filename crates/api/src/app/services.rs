use std::path::PathBuf;
use std::sync::Arc;

use sandalia_catalog::{CatalogService, NewSandal, Sandal};
use sandalia_clients::{Client, ClientService, NewClient};
use sandalia_core::{ClientId, DomainError, DomainResult, SaleId, SandalId};
use sandalia_export::{BundleInfo, ChecksumInfo, ExportService};
use sandalia_sales::{LineItem, NewLineItem, NewSale, Sale, SaleService, SaleWithItems};
use sandalia_store::MemoryStore;

// Every service shares the one storage backing.
type Store = Arc<MemoryStore>;

/// Composition root: the domain services behind the HTTP handlers.
pub struct AppServices {
    clients: ClientService<Store>,
    catalog: CatalogService<Store>,
    sales: SaleService<Store, Store, Store>,
    export: ExportService<Store>,
}

pub fn build_services(export_dir: impl Into<PathBuf>) -> AppServices {
    let store: Store = Arc::new(MemoryStore::new());

    AppServices {
        clients: ClientService::new(store.clone()),
        catalog: CatalogService::new(store.clone()),
        sales: SaleService::new(store.clone(), store.clone(), store.clone()),
        export: ExportService::new(store, export_dir),
    }
}

impl AppServices {
    pub fn clients_create(&self, new: NewClient) -> DomainResult<Client> {
        self.clients.create(new)
    }

    pub fn clients_get(&self, id: ClientId) -> DomainResult<Client> {
        self.clients.get(id)
    }

    pub fn clients_update(&self, id: ClientId, new: NewClient) -> DomainResult<Client> {
        self.clients.update(id, new)
    }

    /// Deletion is restricted while any sale still references the client.
    pub fn clients_delete(&self, id: ClientId) -> DomainResult<Client> {
        if self.sales.references_client(id)? {
            return Err(DomainError::invalid_argument(format!(
                "client {id} is referenced by existing sales"
            )));
        }
        self.clients.delete(id)
    }

    pub fn clients_list(&self) -> DomainResult<Vec<Client>> {
        self.clients.list()
    }

    pub fn sandals_create(&self, new: NewSandal) -> DomainResult<Sandal> {
        self.catalog.create(new)
    }

    pub fn sandals_get(&self, id: SandalId) -> DomainResult<Sandal> {
        self.catalog.get(id)
    }

    pub fn sandals_update(&self, id: SandalId, new: NewSandal) -> DomainResult<Sandal> {
        self.catalog.update(id, new)
    }

    /// Deletion is restricted while any line item still references the sandal.
    pub fn sandals_delete(&self, id: SandalId) -> DomainResult<Sandal> {
        if self.sales.references_sandal(id)? {
            return Err(DomainError::invalid_argument(format!(
                "sandal {id} is referenced by existing sales"
            )));
        }
        self.catalog.delete(id)
    }

    pub fn sandals_list(&self) -> DomainResult<Vec<Sandal>> {
        self.catalog.list()
    }

    pub fn sales_create(&self, new: NewSale, items: Vec<NewLineItem>) -> DomainResult<Sale> {
        self.sales.create(new, items)
    }

    pub fn sales_get(&self, id: SaleId) -> DomainResult<SaleWithItems> {
        self.sales.get(id)
    }

    pub fn sales_list(&self) -> DomainResult<Vec<SaleWithItems>> {
        self.sales.list()
    }

    pub fn sales_update(&self, id: SaleId, new: NewSale) -> DomainResult<Sale> {
        self.sales.update(id, new)
    }

    pub fn sales_delete(&self, id: SaleId) -> DomainResult<Sale> {
        self.sales.delete(id)
    }

    pub fn sales_count(&self) -> DomainResult<u64> {
        self.sales.count()
    }

    pub fn sales_attach(
        &self,
        sale_id: SaleId,
        sandal_id: SandalId,
        client_id: ClientId,
        quantity: i64,
    ) -> DomainResult<LineItem> {
        self.sales.attach_sandal(sale_id, sandal_id, client_id, quantity)
    }

    pub fn sales_sandals(&self, sale_id: SaleId) -> DomainResult<Vec<Option<Sandal>>> {
        self.sales.sandals_for_sale(sale_id)
    }

    pub async fn export_bundle(&self) -> DomainResult<BundleInfo> {
        self.export.write_bundle().await
    }

    pub async fn export_checksum(&self) -> DomainResult<ChecksumInfo> {
        self.export.checksum().await
    }
}
