use std::sync::Arc;

use serde::{Deserialize, Serialize};

use sandalia_catalog::{Sandal, SandalStore};
use sandalia_clients::ClientStore;
use sandalia_core::{ClientId, DomainError, DomainResult, LineItemId, SaleId, SandalId};

/// Sale header. Owns its line items; they never outlive it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub client_id: ClientId,
    /// Caller-supplied total in smallest currency unit; never recomputed
    /// from line items.
    pub total_value: u64,
}

/// Sale scalar fields supplied by the caller; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSale {
    pub client_id: ClientId,
    pub total_value: u64,
}

/// Line item binding a sandal and quantity to its owning sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    pub sale_id: SaleId,
    pub sandal_id: SandalId,
    pub quantity: i64,
}

/// Line item fields accepted when a sale is created or a sandal attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLineItem {
    pub sandal_id: SandalId,
    pub quantity: i64,
}

/// Sale with its line items resolved for read responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleWithItems {
    pub sale: Sale,
    pub items: Vec<ResolvedLineItem>,
}

/// Line item with its sandal dereferenced. The sandal is `None` when the
/// catalog record was deleted after the item was attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLineItem {
    pub item: LineItem,
    pub sandal: Option<Sandal>,
}

/// Storage contract for the sale aggregate.
///
/// `create` and `delete` are atomic over the header and its line items: a
/// failure partway leaves neither visible. Line items are returned in the
/// order they were attached.
pub trait SaleStore: Send + Sync {
    /// Persist the header and any initial line items as one unit.
    fn create(&self, new: NewSale, items: Vec<NewLineItem>) -> DomainResult<(Sale, Vec<LineItem>)>;
    fn get(&self, id: SaleId) -> DomainResult<Option<Sale>>;
    /// Overwrite the scalar header fields; line items are untouched.
    fn update(&self, id: SaleId, new: NewSale) -> DomainResult<Option<Sale>>;
    /// Delete the header and cascade to its line items.
    fn delete(&self, id: SaleId) -> DomainResult<Option<Sale>>;
    fn list(&self) -> DomainResult<Vec<Sale>>;
    fn count(&self) -> DomainResult<u64>;
    /// Append one line item; `None` when the sale does not exist.
    fn attach_item(&self, sale_id: SaleId, item: NewLineItem) -> DomainResult<Option<LineItem>>;
    fn line_items(&self, sale_id: SaleId) -> DomainResult<Vec<LineItem>>;
    fn references_client(&self, id: ClientId) -> DomainResult<bool>;
    fn references_sandal(&self, id: SandalId) -> DomainResult<bool>;
}

impl<S> SaleStore for Arc<S>
where
    S: SaleStore + ?Sized,
{
    fn create(&self, new: NewSale, items: Vec<NewLineItem>) -> DomainResult<(Sale, Vec<LineItem>)> {
        (**self).create(new, items)
    }

    fn get(&self, id: SaleId) -> DomainResult<Option<Sale>> {
        (**self).get(id)
    }

    fn update(&self, id: SaleId, new: NewSale) -> DomainResult<Option<Sale>> {
        (**self).update(id, new)
    }

    fn delete(&self, id: SaleId) -> DomainResult<Option<Sale>> {
        (**self).delete(id)
    }

    fn list(&self) -> DomainResult<Vec<Sale>> {
        (**self).list()
    }

    fn count(&self) -> DomainResult<u64> {
        (**self).count()
    }

    fn attach_item(&self, sale_id: SaleId, item: NewLineItem) -> DomainResult<Option<LineItem>> {
        (**self).attach_item(sale_id, item)
    }

    fn line_items(&self, sale_id: SaleId) -> DomainResult<Vec<LineItem>> {
        (**self).line_items(sale_id)
    }

    fn references_client(&self, id: ClientId) -> DomainResult<bool> {
        (**self).references_client(id)
    }

    fn references_sandal(&self, id: SandalId) -> DomainResult<bool> {
        (**self).references_sandal(id)
    }
}

/// Application service for the sale aggregate.
///
/// Cross-entity validation reads go through the client and catalog store
/// contracts; the sale store is the only one this service writes to.
#[derive(Debug, Clone)]
pub struct SaleService<S, C, P> {
    sales: S,
    clients: C,
    catalog: P,
}

impl<S, C, P> SaleService<S, C, P>
where
    S: SaleStore,
    C: ClientStore,
    P: SandalStore,
{
    pub fn new(sales: S, clients: C, catalog: P) -> Self {
        Self {
            sales,
            clients,
            catalog,
        }
    }

    /// Create a sale for an existing client.
    ///
    /// Initial line items are persisted as given; only `attach_sandal`
    /// validates sandal references.
    pub fn create(&self, new: NewSale, items: Vec<NewLineItem>) -> DomainResult<Sale> {
        if self.clients.get(new.client_id)?.is_none() {
            return Err(DomainError::not_found(format!(
                "client {} not found",
                new.client_id
            )));
        }
        let (sale, _items) = self.sales.create(new, items)?;
        Ok(sale)
    }

    pub fn get(&self, id: SaleId) -> DomainResult<SaleWithItems> {
        let sale = self.sales.get(id)?.ok_or_else(|| not_found(id))?;
        self.resolve(sale)
    }

    pub fn list(&self) -> DomainResult<Vec<SaleWithItems>> {
        self.sales
            .list()?
            .into_iter()
            .map(|sale| self.resolve(sale))
            .collect()
    }

    /// Overwrite the scalar header fields. The client reference is bound at
    /// creation time only and is not re-validated here.
    pub fn update(&self, id: SaleId, new: NewSale) -> DomainResult<Sale> {
        self.sales.update(id, new)?.ok_or_else(|| not_found(id))
    }

    /// Delete the sale and every line item it owns.
    pub fn delete(&self, id: SaleId) -> DomainResult<Sale> {
        self.sales.delete(id)?.ok_or_else(|| not_found(id))
    }

    pub fn count(&self) -> DomainResult<u64> {
        self.sales.count()
    }

    /// Attach a sandal to a sale on behalf of a client.
    ///
    /// All three ids must resolve; the failure names them together rather
    /// than per field. The quantity must be positive.
    pub fn attach_sandal(
        &self,
        sale_id: SaleId,
        sandal_id: SandalId,
        client_id: ClientId,
        quantity: i64,
    ) -> DomainResult<LineItem> {
        let sale_ok = self.sales.get(sale_id)?.is_some();
        let sandal_ok = self.catalog.get(sandal_id)?.is_some();
        let client_ok = self.clients.get(client_id)?.is_some();
        if !sale_ok || !sandal_ok || !client_ok {
            return Err(combined_id_error(sale_id, sandal_id, client_id));
        }
        if quantity <= 0 {
            return Err(DomainError::invalid_argument("quantity must be positive"));
        }

        let item = NewLineItem {
            sandal_id,
            quantity,
        };
        self.sales
            .attach_item(sale_id, item)?
            .ok_or_else(|| combined_id_error(sale_id, sandal_id, client_id))
    }

    /// Sandals referenced by the sale's line items, in attach order. A line
    /// item whose sandal no longer resolves yields `None` at its position.
    pub fn sandals_for_sale(&self, sale_id: SaleId) -> DomainResult<Vec<Option<Sandal>>> {
        if self.sales.get(sale_id)?.is_none() {
            return Err(not_found(sale_id));
        }
        self.sales
            .line_items(sale_id)?
            .into_iter()
            .map(|item| self.catalog.get(item.sandal_id))
            .collect()
    }

    /// Whether any sale still references the client.
    pub fn references_client(&self, id: ClientId) -> DomainResult<bool> {
        self.sales.references_client(id)
    }

    /// Whether any line item still references the sandal.
    pub fn references_sandal(&self, id: SandalId) -> DomainResult<bool> {
        self.sales.references_sandal(id)
    }

    fn resolve(&self, sale: Sale) -> DomainResult<SaleWithItems> {
        let items = self
            .sales
            .line_items(sale.id)?
            .into_iter()
            .map(|item| {
                Ok(ResolvedLineItem {
                    sandal: self.catalog.get(item.sandal_id)?,
                    item,
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(SaleWithItems { sale, items })
    }
}

fn not_found(id: SaleId) -> DomainError {
    DomainError::not_found(format!("sale {id} not found"))
}

fn combined_id_error(sale_id: SaleId, sandal_id: SandalId, client_id: ClientId) -> DomainError {
    DomainError::invalid_argument(format!(
        "ids do not resolve: sale={sale_id}, sandal={sandal_id}, client={client_id}"
    ))
}
