use serde::Deserialize;

use sandalia_catalog::Sandal;
use sandalia_clients::Client;
use sandalia_core::{ClientId, SandalId};
use sandalia_export::{BundleInfo, ChecksumInfo};
use sandalia_sales::{LineItem, Sale, SaleWithItems};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct ClientRequest {
    pub name: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Deserialize)]
pub struct SandalRequest {
    pub code: String,
    pub name: String,
    pub price: u64,
    pub color: String,
    pub size: u32,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateSaleRequest {
    pub client_id: ClientId,
    pub total_value: u64,
    #[serde(default)]
    pub items: Vec<SaleItemRequest>,
}

#[derive(Debug, Deserialize)]
pub struct SaleItemRequest {
    pub sandal_id: SandalId,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSaleRequest {
    pub client_id: ClientId,
    pub total_value: u64,
}

#[derive(Debug, Deserialize)]
pub struct AttachQuery {
    pub quantity: i64,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn client_to_json(client: Client) -> serde_json::Value {
    serde_json::json!({
        "id": client.id,
        "name": client.name,
        "phone": client.phone,
        "address": client.address,
    })
}

pub fn sandal_to_json(sandal: Sandal) -> serde_json::Value {
    serde_json::json!({
        "id": sandal.id,
        "code": sandal.code,
        "name": sandal.name,
        "price": sandal.price,
        "color": sandal.color,
        "size": sandal.size,
        "quantity": sandal.quantity,
    })
}

pub fn sale_to_json(sale: Sale) -> serde_json::Value {
    serde_json::json!({
        "id": sale.id,
        "client_id": sale.client_id,
        "total_value": sale.total_value,
    })
}

pub fn sale_with_items_to_json(sale: SaleWithItems) -> serde_json::Value {
    serde_json::json!({
        "id": sale.sale.id,
        "client_id": sale.sale.client_id,
        "total_value": sale.sale.total_value,
        "items": sale.items.into_iter().map(|resolved| serde_json::json!({
            "id": resolved.item.id,
            "sandal_id": resolved.item.sandal_id,
            "quantity": resolved.item.quantity,
            "sandal": resolved.sandal.map(sandal_to_json),
        })).collect::<Vec<_>>(),
    })
}

pub fn line_item_to_json(item: LineItem) -> serde_json::Value {
    serde_json::json!({
        "id": item.id,
        "sale_id": item.sale_id,
        "sandal_id": item.sandal_id,
        "quantity": item.quantity,
    })
}

pub fn bundle_to_json(info: BundleInfo) -> serde_json::Value {
    serde_json::json!({
        "file_name": info.file_name,
        "size_bytes": info.size_bytes,
        "created_at": info.created_at.to_rfc3339(),
    })
}

pub fn checksum_to_json(info: ChecksumInfo) -> serde_json::Value {
    serde_json::json!({
        "file_name": info.file_name,
        "sha256": info.sha256,
    })
}
