use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use sandalia_core::{ClientId, SaleId, SandalId};
use sandalia_sales::{NewLineItem, NewSale};

use crate::app::extract::{ApiJson, ApiQuery};
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_sale).get(list_sales))
        .route("/total", get(total_sales))
        .route("/:id", get(get_sale).put(update_sale).delete(delete_sale))
        .route("/:id/sandals", get(sandals_for_sale))
        .route("/:id/sandals/:sandal_id/client/:client_id", post(attach_sandal))
}

pub async fn create_sale(
    Extension(services): Extension<Arc<AppServices>>,
    ApiJson(body): ApiJson<dto::CreateSaleRequest>,
) -> axum::response::Response {
    let new = NewSale {
        client_id: body.client_id,
        total_value: body.total_value,
    };
    let items = body
        .items
        .into_iter()
        .map(|item| NewLineItem {
            sandal_id: item.sandal_id,
            quantity: item.quantity,
        })
        .collect::<Vec<_>>();
    match services.sales_create(new, items) {
        Ok(sale) => (StatusCode::CREATED, Json(dto::sale_to_json(sale))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_sale(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: SaleId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid sale id"),
    };
    match services.sales_get(id) {
        Ok(sale) => (StatusCode::OK, Json(dto::sale_with_items_to_json(sale))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_sales(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = match services.sales_list() {
        Ok(sales) => sales.into_iter().map(dto::sale_with_items_to_json).collect::<Vec<_>>(),
        Err(e) => return errors::domain_error_to_response(e),
    };
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

/// Registered ahead of `/:id` so the literal segment wins.
pub async fn total_sales(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.sales_count() {
        Ok(total) => (StatusCode::OK, Json(serde_json::json!({ "total": total }))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_sale(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<dto::UpdateSaleRequest>,
) -> axum::response::Response {
    let id: SaleId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid sale id"),
    };
    let new = NewSale {
        client_id: body.client_id,
        total_value: body.total_value,
    };
    match services.sales_update(id, new) {
        Ok(sale) => (StatusCode::OK, Json(dto::sale_to_json(sale))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_sale(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: SaleId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid sale id"),
    };
    match services.sales_delete(id) {
        Ok(sale) => (StatusCode::OK, Json(dto::sale_to_json(sale))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn sandals_for_sale(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: SaleId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid sale id"),
    };
    let items = match services.sales_sandals(id) {
        // Deleted sandals stay in place as nulls so positions line up.
        Ok(sandals) => sandals
            .into_iter()
            .map(|s| s.map(dto::sandal_to_json))
            .collect::<Vec<_>>(),
        Err(e) => return errors::domain_error_to_response(e),
    };
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn attach_sandal(
    Extension(services): Extension<Arc<AppServices>>,
    Path((sale_id, sandal_id, client_id)): Path<(String, String, String)>,
    ApiQuery(query): ApiQuery<dto::AttachQuery>,
) -> axum::response::Response {
    let sale_id: SaleId = match sale_id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid sale id"),
    };
    let sandal_id: SandalId = match sandal_id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid sandal id"),
    };
    let client_id: ClientId = match client_id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid client id"),
    };
    match services.sales_attach(sale_id, sandal_id, client_id, query.quantity) {
        Ok(item) => (StatusCode::CREATED, Json(dto::line_item_to_json(item))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
