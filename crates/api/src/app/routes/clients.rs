use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use sandalia_clients::NewClient;
use sandalia_core::ClientId;

use crate::app::extract::ApiJson;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_client).get(list_clients))
        .route("/:id", get(get_client).put(update_client).delete(delete_client))
}

pub async fn create_client(
    Extension(services): Extension<Arc<AppServices>>,
    ApiJson(body): ApiJson<dto::ClientRequest>,
) -> axum::response::Response {
    let new = NewClient {
        name: body.name,
        phone: body.phone,
        address: body.address,
    };
    match services.clients_create(new) {
        Ok(client) => (StatusCode::CREATED, Json(dto::client_to_json(client))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_client(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ClientId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid client id"),
    };
    match services.clients_get(id) {
        Ok(client) => (StatusCode::OK, Json(dto::client_to_json(client))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_clients(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = match services.clients_list() {
        Ok(clients) => clients.into_iter().map(dto::client_to_json).collect::<Vec<_>>(),
        Err(e) => return errors::domain_error_to_response(e),
    };
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn update_client(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<dto::ClientRequest>,
) -> axum::response::Response {
    let id: ClientId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid client id"),
    };
    let new = NewClient {
        name: body.name,
        phone: body.phone,
        address: body.address,
    };
    match services.clients_update(id, new) {
        Ok(client) => (StatusCode::OK, Json(dto::client_to_json(client))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_client(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ClientId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid client id"),
    };
    match services.clients_delete(id) {
        Ok(client) => (StatusCode::OK, Json(dto::client_to_json(client))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
