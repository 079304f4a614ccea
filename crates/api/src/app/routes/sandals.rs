use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use sandalia_catalog::NewSandal;
use sandalia_core::SandalId;

use crate::app::extract::ApiJson;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_sandal).get(list_sandals))
        .route("/:id", get(get_sandal).put(update_sandal).delete(delete_sandal))
}

pub async fn create_sandal(
    Extension(services): Extension<Arc<AppServices>>,
    ApiJson(body): ApiJson<dto::SandalRequest>,
) -> axum::response::Response {
    match services.sandals_create(request_to_new(body)) {
        Ok(sandal) => (StatusCode::CREATED, Json(dto::sandal_to_json(sandal))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_sandal(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: SandalId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid sandal id"),
    };
    match services.sandals_get(id) {
        Ok(sandal) => (StatusCode::OK, Json(dto::sandal_to_json(sandal))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_sandals(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = match services.sandals_list() {
        Ok(sandals) => sandals.into_iter().map(dto::sandal_to_json).collect::<Vec<_>>(),
        Err(e) => return errors::domain_error_to_response(e),
    };
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn update_sandal(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<dto::SandalRequest>,
) -> axum::response::Response {
    let id: SandalId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid sandal id"),
    };
    match services.sandals_update(id, request_to_new(body)) {
        Ok(sandal) => (StatusCode::OK, Json(dto::sandal_to_json(sandal))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_sandal(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: SandalId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid sandal id"),
    };
    match services.sandals_delete(id) {
        Ok(sandal) => (StatusCode::OK, Json(dto::sandal_to_json(sandal))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

fn request_to_new(body: dto::SandalRequest) -> NewSandal {
    NewSandal {
        code: body.code,
        name: body.name,
        price: body.price,
        color: body.color,
        size: body.size,
        quantity: body.quantity,
    }
}
