use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/bundle", post(write_bundle))
        .route("/checksum", post(checksum))
}

pub async fn write_bundle(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.export_bundle().await {
        Ok(info) => (StatusCode::OK, Json(dto::bundle_to_json(info))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn checksum(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.export_checksum().await {
        Ok(info) => (StatusCode::OK, Json(dto::checksum_to_json(info))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
