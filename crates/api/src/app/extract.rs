//! Extractors that turn malformed payloads into the error shape of this API
//! instead of axum's plain-text defaults.

use axum::{
    async_trait,
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::app::errors;

/// JSON body extractor. Shape or type mismatches come back as 422 with a
/// per-error list.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = axum::response::Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(payload_rejection(rejection)),
        }
    }
}

/// Query string extractor with the same 422 reporting as [`ApiJson`].
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = axum::response::Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(validation_failed(rejection.body_text())),
        }
    }
}

fn payload_rejection(rejection: JsonRejection) -> axum::response::Response {
    match rejection {
        JsonRejection::JsonDataError(e) => validation_failed(e.body_text()),
        JsonRejection::JsonSyntaxError(e) => validation_failed(e.body_text()),
        other => errors::json_error(StatusCode::BAD_REQUEST, "bad_request", other.body_text()),
    }
}

fn validation_failed(detail: String) -> axum::response::Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
            "error": "validation_failed",
            "message": "request payload failed validation",
            "errors": [detail],
        })),
    )
        .into_response()
}
