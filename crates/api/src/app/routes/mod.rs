use axum::Router;

pub mod clients;
pub mod export;
pub mod sales;
pub mod sandals;
pub mod system;

/// Router for all service-backed endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/clients", clients::router())
        .nest("/sandals", sandals::router())
        .nest("/sales", sales::router())
        .nest("/export", export::router())
}
