#[tokio::main]
async fn main() {
    sandalia_observability::init();

    let addr = std::env::var("SANDALIA_ADDR").unwrap_or_else(|_| {
        tracing::warn!("SANDALIA_ADDR not set; defaulting to 0.0.0.0:8080");
        "0.0.0.0:8080".to_string()
    });
    let export_dir = std::env::var("SANDALIA_EXPORT_DIR").unwrap_or_else(|_| {
        tracing::warn!("SANDALIA_EXPORT_DIR not set; defaulting to ./export");
        "./export".to_string()
    });

    let app = sandalia_api::app::build_app(export_dir);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listen address");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
