use shopflow_api::config::Config;

#[tokio::main]
async fn main() {
    shopflow_observability::init();

    let config = Config::load();
    let app = shopflow_api::app::build_app(&config);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .expect("failed to bind configured port");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
