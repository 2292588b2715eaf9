use std::sync::Arc;

use tuckshop_api::app::services::AppServices;
use tuckshop_api::config::AppConfig;

#[tokio::main]
async fn main() {
    tuckshop_observability::init();

    let config = AppConfig::from_env();

    let services = match AppServices::connect(&config).await {
        Ok(services) => services,
        Err(e) => {
            tracing::error!("failed to open store at {}: {e}", config.database_url);
            std::process::exit(1);
        }
    };

    if config.seed_demo_menu {
        if let Err(e) = services.db().seed_if_empty().await {
            tracing::warn!("demo menu seed failed: {e}");
        }
    }

    let app = tuckshop_api::app::build_app(Arc::new(services));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("failed to bind listen address");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
