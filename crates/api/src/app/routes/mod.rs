use axum::{routing::get, Router};

pub mod menu;
pub mod orders;
pub mod stream;
pub mod system;

/// Router for the whole API surface.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .nest("/api/menu", menu::router())
        .nest("/api/orders", orders::router())
        .route("/api/stream", get(stream::stream_orders))
}
