use axum::Router;
use tower_http::cors::CorsLayer;

pub mod entity;
pub mod error;
pub mod routes;
pub mod schema;
pub mod state;

pub use axum;
pub use sea_orm;

use state::AppState;

/// Builds the full HTTP surface: the sales operations plus health
/// probes. CORS stays permissive because the dashboard UI is served
/// from a different origin.
pub fn construct_router(state: AppState) -> Router {
    Router::new()
        .nest("/health", routes::health::routes())
        .nest("/sales", routes::sales::routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
}
