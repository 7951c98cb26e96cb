// Thin namespace wrapper for API-layer components
use crate::handlers::{self as h, AppState};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod handlers {
    pub use crate::handlers::*;
}

/// Builds the full router: lookup, health check and the catch-all 404.
///
/// Non-GET methods on known paths fall through to the same 404 payload.
/// A trailing slash after the DNI is accepted, as Express routing does.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(h::health).fallback(h::route_not_found))
        .route(
            "/api/sir/:dni",
            get(h::lookup_dni).fallback(h::route_not_found),
        )
        .route(
            "/api/sir/:dni/",
            get(h::lookup_dni).fallback(h::route_not_found),
        )
        .route("/api/sir", get(h::missing_dni).fallback(h::route_not_found))
        .route("/api/sir/", get(h::missing_dni).fallback(h::route_not_found))
        .fallback(h::route_not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
