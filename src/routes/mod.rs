//! Router de la API
//!
//! Todas las rutas salvo `/health` y `/auth/login` pasan por el middleware JWT.

pub mod auth_routes;
pub mod booking_routes;
pub mod inspection_routes;
pub mod media_routes;
pub mod user_routes;
pub mod vehicle_routes;

use axum::{middleware, response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::{auth::auth_middleware, cors::cors_layer};
use crate::state::AppState;

/// Construir la aplicación completa con sus capas
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(auth_routes::session_routes())
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/bookings", booking_routes::create_booking_router())
        .nest("/inspections", inspection_routes::create_inspection_router())
        .nest("/media", media_routes::create_media_router())
        .nest("/users", user_routes::create_user_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/health", get(health))
        .merge(auth_routes::auth_routes())
        .merge(protected)
        .layer(CompressionLayer::new())
        .layer(cors_layer(&state.config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
