// --- File: crates/services/roombook_backend/src/lib.rs ---
use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod app_state;
pub mod doc;
pub mod service_factory;

pub use app_state::AppState;

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Liveness plus a round trip to the database.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    ),
    tag = "Health"
))]
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    if state.db.is_healthy().await {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                message: "Room booking API is running".to_string(),
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unavailable".to_string(),
                message: "Database unreachable".to_string(),
            }),
        )
    }
}

/// The whole HTTP surface, every route under `/api`.
pub fn build_router(state: &AppState) -> Router {
    let api_router = Router::new()
        .route("/health", get(health_handler))
        .with_state(state.clone())
        .merge(roombook_auth::routes(state.auth_state()))
        .merge(roombook_booking::routes(state.booking_state()));

    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut app = Router::new().nest("/api", api_router);

    #[cfg(feature = "openapi")]
    {
        tracing::info!("Adding Swagger UI at /api/docs");
        app = app.merge(doc::swagger_ui());
    }

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
