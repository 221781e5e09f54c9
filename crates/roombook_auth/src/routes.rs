// --- File: crates/roombook_auth/src/routes.rs ---
use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{login_handler, logout_handler, profile_handler, register_handler, AuthState};

/// Creates a router containing the `/auth/*` routes.
pub fn routes(state: AuthState) -> Router {
    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
        .route("/auth/logout", post(logout_handler))
        .route("/auth/profile", get(profile_handler))
        .with_state(state)
}
