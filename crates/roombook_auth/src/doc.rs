// --- File: crates/roombook_auth/src/doc.rs ---

// Only compile this module if the 'openapi' feature is enabled
#![cfg(feature = "openapi")]

use utoipa::OpenApi;

use crate::handlers::{
    AuthResponse, LoginRequest, MessageResponse, ProfileResponse, RegisterRequest,
};
use roombook_common::models::UserProfile;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::register_handler,
        crate::handlers::login_handler,
        crate::handlers::logout_handler,
        crate::handlers::profile_handler,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        AuthResponse,
        ProfileResponse,
        MessageResponse,
        UserProfile
    )),
    tags((name = "Auth", description = "Registration, login and bearer tokens"))
)]
pub struct AuthApiDoc;
