// --- File: crates/roombook_auth/src/handlers.rs ---
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, FromRef, State},
    http::StatusCode,
    response::Json,
};
use roombook_common::models::UserProfile;
use roombook_common::{json_body, IdentityProvider, RoombookError};
use serde::{Deserialize, Serialize};

use crate::extractor::AuthenticatedUser;

/// Shared state for the authentication routes.
#[derive(Clone)]
pub struct AuthState {
    pub identity: Arc<dyn IdentityProvider>,
}

impl FromRef<AuthState> for Arc<dyn IdentityProvider> {
    fn from_ref(state: &AuthState) -> Self {
        state.identity.clone()
    }
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, rename = "fullName", alias = "full_name")]
    pub full_name: Option<String>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AuthResponse {
    pub message: String,
    pub user: UserProfile,
    pub token: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProfileResponse {
    pub user: UserProfile,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MessageResponse {
    pub message: String,
}

/// Create an account and return a bearer token for it.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 400, description = "Missing fields, weak password or email already registered")
    ),
    tag = "Auth"
))]
pub async fn register_handler(
    State(state): State<AuthState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), RoombookError> {
    let request = json_body(payload)?;
    let session = state
        .identity
        .register(&request.email, &request.password, request.full_name.as_deref())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully".to_string(),
            user: session.user,
            token: session.token,
        }),
    ))
}

/// Exchange an email and password for a bearer token.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Missing fields"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
))]
pub async fn login_handler(
    State(state): State<AuthState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, RoombookError> {
    let request = json_body(payload)?;
    let session = state.identity.login(&request.email, &request.password).await?;

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        user: session.user,
        token: session.token,
    }))
}

/// Revoke the bearer token used for this request.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Logout successful", body = MessageResponse),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer" = [])),
    tag = "Auth"
))]
pub async fn logout_handler(
    State(state): State<AuthState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<MessageResponse>, RoombookError> {
    state.identity.logout(&user).await?;
    Ok(Json(MessageResponse {
        message: "Logout successful".to_string(),
    }))
}

/// The profile of the authenticated caller.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/auth/profile",
    responses(
        (status = 200, description = "Current user", body = ProfileResponse),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer" = [])),
    tag = "Auth"
))]
pub async fn profile_handler(
    State(state): State<AuthState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<ProfileResponse>, RoombookError> {
    let profile = state.identity.profile(&user.id).await?;
    Ok(Json(ProfileResponse { user: profile }))
}
