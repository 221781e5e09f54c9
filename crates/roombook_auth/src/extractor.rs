// --- File: crates/roombook_auth/src/extractor.rs ---
use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use roombook_common::models::AuthUser;
use roombook_common::{auth_error, IdentityProvider, RoombookError};

/// The caller proven by an `Authorization: Bearer <token>` header.
///
/// Any handler taking this extractor answers 401 when the header is missing,
/// malformed, expired or revoked.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub AuthUser);

/// Extract the token from an `Authorization` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("Bearer") && !token.is_empty()).then_some(token)
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<dyn IdentityProvider>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = RoombookError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| auth_error("Access token required"))?
            .to_str()
            .map_err(|_| auth_error("Invalid authorization header"))?;

        let token = bearer_token(header).ok_or_else(|| auth_error("Invalid authorization header"))?;

        let identity = Arc::<dyn IdentityProvider>::from_ref(state);
        let user = identity.authenticate(token).await?;
        Ok(Self(user))
    }
}
