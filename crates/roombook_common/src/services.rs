// --- File: crates/roombook_common/src/services.rs ---
//! Service abstractions shared across crates.
//!
//! The booking crate needs to know who is calling without depending on how
//! credentials are issued. These traits decouple the two so either side can be
//! replaced in tests.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::RoombookError;
use crate::models::{AuthSession, AuthUser, UserProfile};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Issues and verifies bearer credentials.
///
/// Every failure to prove an identity surfaces as `RoombookError::AuthError`.
pub trait IdentityProvider: Send + Sync {
    /// Create an account and sign it in.
    fn register<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
        full_name: Option<&'a str>,
    ) -> BoxFuture<'a, AuthSession, RoombookError>;

    /// Exchange an email and password for a credential.
    fn login<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
    ) -> BoxFuture<'a, AuthSession, RoombookError>;

    /// Resolve a bearer token to the user it was issued to.
    fn authenticate<'a>(&'a self, token: &'a str) -> BoxFuture<'a, AuthUser, RoombookError>;

    /// Load the public profile of a user.
    fn profile<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, UserProfile, RoombookError>;

    /// Revoke the credential the user authenticated with.
    fn logout<'a>(&'a self, user: &'a AuthUser) -> BoxFuture<'a, (), RoombookError>;
}

/// A factory for the services the HTTP layer is built from.
pub trait ServiceFactory: Send + Sync {
    /// Get the identity provider instance.
    fn identity_provider(&self) -> Arc<dyn IdentityProvider>;
}
