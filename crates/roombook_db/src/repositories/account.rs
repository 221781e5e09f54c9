//! Repository for user accounts
//!
//! Backs the local identity provider: public profiles, password credentials
//! and the list of revoked bearer tokens.

use crate::error::DbError;
use chrono::{DateTime, Utc};

pub use roombook_common::models::UserProfile;

/// A profile together with its stored password hash.
#[derive(Debug, Clone)]
pub struct StoredCredentials {
    pub profile: UserProfile,
    pub password_hash: String,
    pub password_salt: String,
}

/// Repository for user accounts
pub trait AccountRepository {
    /// Create the `profiles`, `credentials` and `revoked_tokens` tables.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Store a new profile and its credentials atomically.
    ///
    /// Returns `false`, writing nothing, when the email is already taken.
    fn create_account(
        &self,
        credentials: &StoredCredentials,
    ) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;

    fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<StoredCredentials>, DbError>> + Send;

    fn find_profile(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<UserProfile>, DbError>> + Send;

    /// Record a token id as revoked until `expires_at`. Revoking twice is a no-op.
    fn revoke_token(
        &self,
        jti: &str,
        expires_at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    fn is_token_revoked(
        &self,
        jti: &str,
    ) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;
}
