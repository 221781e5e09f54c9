// --- File: crates/roombook_auth/src/provider.rs ---
//! Identity provider backed by the local account tables.

use chrono::Duration;
use roombook_common::models::{AuthSession, AuthUser, UserProfile};
use roombook_common::{auth_error, not_found, validation_error, BoxFuture, IdentityProvider, RoombookError};
use roombook_config::AuthConfig;
use roombook_db::{AccountRepository, StoredCredentials};
use tracing::{info, warn};

use crate::password::{hash_password, new_salt, verify_password};
use crate::token::TokenIssuer;

/// Registers users, checks passwords and issues bearer tokens.
#[derive(Debug, Clone)]
pub struct LocalIdentityProvider<A> {
    accounts: A,
    tokens: TokenIssuer,
    min_password_length: usize,
}

impl<A> LocalIdentityProvider<A>
where
    A: AccountRepository + Send + Sync + 'static,
{
    pub fn new(accounts: A, tokens: TokenIssuer, min_password_length: usize) -> Self {
        Self {
            accounts,
            tokens,
            min_password_length,
        }
    }

    pub fn from_config(accounts: A, config: &AuthConfig) -> Self {
        let tokens = TokenIssuer::new(
            &config.jwt_secret,
            Duration::hours(config.token_ttl_hours()),
        );
        Self::new(accounts, tokens, config.min_password_length())
    }

    fn session(&self, user: UserProfile) -> Result<AuthSession, RoombookError> {
        let (token, _) = self.tokens.issue(&user.id, &user.email)?;
        Ok(AuthSession { user, token })
    }

    async fn register_account(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<AuthSession, RoombookError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(validation_error("Email and password are required"));
        }
        if !email.contains('@') {
            return Err(validation_error("Invalid email address"));
        }
        if password.chars().count() < self.min_password_length {
            return Err(validation_error(format!(
                "Password must be at least {} characters",
                self.min_password_length
            )));
        }

        let salt = new_salt();
        let credentials = StoredCredentials {
            profile: UserProfile {
                id: uuid::Uuid::new_v4().to_string(),
                email,
                full_name: full_name
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string),
            },
            password_hash: hash_password(password, &salt)?,
            password_salt: salt,
        };

        if !self.accounts.create_account(&credentials).await? {
            return Err(validation_error("User already registered"));
        }

        info!(user_id = %credentials.profile.id, "User registered");
        self.session(credentials.profile)
    }

    async fn login_account(&self, email: &str, password: &str) -> Result<AuthSession, RoombookError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(validation_error("Email and password are required"));
        }

        let stored = self.accounts.find_credentials_by_email(&email).await?;
        let Some(stored) = stored else {
            warn!("Login attempt for unknown email");
            return Err(auth_error("Invalid credentials"));
        };
        if !verify_password(password, &stored.password_salt, &stored.password_hash) {
            warn!(user_id = %stored.profile.id, "Login attempt with wrong password");
            return Err(auth_error("Invalid credentials"));
        }

        self.session(stored.profile)
    }

    async fn authenticate_token(&self, token: &str) -> Result<AuthUser, RoombookError> {
        let claims = self.tokens.verify(token)?;
        if self.accounts.is_token_revoked(&claims.jti).await? {
            return Err(auth_error("Invalid or expired token"));
        }

        Ok(AuthUser {
            token_expires_at: claims.expires_at(),
            id: claims.sub,
            email: claims.email,
            token_id: claims.jti,
        })
    }

    async fn load_profile(&self, user_id: &str) -> Result<UserProfile, RoombookError> {
        self.accounts
            .find_profile(user_id)
            .await?
            .ok_or_else(|| not_found("User not found"))
    }

    async fn revoke(&self, user: &AuthUser) -> Result<(), RoombookError> {
        self.accounts
            .revoke_token(&user.token_id, user.token_expires_at)
            .await?;
        info!(user_id = %user.id, "User logged out");
        Ok(())
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl<A> IdentityProvider for LocalIdentityProvider<A>
where
    A: AccountRepository + Send + Sync + 'static,
{
    fn register<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
        full_name: Option<&'a str>,
    ) -> BoxFuture<'a, AuthSession, RoombookError> {
        Box::pin(self.register_account(email, password, full_name))
    }

    fn login<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
    ) -> BoxFuture<'a, AuthSession, RoombookError> {
        Box::pin(self.login_account(email, password))
    }

    fn authenticate<'a>(&'a self, token: &'a str) -> BoxFuture<'a, AuthUser, RoombookError> {
        Box::pin(self.authenticate_token(token))
    }

    fn profile<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, UserProfile, RoombookError> {
        Box::pin(self.load_profile(user_id))
    }

    fn logout<'a>(&'a self, user: &'a AuthUser) -> BoxFuture<'a, (), RoombookError> {
        Box::pin(self.revoke(user))
    }
}
