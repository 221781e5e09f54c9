//! SQL implementation of the account repository

use crate::error::DbError;
use crate::repositories::account::{AccountRepository, StoredCredentials, UserProfile};
use crate::repositories::rows::{optional_text, query_error, to_text};
use crate::DbClient;
use chrono::{DateTime, Utc};
use sqlx::Row;
use tracing::{debug, info};

/// SQL implementation of the account repository
#[derive(Debug, Clone)]
pub struct SqlAccountRepository {
    db_client: DbClient,
}

impl SqlAccountRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

impl AccountRepository for SqlAccountRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing account schema");

        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS profiles (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                full_name TEXT
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS credentials (
                user_id TEXT PRIMARY KEY REFERENCES profiles(id),
                password_hash TEXT NOT NULL,
                password_salt TEXT NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS revoked_tokens (
                jti TEXT PRIMARY KEY,
                expires_at TEXT NOT NULL
            )
            "#,
        ];
        for statement in statements {
            self.db_client.execute(statement).await?;
        }

        info!("Account schema initialized successfully");
        Ok(())
    }

    async fn create_account(&self, credentials: &StoredCredentials) -> Result<bool, DbError> {
        let profile = &credentials.profile;
        let mut tx = self.db_client.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO profiles (id, email, full_name)
            SELECT $1, $2, $3
            WHERE NOT EXISTS (SELECT 1 FROM profiles WHERE email = $2)
            "#,
        )
        .bind(&profile.id)
        .bind(&profile.email)
        .bind(&profile.full_name)
        .execute(&mut *tx)
        .await
        .map_err(query_error("Failed to insert profile"))?
        .rows_affected();

        if inserted == 0 {
            tx.rollback()
                .await
                .map_err(|e| DbError::TransactionError(e.to_string()))?;
            debug!("Email already registered");
            return Ok(false);
        }

        sqlx::query(
            "INSERT INTO credentials (user_id, password_hash, password_salt) VALUES ($1, $2, $3)",
        )
        .bind(&profile.id)
        .bind(&credentials.password_hash)
        .bind(&credentials.password_salt)
        .execute(&mut *tx)
        .await
        .map_err(query_error("Failed to insert credentials"))?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))?;

        info!(user_id = %profile.id, "Account created");
        Ok(true)
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, DbError> {
        let row = sqlx::query(
            r#"
            SELECT p.id, p.email, COALESCE(p.full_name, '') AS full_name,
                   c.password_hash, c.password_salt
            FROM profiles p
            JOIN credentials c ON c.user_id = p.id
            WHERE p.email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.db_client.pool())
        .await
        .map_err(query_error("Failed to find credentials"))?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(StoredCredentials {
            profile: UserProfile {
                id: row.try_get("id")?,
                email: row.try_get("email")?,
                full_name: optional_text(&row, "full_name")?,
            },
            password_hash: row.try_get("password_hash")?,
            password_salt: row.try_get("password_salt")?,
        }))
    }

    async fn find_profile(&self, user_id: &str) -> Result<Option<UserProfile>, DbError> {
        let row = sqlx::query(
            "SELECT id, email, COALESCE(full_name, '') AS full_name FROM profiles WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(self.db_client.pool())
        .await
        .map_err(query_error("Failed to find profile"))?;

        row.map(|row| -> Result<UserProfile, DbError> {
            Ok(UserProfile {
                id: row.try_get("id")?,
                email: row.try_get("email")?,
                full_name: optional_text(&row, "full_name")?,
            })
        })
        .transpose()
    }

    async fn revoke_token(&self, jti: &str, expires_at: DateTime<Utc>) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO revoked_tokens (jti, expires_at)
            SELECT $1, $2
            WHERE NOT EXISTS (SELECT 1 FROM revoked_tokens WHERE jti = $1)
            "#,
        )
        .bind(jti)
        .bind(to_text(expires_at))
        .execute(self.db_client.pool())
        .await
        .map_err(query_error("Failed to revoke token"))?;

        // Expired entries can never match a token that still verifies.
        sqlx::query("DELETE FROM revoked_tokens WHERE expires_at < $1")
            .bind(to_text(Utc::now()))
            .execute(self.db_client.pool())
            .await
            .map_err(query_error("Failed to prune revoked tokens"))?;

        Ok(())
    }

    async fn is_token_revoked(&self, jti: &str) -> Result<bool, DbError> {
        let row = sqlx::query("SELECT COUNT(*) AS revoked FROM revoked_tokens WHERE jti = $1")
            .bind(jti)
            .fetch_one(self.db_client.pool())
            .await
            .map_err(query_error("Failed to check revoked token"))?;

        let revoked: i64 = row.try_get("revoked")?;
        Ok(revoked > 0)
    }
}
