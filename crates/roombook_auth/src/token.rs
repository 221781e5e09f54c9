// --- File: crates/roombook_auth/src/token.rs ---
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use roombook_common::{auth_error, internal_error, RoombookError};

/// Claims carried by a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub email: String,
    /// Issued at, Unix seconds
    pub iat: i64,
    /// Expiration, Unix seconds
    pub exp: i64,
    /// Unique token id, recorded on logout
    pub jti: String,
}

impl Claims {
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}

/// Signs and verifies HS256 bearer tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer").field("ttl", &self.ttl).finish()
    }
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for the user, valid from `now` for the configured lifetime.
    pub fn issue_at(
        &self,
        user_id: &str,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<(String, Claims), RoombookError> {
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| internal_error(format!("Error generating token: {}", e)))?;
        Ok((token, claims))
    }

    pub fn issue(&self, user_id: &str, email: &str) -> Result<(String, Claims), RoombookError> {
        self.issue_at(user_id, email, Utc::now())
    }

    /// Verify signature and expiry. Any failure is an `AuthError`.
    pub fn verify(&self, token: &str) -> Result<Claims, RoombookError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Rejected bearer token: {}", e);
                auth_error("Invalid or expired token")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roombook_common::HttpStatusCode;

    #[test]
    fn test_issue_then_verify() {
        let issuer = TokenIssuer::new("test-secret", Duration::hours(1));
        let (token, issued) = issuer.issue("user-1", "ana@example.com").unwrap();

        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims, issued);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let issuer = TokenIssuer::new("test-secret", Duration::hours(1));
        let (token, _) = issuer
            .issue_at("user-1", "ana@example.com", Utc::now() - Duration::hours(2))
            .unwrap();

        let err = issuer.verify(&token).unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let issuer = TokenIssuer::new("test-secret", Duration::hours(1));
        let other = TokenIssuer::new("other-secret", Duration::hours(1));
        let (token, _) = other.issue("user-1", "ana@example.com").unwrap();

        assert!(issuer.verify(&token).is_err());
        assert!(issuer.verify("not-a-jwt").is_err());
    }

    #[test]
    fn test_each_token_has_its_own_id() {
        let issuer = TokenIssuer::new("test-secret", Duration::hours(1));
        let (_, a) = issuer.issue("user-1", "ana@example.com").unwrap();
        let (_, b) = issuer.issue("user-1", "ana@example.com").unwrap();
        assert_ne!(a.jti, b.jti);
    }
}
