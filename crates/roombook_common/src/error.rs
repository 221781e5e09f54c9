// --- File: crates/roombook_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The error type shared by every room booking crate.
///
/// Each variant corresponds to one outcome a caller can act on. Crates with
/// their own error types convert into this one at their boundary.
#[derive(Error, Debug)]
pub enum RoombookError {
    /// Malformed or missing input, inverted interval
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Input that could not be parsed (dates, ids, JSON)
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Missing, invalid or expired credential
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Authenticated, but not allowed to touch the resource
    #[error("Forbidden: {0}")]
    ForbiddenError(String),

    /// Room or booking absent
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Candidate interval overlaps a confirmed booking
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The data store failed
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Anything else that went wrong on our side
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for RoombookError {
    fn status_code(&self) -> u16 {
        match self {
            RoombookError::ValidationError(_) => 400,
            RoombookError::ParseError(_) => 400,
            RoombookError::AuthError(_) => 401,
            RoombookError::ForbiddenError(_) => 403,
            RoombookError::NotFoundError(_) => 404,
            RoombookError::ConflictError(_) => 409,
            RoombookError::ConfigError(_) => 500,
            RoombookError::DatabaseError(_) => 500,
            RoombookError::InternalError(_) => 500,
        }
    }
}

impl RoombookError {
    /// The message shown to API clients.
    ///
    /// Server-side failures are reduced to a generic sentence; the detail
    /// only goes to the log.
    pub fn public_message(&self) -> String {
        match self {
            RoombookError::ValidationError(msg)
            | RoombookError::ParseError(msg)
            | RoombookError::AuthError(msg)
            | RoombookError::ForbiddenError(msg)
            | RoombookError::NotFoundError(msg)
            | RoombookError::ConflictError(msg) => msg.clone(),
            RoombookError::ConfigError(_)
            | RoombookError::DatabaseError(_)
            | RoombookError::InternalError(_) => "Internal server error".to_string(),
        }
    }
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, RoombookError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, RoombookError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, RoombookError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| RoombookError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, RoombookError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| RoombookError::InternalError(format!("{}: {}", f(), error)))
    }
}

impl From<serde_json::Error> for RoombookError {
    fn from(err: serde_json::Error) -> Self {
        RoombookError::ParseError(err.to_string())
    }
}

// Utility functions for error handling
pub fn validation_error<T: fmt::Display>(message: T) -> RoombookError {
    RoombookError::ValidationError(message.to_string())
}

pub fn auth_error<T: fmt::Display>(message: T) -> RoombookError {
    RoombookError::AuthError(message.to_string())
}

pub fn forbidden<T: fmt::Display>(message: T) -> RoombookError {
    RoombookError::ForbiddenError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> RoombookError {
    RoombookError::NotFoundError(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> RoombookError {
    RoombookError::ConflictError(message.to_string())
}

pub fn internal_error<T: fmt::Display>(message: T) -> RoombookError {
    RoombookError::InternalError(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_taxonomy() {
        assert_eq!(validation_error("x").status_code(), 400);
        assert_eq!(auth_error("x").status_code(), 401);
        assert_eq!(forbidden("x").status_code(), 403);
        assert_eq!(not_found("x").status_code(), 404);
        assert_eq!(conflict("x").status_code(), 409);
        assert_eq!(internal_error("x").status_code(), 500);
        assert_eq!(RoombookError::DatabaseError("x".into()).status_code(), 500);
    }

    #[test]
    fn test_internal_details_are_not_public() {
        let err = RoombookError::DatabaseError("no such table: bookings".into());
        assert_eq!(err.public_message(), "Internal server error");

        let err = conflict("This time slot is already booked for this room");
        assert_eq!(
            err.public_message(),
            "This time slot is already booked for this room"
        );
    }

    #[test]
    fn test_context_wraps_as_internal() {
        let res: Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        let err = res.context("writing booking").unwrap_err();
        assert!(matches!(err, RoombookError::InternalError(ref m) if m == "writing booking: disk full"));
    }
}
