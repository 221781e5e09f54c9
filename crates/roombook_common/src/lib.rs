// --- File: crates/roombook_common/src/lib.rs ---

pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Shared domain types
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{
    auth_error, conflict, forbidden, internal_error, not_found, validation_error, Context,
    HttpStatusCode, RoombookError,
};

// Re-export HTTP utilities for easier access
pub use http::{json_body, query_params, IntoHttpResponse};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, log_error, log_result};

pub use services::{BoxFuture, IdentityProvider, ServiceFactory};
