// --- File: crates/roombook_auth/src/lib.rs ---
pub mod doc;
/// Bearer-token extractor for handlers that need a caller.
pub mod extractor;
pub mod handlers;
pub mod password;
/// Identity provider over the local account tables.
pub mod provider;
#[cfg(test)]
mod provider_test;
pub mod routes;
pub mod token;

pub use extractor::AuthenticatedUser;
pub use handlers::AuthState;
pub use provider::LocalIdentityProvider;
pub use routes::routes;
pub use token::TokenIssuer;
