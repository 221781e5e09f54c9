//! Persistence for the room booking service
//!
//! A database client over a sqlx `Any` pool plus one repository per entity:
//! rooms, bookings and user accounts. SQLite is the default backend.
//!
//! # Example
//!
//! ```rust,no_run
//! use roombook_db::{BookingRepository, DbClient, SqlBookingRepository};
//!
//! async fn setup() -> Result<(), roombook_db::DbError> {
//!     let client = DbClient::from_url("sqlite::memory:").await?;
//!     let bookings = SqlBookingRepository::new(client);
//!     bookings.init_schema().await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod factory;
pub mod repositories;
pub mod repository;

pub use client::DbClient;
pub use error::DbError;
pub use factory::DbClientFactory;
pub use repository::RepositoryFactory;

pub use repositories::{
    AccountRepository, BookingRepository, RoomRepository, SqlAccountRepository,
    SqlBookingRepository, SqlRepositoryFactory, SqlRoomRepository, StoredCredentials,
};
