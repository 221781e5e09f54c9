//! Repository modules for database access
//!
//! Each entity has a trait describing what the services need and a SQL
//! implementation over the shared `DbClient`.

pub mod account;
pub mod account_sql;
pub mod booking;
pub mod booking_sql;
pub mod factory;
pub mod room;
pub mod room_sql;
mod rows;

pub use account::{AccountRepository, StoredCredentials};
pub use account_sql::SqlAccountRepository;
pub use booking::BookingRepository;
pub use booking_sql::SqlBookingRepository;
pub use factory::SqlRepositoryFactory;
pub use room::RoomRepository;
pub use room_sql::SqlRoomRepository;
