//! Repository for rooms
//!
//! Rooms are read-only for the booking core. The only write is the startup
//! seeding, which is idempotent by room name.

use crate::error::DbError;

pub use roombook_common::models::Room;

/// Repository for rooms
pub trait RoomRepository {
    /// Create the `rooms` table if it does not exist yet.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Rooms with the availability flag set, ordered by name.
    fn list_available(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Room>, DbError>> + Send;

    /// Find a room by id, whatever its availability flag.
    fn find_by_id(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Room>, DbError>> + Send;

    /// Insert the room unless one with the same name already exists.
    ///
    /// Returns `true` when a row was written.
    fn insert_if_missing(
        &self,
        room: &Room,
    ) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;
}
