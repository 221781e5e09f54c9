//! Repository for bookings
//!
//! Every query that reads intervals for conflict purposes looks at confirmed
//! bookings only. Intervals are half-open: `[start_time, end_time)`.

use crate::error::DbError;
use chrono::{DateTime, Utc};

pub use roombook_common::models::{Booking, BookingFilter, BookingStatus, NewBooking};

/// Repository for bookings
pub trait BookingRepository {
    /// Create the `bookings` table and its indexes if they do not exist yet.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Find a booking by id, whatever its status.
    fn find_by_id(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Booking>, DbError>> + Send;

    /// All confirmed bookings on the room, ordered by start, ignoring the
    /// booking `exclude` when given.
    fn list_confirmed_for_room(
        &self,
        room_id: &str,
        exclude: Option<&str>,
    ) -> impl std::future::Future<Output = Result<Vec<Booking>, DbError>> + Send;

    /// Insert a confirmed booking unless its interval overlaps a confirmed
    /// booking on the same room. Returns `false` when nothing was written.
    fn insert_if_free(
        &self,
        booking: &NewBooking,
    ) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;

    /// Move a confirmed booking to `[start, end)` unless that overlaps another
    /// confirmed booking on its room. Returns `false` when nothing was written.
    fn reschedule_if_free(
        &self,
        id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;

    /// Flip a confirmed booking to cancelled. Returns `false` when the
    /// booking is absent or already cancelled.
    fn cancel(&self, id: &str) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;

    /// Confirmed bookings on the room intersecting `[from, to)`, ordered by start.
    fn list_for_window(
        &self,
        room_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Vec<Booking>, DbError>> + Send;

    /// Confirmed bookings owned by the user, ordered by start.
    fn list_for_owner(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Booking>, DbError>> + Send;

    /// Confirmed bookings matching the filter, ordered by start.
    fn list_filtered(
        &self,
        filter: &BookingFilter,
    ) -> impl std::future::Future<Output = Result<Vec<Booking>, DbError>> + Send;
}
