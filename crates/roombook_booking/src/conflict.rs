// --- File: crates/roombook_booking/src/conflict.rs ---
//! Interval overlap evaluation.
//!
//! Intervals are half-open, `[start, end)`: a booking ending at 11:00 and
//! another starting at 11:00 do not conflict. Callers must reject
//! `start >= end` before asking.

use chrono::{DateTime, Utc};
use roombook_common::models::Booking;
use roombook_common::RoombookError;
use roombook_db::BookingRepository;

/// Strict overlap of `[a_start, a_end)` and `[b_start, b_end)`.
#[inline]
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// First confirmed booking in `existing` that overlaps `[start, end)`,
/// skipping the booking `exclude`.
pub fn find_conflict<'a>(
    existing: &'a [Booking],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    exclude: Option<&str>,
) -> Option<&'a Booking> {
    existing.iter().find(|booking| {
        booking.is_confirmed()
            && exclude != Some(booking.id.as_str())
            && overlaps(start, end, booking.start_time, booking.end_time)
    })
}

/// The confirmed booking on `room_id` that `[start, end)` would collide
/// with, if any. Read-only.
pub async fn conflicting_booking<B>(
    bookings: &B,
    room_id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    exclude: Option<&str>,
) -> Result<Option<Booking>, RoombookError>
where
    B: BookingRepository + Sync,
{
    let existing = bookings.list_confirmed_for_room(room_id, exclude).await?;
    Ok(find_conflict(&existing, start, end, exclude).cloned())
}

/// Whether `[start, end)` conflicts with a confirmed booking on `room_id`.
pub async fn conflicts<B>(
    bookings: &B,
    room_id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    exclude: Option<&str>,
) -> Result<bool, RoombookError>
where
    B: BookingRepository + Sync,
{
    Ok(conflicting_booking(bookings, room_id, start, end, exclude)
        .await?
        .is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use roombook_common::models::BookingStatus;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 5, hour, minute, 0).unwrap()
    }

    fn booking(id: &str, start: DateTime<Utc>, end: DateTime<Utc>, status: BookingStatus) -> Booking {
        Booking {
            id: id.to_string(),
            room_id: "room".to_string(),
            user_id: "user".to_string(),
            start_time: start,
            end_time: end,
            status,
            title: None,
            description: None,
            created_at: None,
        }
    }

    #[test]
    fn test_touching_intervals_do_not_overlap() {
        assert!(!overlaps(at(10, 0), at(11, 0), at(11, 0), at(12, 0)));
        assert!(!overlaps(at(11, 0), at(12, 0), at(10, 0), at(11, 0)));
    }

    #[test]
    fn test_partial_and_contained_overlaps() {
        assert!(overlaps(at(10, 0), at(11, 0), at(10, 30), at(11, 30)));
        assert!(overlaps(at(10, 0), at(12, 0), at(10, 30), at(11, 0)));
        assert!(overlaps(at(10, 30), at(11, 0), at(10, 0), at(12, 0)));
        assert!(overlaps(at(10, 0), at(11, 0), at(10, 0), at(11, 0)));
    }

    #[test]
    fn test_find_conflict_skips_cancelled_and_excluded() {
        let existing = vec![
            booking("a", at(10, 0), at(11, 0), BookingStatus::Cancelled),
            booking("b", at(12, 0), at(13, 0), BookingStatus::Confirmed),
        ];

        assert!(find_conflict(&existing, at(10, 0), at(11, 0), None).is_none());
        assert_eq!(
            find_conflict(&existing, at(12, 30), at(14, 0), None).map(|b| b.id.as_str()),
            Some("b")
        );
        assert!(find_conflict(&existing, at(12, 30), at(14, 0), Some("b")).is_none());
        assert!(find_conflict(&existing, at(11, 0), at(12, 0), None).is_none());
    }
}
