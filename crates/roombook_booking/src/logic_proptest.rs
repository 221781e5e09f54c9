#[cfg(test)]
mod tests {
    use crate::conflict::{find_conflict, overlaps};
    use crate::logic::{mark_slots, slot_grid, BookingSettings};
    use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
    use proptest::prelude::*;
    use roombook_common::models::{Booking, BookingStatus};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 5, 0, 0, 0).unwrap()
    }

    // Minute offsets from midnight to an interval
    fn interval(start: i64, len: i64) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = base() + Duration::minutes(start);
        (start, start + Duration::minutes(len))
    }

    fn confirmed(id: usize, start: DateTime<Utc>, end: DateTime<Utc>) -> Booking {
        Booking {
            id: format!("b{id}"),
            room_id: "room".to_string(),
            user_id: "user".to_string(),
            start_time: start,
            end_time: end,
            status: BookingStatus::Confirmed,
            title: None,
            description: None,
            created_at: None,
        }
    }

    proptest! {
        #[test]
        fn test_overlap_is_symmetric(
            a_start in 0..1440i64, a_len in 1..240i64,
            b_start in 0..1440i64, b_len in 1..240i64,
        ) {
            let (a0, a1) = interval(a_start, a_len);
            let (b0, b1) = interval(b_start, b_len);
            prop_assert_eq!(overlaps(a0, a1, b0, b1), overlaps(b0, b1, a0, a1));
        }

        #[test]
        fn test_back_to_back_never_overlaps(
            start in 0..1440i64, first_len in 1..240i64, second_len in 1..240i64,
        ) {
            let (a0, a1) = interval(start, first_len);
            let b1 = a1 + Duration::minutes(second_len);
            prop_assert!(!overlaps(a0, a1, a1, b1));
        }

        #[test]
        fn test_an_interval_overlaps_itself(start in 0..1440i64, len in 1..240i64) {
            let (a0, a1) = interval(start, len);
            prop_assert!(overlaps(a0, a1, a0, a1));
        }

        // Accepting only candidates without a conflict keeps the confirmed
        // set pairwise disjoint, whatever order requests arrive in.
        #[test]
        fn test_accepted_bookings_never_overlap(
            requests in prop::collection::vec((0..1440i64, 1..180i64), 1..40),
        ) {
            let mut accepted: Vec<Booking> = Vec::new();
            for (i, (start, len)) in requests.into_iter().enumerate() {
                let (s, e) = interval(start, len);
                if find_conflict(&accepted, s, e, None).is_none() {
                    accepted.push(confirmed(i, s, e));
                }
            }

            for (i, a) in accepted.iter().enumerate() {
                for b in accepted.iter().skip(i + 1) {
                    prop_assert!(!overlaps(a.start_time, a.end_time, b.start_time, b.end_time));
                }
            }
        }

        #[test]
        fn test_excluding_self_never_reports_self(start in 0..1440i64, len in 1..240i64) {
            let (s, e) = interval(start, len);
            let existing = vec![confirmed(0, s, e)];
            prop_assert!(find_conflict(&existing, s, e, Some("b0")).is_none());
            prop_assert!(find_conflict(&existing, s, e, None).is_some());
        }

        #[test]
        fn test_free_slots_do_not_touch_bookings(
            start in 480..1200i64, len in 1..120i64, slot_minutes in 5..90i64,
        ) {
            let settings = BookingSettings {
                slot: Duration::minutes(slot_minutes),
                ..BookingSettings::default()
            };
            let (s, e) = interval(start, len);
            let booked = vec![confirmed(0, s, e)];
            let day = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();

            for slot in mark_slots(&slot_grid(day, &settings), &booked) {
                prop_assert_eq!(slot.available, !overlaps(slot.start_time, slot.end_time, s, e));
            }
        }
    }
}
