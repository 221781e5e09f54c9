use chrono::{DateTime, Duration, TimeZone, Utc};
use roombook_common::models::{BookingFilter, BookingStatus, NewBooking, UserProfile};
use roombook_config::RoomSeed;
use roombook_db::{
    AccountRepository, BookingRepository, DbClient, DbClientFactory, RoomRepository,
    SqlAccountRepository, SqlBookingRepository, SqlRoomRepository, StoredCredentials,
};

fn seed(name: &str, is_available: bool) -> RoomSeed {
    RoomSeed {
        name: name.to_string(),
        description: Some(format!("{name} description")),
        capacity: 6,
        equipment: vec!["screen".to_string(), "whiteboard".to_string()],
        is_available,
    }
}

async fn setup() -> (DbClient, SqlRoomRepository, SqlBookingRepository) {
    let client = DbClientFactory::new()
        .from_url(
            "sqlite::memory:",
            &[seed("Beta", true), seed("Alpha", true), seed("Closed", false)],
        )
        .await
        .expect("in-memory database");
    (
        client.clone(),
        SqlRoomRepository::new(client.clone()),
        SqlBookingRepository::new(client),
    )
}

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 5, hour, minute, 0).unwrap()
}

fn new_booking(room_id: &str, user_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> NewBooking {
    NewBooking {
        id: uuid::Uuid::new_v4().to_string(),
        room_id: room_id.to_string(),
        user_id: user_id.to_string(),
        start_time: start,
        end_time: end,
        title: Some("Standup".to_string()),
        description: None,
        created_at: Utc::now(),
    }
}

async fn first_room_id(rooms: &SqlRoomRepository) -> String {
    rooms.list_available().await.unwrap()[0].id.clone()
}

#[tokio::test]
async fn test_seeding_is_idempotent_and_listing_skips_unavailable_rooms() {
    let (client, rooms, _) = setup().await;

    DbClientFactory::new()
        .prepare(&client, &[seed("Alpha", true)])
        .await
        .unwrap();

    let listed = rooms.list_available().await.unwrap();
    let names: Vec<_> = listed.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Beta"]);
    assert_eq!(listed[0].equipment, vec!["screen", "whiteboard"]);
}

#[tokio::test]
async fn test_find_room_by_id() {
    let (_, rooms, _) = setup().await;
    let id = first_room_id(&rooms).await;

    let room = rooms.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(room.name, "Alpha");
    assert!(room.is_available);
    assert!(rooms.find_by_id("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_insert_if_free_refuses_overlap_but_allows_touching() {
    let (_, rooms, bookings) = setup().await;
    let room_id = first_room_id(&rooms).await;

    let first = new_booking(&room_id, "u1", at(10, 0), at(11, 0));
    assert!(bookings.insert_if_free(&first).await.unwrap());

    let overlapping = new_booking(&room_id, "u2", at(10, 30), at(11, 30));
    assert!(!bookings.insert_if_free(&overlapping).await.unwrap());
    assert!(bookings.find_by_id(&overlapping.id).await.unwrap().is_none());

    let touching = new_booking(&room_id, "u2", at(11, 0), at(12, 0));
    assert!(bookings.insert_if_free(&touching).await.unwrap());

    let stored = bookings.find_by_id(&first.id).await.unwrap().unwrap();
    assert_eq!(stored.status, BookingStatus::Confirmed);
    assert_eq!(stored.start_time, at(10, 0));
    assert_eq!(stored.title.as_deref(), Some("Standup"));
}

#[tokio::test]
async fn test_confirmed_listing_respects_exclusion_and_status() {
    let (_, rooms, bookings) = setup().await;
    let room_id = first_room_id(&rooms).await;

    let booking = new_booking(&room_id, "u1", at(10, 0), at(11, 0));
    bookings.insert_if_free(&booking).await.unwrap();

    assert_eq!(
        bookings.list_confirmed_for_room(&room_id, None).await.unwrap().len(),
        1
    );
    assert!(bookings
        .list_confirmed_for_room(&room_id, Some(&booking.id))
        .await
        .unwrap()
        .is_empty());

    assert!(bookings.cancel(&booking.id).await.unwrap());
    assert!(!bookings.cancel(&booking.id).await.unwrap());
    assert!(bookings
        .list_confirmed_for_room(&room_id, None)
        .await
        .unwrap()
        .is_empty());

    let cancelled = bookings.find_by_id(&booking.id).await.unwrap().unwrap();
    assert_eq!(cancelled.status, BookingStatus::Cancelled);
}

#[tokio::test]
async fn test_reschedule_if_free() {
    let (_, rooms, bookings) = setup().await;
    let room_id = first_room_id(&rooms).await;

    let a = new_booking(&room_id, "u1", at(9, 0), at(10, 0));
    let b = new_booking(&room_id, "u1", at(12, 0), at(13, 0));
    bookings.insert_if_free(&a).await.unwrap();
    bookings.insert_if_free(&b).await.unwrap();

    // Same interval as itself
    assert!(bookings.reschedule_if_free(&a.id, at(9, 0), at(10, 0)).await.unwrap());
    // Onto b
    assert!(!bookings.reschedule_if_free(&a.id, at(11, 30), at(12, 30)).await.unwrap());
    // Next to b
    assert!(bookings.reschedule_if_free(&a.id, at(11, 0), at(12, 0)).await.unwrap());

    let moved = bookings.find_by_id(&a.id).await.unwrap().unwrap();
    assert_eq!((moved.start_time, moved.end_time), (at(11, 0), at(12, 0)));

    bookings.cancel(&a.id).await.unwrap();
    assert!(!bookings.reschedule_if_free(&a.id, at(8, 0), at(9, 0)).await.unwrap());
}

#[tokio::test]
async fn test_listings_are_confirmed_only_and_ordered() {
    let (_, rooms, bookings) = setup().await;
    let room_id = first_room_id(&rooms).await;

    let late = new_booking(&room_id, "u1", at(15, 0), at(16, 0));
    let early = new_booking(&room_id, "u1", at(8, 0), at(9, 0));
    let cancelled = new_booking(&room_id, "u1", at(10, 0), at(11, 0));
    let other_user = new_booking(&room_id, "u2", at(12, 0), at(13, 0));
    for b in [&late, &early, &cancelled, &other_user] {
        assert!(bookings.insert_if_free(b).await.unwrap());
    }
    bookings.cancel(&cancelled.id).await.unwrap();

    let mine = bookings.list_for_owner("u1").await.unwrap();
    let ids: Vec<_> = mine.iter().map(|b| b.id.clone()).collect();
    assert_eq!(ids, vec![early.id.clone(), late.id.clone()]);

    let window = bookings
        .list_for_window(&room_id, at(9, 0), at(15, 0))
        .await
        .unwrap();
    assert_eq!(window.len(), 1);
    assert_eq!(window[0].id, other_user.id);

    let all = bookings
        .list_confirmed_for_room(&room_id, Some(&early.id))
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let filtered = bookings
        .list_filtered(&BookingFilter {
            room_id: Some(room_id.clone()),
            starts_at_or_after: Some(at(12, 0)),
            ends_at_or_before: Some(at(16, 0)),
        })
        .await
        .unwrap();
    assert_eq!(filtered.len(), 2);

    let unfiltered = bookings.list_filtered(&BookingFilter::default()).await.unwrap();
    assert_eq!(unfiltered.len(), 3);
    assert!(unfiltered.windows(2).all(|w| w[0].start_time <= w[1].start_time));
}

#[tokio::test]
async fn test_accounts_and_revoked_tokens() {
    let (client, _, _) = setup().await;
    let accounts = SqlAccountRepository::new(client);

    let credentials = StoredCredentials {
        profile: UserProfile {
            id: "user-1".to_string(),
            email: "ana@example.com".to_string(),
            full_name: Some("Ana Martin".to_string()),
        },
        password_hash: "hash".to_string(),
        password_salt: "salt".to_string(),
    };
    assert!(accounts.create_account(&credentials).await.unwrap());

    let duplicate = StoredCredentials {
        profile: UserProfile {
            id: "user-2".to_string(),
            ..credentials.profile.clone()
        },
        ..credentials.clone()
    };
    assert!(!accounts.create_account(&duplicate).await.unwrap());
    assert!(accounts.find_profile("user-2").await.unwrap().is_none());

    let found = accounts
        .find_credentials_by_email("ana@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.profile.id, "user-1");
    assert_eq!(found.password_hash, "hash");

    assert!(!accounts.is_token_revoked("jti-1").await.unwrap());
    let expiry = Utc::now() + Duration::hours(1);
    accounts.revoke_token("jti-1", expiry).await.unwrap();
    accounts.revoke_token("jti-1", expiry).await.unwrap();
    assert!(accounts.is_token_revoked("jti-1").await.unwrap());
}

#[tokio::test]
async fn test_untitled_booking_reads_back_with_exact_instants() {
    let (_, rooms, bookings) = setup().await;
    let room_id = first_room_id(&rooms).await;

    let start = Utc.with_ymd_and_hms(2025, 5, 5, 10, 0, 0).unwrap();
    let end = start + Duration::milliseconds(5_400_123);
    let untitled = NewBooking {
        title: None,
        ..new_booking(&room_id, "u1", start, end)
    };
    assert!(bookings.insert_if_free(&untitled).await.unwrap());

    let stored = bookings.find_by_id(&untitled.id).await.unwrap().unwrap();
    assert_eq!(stored.title, None);
    assert_eq!(stored.description, None);
    assert_eq!(stored.start_time, start);
    assert_eq!(stored.end_time, end);
    assert_eq!(
        stored.created_at.map(|c| c.timestamp_millis()),
        Some(untitled.created_at.timestamp_millis())
    );

    // Every listing decodes the untitled row too.
    let confirmed = bookings.list_confirmed_for_room(&room_id, None).await.unwrap();
    assert_eq!(confirmed.len(), 1);
    assert_eq!((confirmed[0].start_time, confirmed[0].end_time), (start, end));
    assert_eq!(bookings.list_for_owner("u1").await.unwrap().len(), 1);
    assert_eq!(
        bookings
            .list_for_window(&room_id, at(0, 0), at(23, 0))
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn test_instants_across_years_compare_in_order() {
    let (_, rooms, bookings) = setup().await;
    let room_id = first_room_id(&rooms).await;

    let new_year_eve = Utc.with_ymd_and_hms(2025, 12, 31, 23, 0, 0).unwrap();
    let new_year = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let late = new_booking(&room_id, "u1", new_year_eve, new_year);
    assert!(bookings.insert_if_free(&late).await.unwrap());

    let straddling = new_booking(
        &room_id,
        "u2",
        Utc.with_ymd_and_hms(2025, 12, 31, 23, 30, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 30, 0).unwrap(),
    );
    assert!(!bookings.insert_if_free(&straddling).await.unwrap());

    let after = new_booking(&room_id, "u2", new_year, new_year + Duration::hours(1));
    assert!(bookings.insert_if_free(&after).await.unwrap());

    let listed = bookings.list_filtered(&BookingFilter::default()).await.unwrap();
    let ids: Vec<_> = listed.iter().map(|b| b.id.clone()).collect();
    assert_eq!(ids, vec![late.id, after.id]);
}

#[tokio::test]
async fn test_profile_without_full_name_reads_back() {
    let (client, rooms, _) = setup().await;
    let accounts = SqlAccountRepository::new(client.clone());

    let credentials = StoredCredentials {
        profile: UserProfile {
            id: "user-3".to_string(),
            email: "bob@example.com".to_string(),
            full_name: None,
        },
        password_hash: "hash".to_string(),
        password_salt: "salt".to_string(),
    };
    assert!(accounts.create_account(&credentials).await.unwrap());

    let profile = accounts.find_profile("user-3").await.unwrap().unwrap();
    assert_eq!(profile, credentials.profile);
    let found = accounts
        .find_credentials_by_email("bob@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.profile.full_name, None);

    // Seeded rooms without a description decode the same way.
    DbClientFactory::new()
        .prepare(
            &client,
            &[RoomSeed {
                description: None,
                ..seed("Bare", true)
            }],
        )
        .await
        .unwrap();
    let bare = rooms
        .list_available()
        .await
        .unwrap()
        .into_iter()
        .find(|r| r.name == "Bare")
        .unwrap();
    assert_eq!(bare.description, None);
}
