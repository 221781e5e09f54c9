// --- File: crates/roombook_booking/src/service.rs ---
//! Booking lifecycle.
//!
//! A booking is created `confirmed` and may later become `cancelled`; there
//! is no way back. Every write that places an interval on a room runs under
//! that room's lock, between the overlap check and the guarded store write.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use roombook_common::models::{Booking, BookingFilter, NewBooking, Room, RoomSummary};
use roombook_common::{conflict, forbidden, not_found, validation_error, RoombookError};
use roombook_db::{BookingRepository, DbClient, RoomRepository, SqlBookingRepository, SqlRoomRepository};
use tracing::{info, warn};

use crate::conflict::conflicting_booking;
use crate::locks::RoomLocks;
use crate::logic::{
    day_window, mark_slots, slot_grid, validate_interval, AvailabilityResponse, BookingSettings,
    BookingView,
};

pub const CONFLICT_MESSAGE: &str = "This time slot is already booked for this room";

/// What a caller asks for when creating a booking.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub room_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub title: Option<String>,
    pub description: Option<String>,
}

pub struct BookingService<R, B> {
    pub(crate) rooms: R,
    pub(crate) bookings: B,
    locks: RoomLocks,
    settings: BookingSettings,
}

pub type SqlBookingService = BookingService<SqlRoomRepository, SqlBookingRepository>;

impl SqlBookingService {
    pub fn from_client(client: DbClient, settings: BookingSettings) -> Self {
        Self::new(
            SqlRoomRepository::new(client.clone()),
            SqlBookingRepository::new(client),
            settings,
        )
    }
}

impl<R, B> BookingService<R, B>
where
    R: RoomRepository + Send + Sync,
    B: BookingRepository + Send + Sync,
{
    pub fn new(rooms: R, bookings: B, settings: BookingSettings) -> Self {
        Self {
            rooms,
            bookings,
            locks: RoomLocks::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &BookingSettings {
        &self.settings
    }

    // --- Rooms ---

    pub async fn list_rooms(&self) -> Result<Vec<Room>, RoombookError> {
        Ok(self.rooms.list_available().await?)
    }

    pub async fn get_room(&self, room_id: &str) -> Result<Room, RoombookError> {
        self.rooms
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| not_found("Room not found"))
    }

    /// Confirmed bookings of the room intersecting the local day `date`.
    pub async fn list_for_room_and_date(
        &self,
        room_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Booking>, RoombookError> {
        let (from, to) = day_window(date, &self.settings.time_zone);
        Ok(self.bookings.list_for_window(room_id, from, to).await?)
    }

    /// The day's bookings on the room plus the slot grid marked against them.
    pub async fn availability(
        &self,
        room_id: &str,
        date: NaiveDate,
    ) -> Result<AvailabilityResponse, RoombookError> {
        self.get_room(room_id).await?;
        let bookings = self.list_for_room_and_date(room_id, date).await?;
        let slots = mark_slots(&slot_grid(date, &self.settings), &bookings);

        Ok(AvailabilityResponse {
            date: date.format("%Y-%m-%d").to_string(),
            bookings,
            slots,
        })
    }

    // --- Reads ---

    /// Confirmed bookings of `owner_id`, earliest first, with their rooms.
    pub async fn list_mine(&self, owner_id: &str) -> Result<Vec<BookingView>, RoombookError> {
        let bookings = self.bookings.list_for_owner(owner_id).await?;
        let mut summaries: HashMap<String, Option<RoomSummary>> = HashMap::new();
        let mut views = Vec::with_capacity(bookings.len());

        for booking in bookings {
            if !summaries.contains_key(&booking.room_id) {
                let summary = self
                    .rooms
                    .find_by_id(&booking.room_id)
                    .await?
                    .map(|room| RoomSummary::from(&room));
                summaries.insert(booking.room_id.clone(), summary);
            }
            let room = summaries.get(&booking.room_id).cloned().flatten();
            views.push(BookingView { booking, room });
        }
        Ok(views)
    }

    pub async fn list_filtered(&self, filter: &BookingFilter) -> Result<Vec<Booking>, RoombookError> {
        Ok(self.bookings.list_filtered(filter).await?)
    }

    /// One booking of the caller, whatever its status.
    pub async fn get(&self, booking_id: &str, caller_id: &str) -> Result<BookingView, RoombookError> {
        let booking = self.owned_booking(booking_id, caller_id).await?;
        let room = self
            .rooms
            .find_by_id(&booking.room_id)
            .await?
            .map(|room| RoomSummary::from(&room));
        Ok(BookingView { booking, room })
    }

    // --- Writes ---

    pub async fn create(&self, owner_id: &str, draft: BookingDraft) -> Result<Booking, RoombookError> {
        validate_interval(draft.start_time, draft.end_time)?;

        let room = self.get_room(&draft.room_id).await?;
        if !room.is_available {
            return Err(validation_error("Room is not available for booking"));
        }

        let _guard = self.locks.lock(&room.id).await;

        if let Some(existing) =
            conflicting_booking(&self.bookings, &room.id, draft.start_time, draft.end_time, None).await?
        {
            warn!(
                "booking conflict on room {}: [{}, {}) overlaps booking {}",
                room.id, draft.start_time, draft.end_time, existing.id
            );
            return Err(conflict(CONFLICT_MESSAGE));
        }

        let new_booking = NewBooking {
            id: uuid::Uuid::new_v4().to_string(),
            room_id: room.id.clone(),
            user_id: owner_id.to_string(),
            start_time: draft.start_time,
            end_time: draft.end_time,
            title: non_blank(draft.title),
            description: non_blank(draft.description),
            created_at: Utc::now(),
        };

        if !self.bookings.insert_if_free(&new_booking).await? {
            warn!(
                "booking conflict on room {}: store refused [{}, {})",
                room.id, draft.start_time, draft.end_time
            );
            return Err(conflict(CONFLICT_MESSAGE));
        }

        info!(
            "booking {} created on room {} for [{}, {})",
            new_booking.id, room.id, new_booking.start_time, new_booking.end_time
        );
        Ok(new_booking.into())
    }

    /// Moves a confirmed booking. A missing endpoint keeps its stored value.
    pub async fn update(
        &self,
        booking_id: &str,
        caller_id: &str,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
    ) -> Result<Booking, RoombookError> {
        let booking = self.owned_booking(booking_id, caller_id).await?;
        let _guard = self.locks.lock(&booking.room_id).await;

        // Reload under the lock; a concurrent cancel may have landed.
        let booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| not_found("Booking not found"))?;
        if !booking.is_confirmed() {
            return Err(validation_error("Cannot update a cancelled booking"));
        }
        if start_time.is_none() && end_time.is_none() {
            return Ok(booking);
        }

        let start = start_time.unwrap_or(booking.start_time);
        let end = end_time.unwrap_or(booking.end_time);
        validate_interval(start, end)?;

        if let Some(existing) =
            conflicting_booking(&self.bookings, &booking.room_id, start, end, Some(&booking.id)).await?
        {
            warn!(
                "booking conflict on room {}: moving {} to [{}, {}) overlaps booking {}",
                booking.room_id, booking.id, start, end, existing.id
            );
            return Err(conflict(CONFLICT_MESSAGE));
        }

        if !self.bookings.reschedule_if_free(&booking.id, start, end).await? {
            warn!(
                "booking conflict on room {}: store refused moving {} to [{}, {})",
                booking.room_id, booking.id, start, end
            );
            return Err(conflict(CONFLICT_MESSAGE));
        }

        info!("booking {} moved to [{}, {})", booking.id, start, end);
        Ok(Booking {
            start_time: start,
            end_time: end,
            ..booking
        })
    }

    /// Cancels a booking. Cancelling twice succeeds and changes nothing.
    pub async fn cancel(&self, booking_id: &str, caller_id: &str) -> Result<Booking, RoombookError> {
        let booking = self.owned_booking(booking_id, caller_id).await?;
        let _guard = self.locks.lock(&booking.room_id).await;

        if self.bookings.cancel(&booking.id).await? {
            info!("booking {} cancelled", booking.id);
        }

        self.bookings
            .find_by_id(&booking.id)
            .await?
            .ok_or_else(|| not_found("Booking not found"))
    }

    // 404 when absent, 403 when it belongs to someone else.
    async fn owned_booking(&self, booking_id: &str, caller_id: &str) -> Result<Booking, RoombookError> {
        let booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| not_found("Booking not found"))?;
        if booking.user_id != caller_id {
            return Err(forbidden("You do not have access to this booking"));
        }
        Ok(booking)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
