// --- File: crates/roombook_common/src/models.rs ---

// Domain types shared by the store, the identity provider and the HTTP
// layer. Instants are always UTC.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A bookable meeting room. Read-only from the booking core's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Room {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub capacity: i64,
    /// Ordered list of equipment names
    pub equipment: Vec<String>,
    pub is_available: bool,
}

/// The part of a room embedded in booking listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RoomSummary {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub capacity: i64,
}

impl From<&Room> for RoomSummary {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.clone(),
            name: room.name.clone(),
            description: room.description.clone(),
            capacity: room.capacity,
        }
    }
}

/// Booking status. `Confirmed -> Cancelled` is the only transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(format!("unknown booking status: {other}")),
        }
    }
}

/// A reservation of one room for the half-open interval `[start_time, end_time)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Booking {
    pub id: String,
    pub room_id: String,
    pub user_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: BookingStatus,
    pub title: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Booking {
    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }
}

/// Fields of a booking about to be written. Status is always confirmed.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub id: String,
    pub room_id: String,
    pub user_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<NewBooking> for Booking {
    fn from(new: NewBooking) -> Self {
        Self {
            id: new.id,
            room_id: new.room_id,
            user_id: new.user_id,
            start_time: new.start_time,
            end_time: new.end_time,
            status: BookingStatus::Confirmed,
            title: new.title,
            description: new.description,
            created_at: Some(new.created_at),
        }
    }
}

/// Filters for listing confirmed bookings. Bounds are inclusive on both sides.
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub room_id: Option<String>,
    pub starts_at_or_after: Option<DateTime<Utc>>,
    pub ends_at_or_before: Option<DateTime<Utc>>,
}

/// The public profile of a registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
}

/// The identity attached to a request by a valid bearer credential.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    /// Token id, used to revoke the credential on logout
    pub token_id: String,
    pub token_expires_at: DateTime<Utc>,
}

/// A freshly issued credential together with its owner.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AuthSession {
    pub user: UserProfile,
    pub token: String,
}
