// --- File: crates/roombook_booking/src/logic.rs ---
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use roombook_common::models::{Booking, RoomSummary};
use roombook_common::{validation_error, RoombookError};
use roombook_config::BookingConfig;
use serde::{Deserialize, Serialize};

use crate::conflict::overlaps;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

// --- Settings ---

/// Booking calendar settings, resolved once at startup.
#[derive(Debug, Clone)]
pub struct BookingSettings {
    pub time_zone: Tz,
    pub day_start: NaiveTime,
    pub day_end: NaiveTime,
    pub slot: Duration,
}

impl BookingSettings {
    pub fn from_config(config: &BookingConfig) -> Result<Self, RoombookError> {
        let time_zone: Tz = config.time_zone().parse().map_err(|_| {
            RoombookError::ConfigError(format!("unknown time zone '{}'", config.time_zone()))
        })?;
        let day_start = parse_clock(config.day_start())?;
        let day_end = parse_clock(config.day_end())?;
        if day_start >= day_end {
            return Err(RoombookError::ConfigError(
                "booking.day_start must be before booking.day_end".to_string(),
            ));
        }
        if config.slot_minutes() == 0 {
            return Err(RoombookError::ConfigError(
                "booking.slot_minutes must be positive".to_string(),
            ));
        }

        Ok(Self {
            time_zone,
            day_start,
            day_end,
            slot: Duration::minutes(i64::from(config.slot_minutes())),
        })
    }
}

impl Default for BookingSettings {
    fn default() -> Self {
        Self {
            time_zone: Tz::UTC,
            day_start: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN),
            day_end: NaiveTime::from_hms_opt(20, 0, 0).unwrap_or(NaiveTime::MIN),
            slot: Duration::minutes(30),
        }
    }
}

fn parse_clock(value: &str) -> Result<NaiveTime, RoombookError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| RoombookError::ConfigError(format!("invalid time of day '{value}', expected HH:MM")))
}

// --- Time parsing ---

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parses an instant given as RFC 3339, or as a local date-time without
/// offset which is then read in `tz`.
pub fn parse_instant(value: &str, tz: &Tz) -> Result<DateTime<Utc>, RoombookError> {
    let value = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| validation_error(format!("Invalid date-time '{value}'")))?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| validation_error(format!("'{value}' does not exist in {}", tz.name())))
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate, RoombookError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| validation_error(format!("Invalid date '{value}', expected YYYY-MM-DD")))
}

/// Rejects empty and inverted intervals.
pub fn validate_interval(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), RoombookError> {
    if start >= end {
        return Err(validation_error("End time must be after start time"));
    }
    Ok(())
}

// A local wall-clock time as an instant. Times skipped by a DST jump move
// forward to the first valid instant.
fn local_to_utc(naive: NaiveDateTime, tz: &Tz) -> DateTime<Utc> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}

/// The half-open window `[date 00:00, date+1 00:00)` in `tz`.
pub fn day_window(date: NaiveDate, tz: &Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let next = date.succ_opt().unwrap_or(date);
    (
        local_to_utc(date.and_time(NaiveTime::MIN), tz),
        local_to_utc(next.and_time(NaiveTime::MIN), tz),
    )
}

/// Today's date in `tz`.
pub fn today(tz: &Tz) -> NaiveDate {
    Utc::now().with_timezone(tz).date_naive()
}

/// Lower bound of a listing filter: a date means the start of that day.
pub fn parse_lower_bound(value: &str, tz: &Tz) -> Result<DateTime<Utc>, RoombookError> {
    match parse_date(value) {
        Ok(date) => Ok(day_window(date, tz).0),
        Err(_) => parse_instant(value, tz),
    }
}

/// Upper bound of a listing filter: a date means the end of that day.
pub fn parse_upper_bound(value: &str, tz: &Tz) -> Result<DateTime<Utc>, RoombookError> {
    match parse_date(value) {
        Ok(date) => Ok(day_window(date, tz).1),
        Err(_) => parse_instant(value, tz),
    }
}

// --- Slot grid ---

/// One cell of the availability grid.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Slot {
    #[cfg_attr(feature = "openapi", schema(example = "2025-05-05T10:00:00Z"))]
    pub start_time: DateTime<Utc>,
    #[cfg_attr(feature = "openapi", schema(example = "2025-05-05T10:30:00Z"))]
    pub end_time: DateTime<Utc>,
    pub available: bool,
}

/// Cuts `day_start..day_end` of `date` into slots of `settings.slot`. The
/// last slot is shortened when the range is not a multiple of the step.
pub fn slot_grid(date: NaiveDate, settings: &BookingSettings) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    let tz = &settings.time_zone;
    let open = local_to_utc(date.and_time(settings.day_start), tz);
    let close = local_to_utc(date.and_time(settings.day_end), tz);

    let mut grid = Vec::new();
    let mut cursor = open;
    while cursor < close {
        let end = (cursor + settings.slot).min(close);
        grid.push((cursor, end));
        cursor = end;
    }
    grid
}

/// Marks each grid cell available iff no confirmed booking overlaps it.
pub fn mark_slots(grid: &[(DateTime<Utc>, DateTime<Utc>)], bookings: &[Booking]) -> Vec<Slot> {
    grid.iter()
        .map(|&(start, end)| Slot {
            start_time: start,
            end_time: end,
            available: !bookings
                .iter()
                .any(|b| b.is_confirmed() && overlaps(start, end, b.start_time, b.end_time)),
        })
        .collect()
}

// --- Request / response data ---

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(default)]
pub struct CreateBookingRequest {
    pub room_id: String,
    /// RFC 3339, or a local date-time in the booking time zone
    #[cfg_attr(feature = "openapi", schema(example = "2025-05-05T10:00:00Z"))]
    pub start_time: String,
    #[cfg_attr(feature = "openapi", schema(example = "2025-05-05T11:00:00Z"))]
    pub end_time: String,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(default)]
pub struct UpdateBookingRequest {
    #[cfg_attr(feature = "openapi", schema(example = "2025-05-05T14:00:00Z"))]
    pub start_time: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "2025-05-05T15:00:00Z"))]
    pub end_time: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct AvailabilityQuery {
    /// Day in YYYY-MM-DD format, today when omitted
    #[cfg_attr(feature = "openapi", param(example = "2025-05-05"))]
    pub date: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct BookingsQuery {
    pub room_id: Option<String>,
    /// YYYY-MM-DD or RFC 3339; bookings starting at or after it
    pub start_date: Option<String>,
    /// YYYY-MM-DD or RFC 3339; bookings ending at or before it
    pub end_date: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AvailabilityResponse {
    #[cfg_attr(feature = "openapi", schema(example = "2025-05-05"))]
    pub date: String,
    pub bookings: Vec<Booking>,
    pub slots: Vec<Slot>,
}

/// A booking with the summary of its room attached under `rooms`.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BookingView {
    #[serde(flatten)]
    pub booking: Booking,
    #[serde(rename = "rooms", skip_serializing_if = "Option::is_none")]
    pub room: Option<RoomSummary>,
}

impl From<Booking> for BookingView {
    fn from(booking: Booking) -> Self {
        Self { booking, room: None }
    }
}
