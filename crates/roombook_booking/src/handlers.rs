// --- File: crates/roombook_booking/src/handlers.rs ---
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRef, Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use roombook_auth::AuthenticatedUser;
use roombook_common::models::{Booking, BookingFilter, Room};
use roombook_common::{json_body, query_params, validation_error, IdentityProvider, RoombookError};
use serde::Serialize;
use tracing::debug;

use crate::logic::{
    parse_date, parse_instant, parse_lower_bound, parse_upper_bound, today, AvailabilityQuery,
    AvailabilityResponse, BookingView, BookingsQuery, CreateBookingRequest, UpdateBookingRequest,
};
use crate::service::{BookingDraft, SqlBookingService};

/// Shared state for the rooms and bookings routes.
#[derive(Clone)]
pub struct BookingState {
    pub service: Arc<SqlBookingService>,
    pub identity: Arc<dyn IdentityProvider>,
}

impl FromRef<BookingState> for Arc<dyn IdentityProvider> {
    fn from_ref(state: &BookingState) -> Self {
        state.identity.clone()
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RoomsResponse {
    pub rooms: Vec<Room>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RoomResponse {
    pub room: Room,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingsResponse {
    pub bookings: Vec<Booking>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MyBookingsResponse {
    pub bookings: Vec<BookingView>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingResponse {
    pub booking: BookingView,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingChangeResponse {
    pub message: String,
    pub booking: Booking,
}

// --- Rooms ---

/// Rooms open for booking, by name.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/rooms",
    responses((status = 200, description = "Available rooms", body = RoomsResponse)),
    tag = "Rooms"
))]
pub async fn list_rooms_handler(
    State(state): State<BookingState>,
) -> Result<Json<RoomsResponse>, RoombookError> {
    let rooms = state.service.list_rooms().await?;
    Ok(Json(RoomsResponse { rooms }))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/rooms/{id}",
    params(("id" = String, Path, description = "Room id")),
    responses(
        (status = 200, description = "Room", body = RoomResponse),
        (status = 404, description = "Room not found")
    ),
    tag = "Rooms"
))]
pub async fn get_room_handler(
    State(state): State<BookingState>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomResponse>, RoombookError> {
    let room = state.service.get_room(&room_id).await?;
    Ok(Json(RoomResponse { room }))
}

/// Bookings and slot grid of a room for one day.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/rooms/{id}/availability",
    params(("id" = String, Path, description = "Room id"), AvailabilityQuery),
    responses(
        (status = 200, description = "Day availability", body = AvailabilityResponse),
        (status = 400, description = "Invalid date"),
        (status = 404, description = "Room not found")
    ),
    tag = "Rooms"
))]
pub async fn availability_handler(
    State(state): State<BookingState>,
    Path(room_id): Path<String>,
    query: Result<Query<AvailabilityQuery>, QueryRejection>,
) -> Result<Json<AvailabilityResponse>, RoombookError> {
    let query = query_params(query)?;
    let date = match query.date.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(date) => parse_date(date)?,
        None => today(&state.service.settings().time_zone),
    };

    let availability = state.service.availability(&room_id, date).await?;
    Ok(Json(availability))
}

// --- Bookings ---

/// Confirmed bookings, optionally narrowed by room and date range.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/bookings",
    params(BookingsQuery),
    responses(
        (status = 200, description = "Matching bookings", body = BookingsResponse),
        (status = 400, description = "Invalid filter")
    ),
    tag = "Bookings"
))]
pub async fn list_bookings_handler(
    State(state): State<BookingState>,
    query: Result<Query<BookingsQuery>, QueryRejection>,
) -> Result<Json<BookingsResponse>, RoombookError> {
    let query = query_params(query)?;
    let tz = state.service.settings().time_zone;

    let filter = BookingFilter {
        room_id: query.room_id.filter(|id| !id.trim().is_empty()),
        starts_at_or_after: query
            .start_date
            .as_deref()
            .map(|v| parse_lower_bound(v, &tz))
            .transpose()?,
        ends_at_or_before: query
            .end_date
            .as_deref()
            .map(|v| parse_upper_bound(v, &tz))
            .transpose()?,
    };
    debug!("listing bookings with {:?}", filter);

    let bookings = state.service.list_filtered(&filter).await?;
    Ok(Json(BookingsResponse { bookings }))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/bookings/my-bookings",
    responses(
        (status = 200, description = "The caller's confirmed bookings", body = MyBookingsResponse),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer" = [])),
    tag = "Bookings"
))]
pub async fn my_bookings_handler(
    State(state): State<BookingState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<MyBookingsResponse>, RoombookError> {
    let bookings = state.service.list_mine(&user.id).await?;
    Ok(Json(MyBookingsResponse { bookings }))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/bookings/{id}",
    params(("id" = String, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking", body = BookingResponse),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Booking belongs to another user"),
        (status = 404, description = "Booking not found")
    ),
    security(("bearer" = [])),
    tag = "Bookings"
))]
pub async fn get_booking_handler(
    State(state): State<BookingState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(booking_id): Path<String>,
) -> Result<Json<BookingResponse>, RoombookError> {
    let booking = state.service.get(&booking_id, &user.id).await?;
    Ok(Json(BookingResponse { booking }))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingChangeResponse),
        (status = 400, description = "Missing fields, invalid interval or room not bookable"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Room not found"),
        (status = 409, description = "Interval overlaps a confirmed booking")
    ),
    security(("bearer" = [])),
    tag = "Bookings"
))]
pub async fn create_booking_handler(
    State(state): State<BookingState>,
    AuthenticatedUser(user): AuthenticatedUser,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BookingChangeResponse>), RoombookError> {
    let request = json_body(payload)?;
    if request.room_id.trim().is_empty()
        || request.start_time.trim().is_empty()
        || request.end_time.trim().is_empty()
    {
        return Err(validation_error("room_id, start_time and end_time are required"));
    }

    let tz = state.service.settings().time_zone;
    let draft = BookingDraft {
        room_id: request.room_id.trim().to_string(),
        start_time: parse_instant(&request.start_time, &tz)?,
        end_time: parse_instant(&request.end_time, &tz)?,
        title: request.title,
        description: request.description,
    };

    let booking = state.service.create(&user.id, draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(BookingChangeResponse {
            message: "Booking created successfully".to_string(),
            booking,
        }),
    ))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    put,
    path = "/bookings/{id}",
    params(("id" = String, Path, description = "Booking id")),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Booking updated", body = BookingChangeResponse),
        (status = 400, description = "Invalid interval or booking cancelled"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Booking belongs to another user"),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Interval overlaps a confirmed booking")
    ),
    security(("bearer" = [])),
    tag = "Bookings"
))]
pub async fn update_booking_handler(
    State(state): State<BookingState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(booking_id): Path<String>,
    payload: Result<Json<UpdateBookingRequest>, JsonRejection>,
) -> Result<Json<BookingChangeResponse>, RoombookError> {
    let request = json_body(payload)?;
    let tz = state.service.settings().time_zone;
    let start = request
        .start_time
        .as_deref()
        .map(|v| parse_instant(v, &tz))
        .transpose()?;
    let end = request
        .end_time
        .as_deref()
        .map(|v| parse_instant(v, &tz))
        .transpose()?;

    let booking = state.service.update(&booking_id, &user.id, start, end).await?;
    Ok(Json(BookingChangeResponse {
        message: "Booking updated successfully".to_string(),
        booking,
    }))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/bookings/{id}",
    params(("id" = String, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking cancelled", body = BookingChangeResponse),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Booking belongs to another user"),
        (status = 404, description = "Booking not found")
    ),
    security(("bearer" = [])),
    tag = "Bookings"
))]
pub async fn cancel_booking_handler(
    State(state): State<BookingState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(booking_id): Path<String>,
) -> Result<Json<BookingChangeResponse>, RoombookError> {
    let booking = state.service.cancel(&booking_id, &user.id).await?;
    Ok(Json(BookingChangeResponse {
        message: "Booking cancelled successfully".to_string(),
        booking,
    }))
}
