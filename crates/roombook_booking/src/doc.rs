// --- File: crates/roombook_booking/src/doc.rs ---

#![cfg(feature = "openapi")]

use utoipa::OpenApi;

use crate::handlers::{
    BookingChangeResponse, BookingResponse, BookingsResponse, MyBookingsResponse, RoomResponse,
    RoomsResponse,
};
use crate::logic::{
    AvailabilityResponse, BookingView, CreateBookingRequest, Slot, UpdateBookingRequest,
};
use roombook_common::models::{Booking, BookingStatus, Room, RoomSummary};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::list_rooms_handler,
        crate::handlers::get_room_handler,
        crate::handlers::availability_handler,
        crate::handlers::list_bookings_handler,
        crate::handlers::my_bookings_handler,
        crate::handlers::get_booking_handler,
        crate::handlers::create_booking_handler,
        crate::handlers::update_booking_handler,
        crate::handlers::cancel_booking_handler,
    ),
    components(schemas(
        Room,
        RoomSummary,
        Booking,
        BookingStatus,
        BookingView,
        Slot,
        CreateBookingRequest,
        UpdateBookingRequest,
        AvailabilityResponse,
        RoomsResponse,
        RoomResponse,
        BookingsResponse,
        MyBookingsResponse,
        BookingResponse,
        BookingChangeResponse
    )),
    tags(
        (name = "Rooms", description = "Rooms and their daily availability"),
        (name = "Bookings", description = "Creating, moving and cancelling bookings")
    )
)]
pub struct BookingApiDoc;
