// --- File: crates/roombook_booking/src/routes.rs ---
use axum::{routing::get, Router};

use crate::handlers::{
    availability_handler, cancel_booking_handler, create_booking_handler, get_booking_handler,
    get_room_handler, list_bookings_handler, list_rooms_handler, my_bookings_handler,
    update_booking_handler, BookingState,
};

/// Creates a router containing the `/rooms/*` and `/bookings/*` routes.
pub fn routes(state: BookingState) -> Router {
    Router::new()
        .route("/rooms", get(list_rooms_handler))
        .route("/rooms/{id}", get(get_room_handler))
        .route("/rooms/{id}/availability", get(availability_handler))
        .route(
            "/bookings",
            get(list_bookings_handler).post(create_booking_handler),
        )
        // Static segment wins over `{id}` in axum's router.
        .route("/bookings/my-bookings", get(my_bookings_handler))
        .route(
            "/bookings/{id}",
            get(get_booking_handler)
                .put(update_booking_handler)
                .delete(cancel_booking_handler),
        )
        .with_state(state)
}
