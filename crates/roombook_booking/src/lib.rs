// --- File: crates/roombook_booking/src/lib.rs ---
/// Interval overlap evaluation.
pub mod conflict;
pub mod doc;
pub mod handlers;
pub mod locks;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod routes;
/// Booking lifecycle: create, move, cancel.
pub mod service;

pub use conflict::{conflicts, overlaps};
pub use handlers::BookingState;
pub use logic::BookingSettings;
pub use routes::routes;
pub use service::{BookingDraft, BookingService, SqlBookingService};
