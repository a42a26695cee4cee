//! Domain layer for hotel room reservations.
//!
//! This crate provides:
//! - Date range validation with an injectable [`Clock`]
//! - Hotel / Room / Booking with the reservation protocol
//! - The Order aggregate and User
//! - Repository traits implemented by the `store` crate

pub mod clock;
pub mod error;
pub mod hotel;
pub mod order;
pub mod user;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::ErrorKind;
pub use hotel::{
    Booking, BookingInfo, Hotel, HotelError, HotelRepository, HotelSnapshot, Room, RoomSnapshot,
};
pub use order::{BookingRequest, Order, OrderBooking, OrderError, OrderRepository};
pub use user::{User, UserError, UserRepository};
pub use validation::{DateRange, DateRangeError, validate_date_range};
