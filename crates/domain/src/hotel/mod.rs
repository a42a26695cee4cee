//! Hotels, rooms and the bookings made against them.

mod aggregate;
mod booking;
mod repository;
mod room;

pub use aggregate::{BookingInfo, Hotel};
pub use booking::Booking;
pub use repository::{HotelRepository, HotelSnapshot, RoomSnapshot};
pub use room::Room;

use chrono::{DateTime, Utc};
use common::{BookingId, HotelId, RoomId};
use thiserror::Error;

use crate::error::ErrorKind;
use crate::validation::DateRangeError;

/// Errors that can occur during hotel, room and booking operations.
#[derive(Debug, Error)]
pub enum HotelError {
    /// The requested dates break a validation rule.
    #[error("invalid booking: {0}")]
    InvalidBooking(#[from] DateRangeError),

    #[error("hotel not found: {0}")]
    HotelNotFound(HotelId),

    #[error("room not found: {room_id}")]
    RoomNotFound { hotel_id: HotelId, room_id: RoomId },

    #[error("booking not found: {0}")]
    BookingNotFound(BookingId),

    /// An active booking for the room overlaps the requested range.
    #[error("room already booked: {room_id} from {from} to {to}")]
    RoomAlreadyBooked {
        room_id: RoomId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },

    #[error("could not get room: {0}")]
    GetRoom(#[source] Box<HotelError>),

    #[error("could not book room: {0}")]
    BookRoom(#[source] Box<HotelError>),

    #[error("could not cancel booking: {0}")]
    CancelBooking(#[source] Box<HotelError>),
}

impl HotelError {
    /// Returns the root cause category, looking through context wrappers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            HotelError::InvalidBooking(_) => ErrorKind::InvalidBooking,
            HotelError::HotelNotFound(_) => ErrorKind::HotelNotFound,
            HotelError::RoomNotFound { .. } => ErrorKind::RoomNotFound,
            HotelError::BookingNotFound(_) => ErrorKind::BookingNotFound,
            HotelError::RoomAlreadyBooked { .. } => ErrorKind::RoomAlreadyBooked,
            HotelError::GetRoom(inner)
            | HotelError::BookRoom(inner)
            | HotelError::CancelBooking(inner) => inner.kind(),
        }
    }

    /// Returns true if the root cause is an overlapping booking.
    pub fn is_room_already_booked(&self) -> bool {
        self.kind() == ErrorKind::RoomAlreadyBooked
    }

    pub(crate) fn get_room(self) -> Self {
        HotelError::GetRoom(Box::new(self))
    }

    pub(crate) fn book_room(self) -> Self {
        HotelError::BookRoom(Box::new(self))
    }

    pub(crate) fn cancel_booking(self) -> Self {
        HotelError::CancelBooking(Box::new(self))
    }
}
