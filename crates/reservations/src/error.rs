//! Order orchestration error types.

use common::HotelId;
use domain::{ErrorKind, HotelError, OrderError, UserError};
use thiserror::Error;

/// Errors that can occur while creating or managing orders.
#[derive(Debug, Error)]
pub enum ReservationError {
    #[error("could not get user: {0}")]
    User(#[source] UserError),

    #[error("could not register user: {0}")]
    RegisterUser(#[source] UserError),

    #[error("could not get hotel: {0}")]
    Hotel(#[source] HotelError),

    #[error("could not book room in hotel {hotel_id}: {source}")]
    Booking {
        hotel_id: HotelId,
        #[source]
        source: HotelError,
    },

    #[error("could not cancel booking: {0}")]
    Cancel(#[source] HotelError),

    #[error("could not create order: {0}")]
    Order(#[source] OrderError),

    #[error("could not save order: {0}")]
    SaveOrder(#[source] OrderError),
}

impl ReservationError {
    /// Returns the root cause category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReservationError::User(e) | ReservationError::RegisterUser(e) => e.kind(),
            ReservationError::Hotel(e)
            | ReservationError::Booking { source: e, .. }
            | ReservationError::Cancel(e) => e.kind(),
            ReservationError::Order(e) | ReservationError::SaveOrder(e) => e.kind(),
        }
    }

    /// Returns true if the root cause is an overlapping booking.
    pub fn is_room_already_booked(&self) -> bool {
        self.kind() == ErrorKind::RoomAlreadyBooked
    }
}

/// Result type for order orchestration.
pub type Result<T> = std::result::Result<T, ReservationError>;
