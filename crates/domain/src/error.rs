//! Error classification shared across layers.

/// The root cause category of a failure.
///
/// Every error type in the workspace wraps its cause with context but can
/// still report which of these it ultimately is, so transport layers can
/// pick a status without matching on messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidBooking,
    InvalidOrder,
    InvalidUser,
    HotelNotFound,
    RoomNotFound,
    BookingNotFound,
    UserNotFound,
    OrderNotFound,
    /// Legitimate business conflict, not a fault.
    RoomAlreadyBooked,
}

impl ErrorKind {
    /// Returns true for lookup misses.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ErrorKind::HotelNotFound
                | ErrorKind::RoomNotFound
                | ErrorKind::BookingNotFound
                | ErrorKind::UserNotFound
                | ErrorKind::OrderNotFound
        )
    }

    /// Returns true for malformed client input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            ErrorKind::InvalidBooking | ErrorKind::InvalidOrder | ErrorKind::InvalidUser
        )
    }
}
