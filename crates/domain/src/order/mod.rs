//! Order aggregate and related types.

mod aggregate;
mod repository;

pub use aggregate::{BookingRequest, Order, OrderBooking};
pub use repository::OrderRepository;

use common::OrderId;
use thiserror::Error;

use crate::error::ErrorKind;

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// An order must hold at least one booking.
    #[error("invalid order: bookings cannot be empty")]
    NoBookings,

    #[error("order not found: {0}")]
    OrderNotFound(OrderId),
}

impl OrderError {
    /// Returns the root cause category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::NoBookings => ErrorKind::InvalidOrder,
            OrderError::OrderNotFound(_) => ErrorKind::OrderNotFound,
        }
    }
}
