//! Order aggregate implementation.

use common::{BookingId, HotelId, OrderId, RoomId, UserId};
use serde::Serialize;

use crate::validation::DateRange;

use super::OrderError;

/// A slot requested as part of an order, before it is reserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    hotel_id: HotelId,
    room_id: RoomId,
    range: DateRange,
}

impl BookingRequest {
    /// Builds a request for an already validated range.
    pub fn new(hotel_id: impl Into<HotelId>, room_id: impl Into<RoomId>, range: DateRange) -> Self {
        Self {
            hotel_id: hotel_id.into(),
            room_id: room_id.into(),
            range,
        }
    }

    pub fn hotel_id(&self) -> &HotelId {
        &self.hotel_id
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    /// Pairs the request with the booking id it was reserved under.
    pub fn reserved(self, booking_id: BookingId) -> OrderBooking {
        OrderBooking {
            booking_id,
            hotel_id: self.hotel_id,
            room_id: self.room_id,
            range: self.range,
        }
    }
}

/// A reserved slot belonging to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderBooking {
    pub booking_id: BookingId,
    pub hotel_id: HotelId,
    pub room_id: RoomId,
    pub range: DateRange,
}

/// Order aggregate root.
///
/// Groups one or more reserved bookings under a user. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    id: OrderId,
    user_id: UserId,
    bookings: Vec<OrderBooking>,
}

impl Order {
    /// Builds an order, rejecting an empty booking list.
    pub fn new(
        id: OrderId,
        user_id: UserId,
        bookings: Vec<OrderBooking>,
    ) -> Result<Self, OrderError> {
        if bookings.is_empty() {
            return Err(OrderError::NoBookings);
        }
        Ok(Self {
            id,
            user_id,
            bookings,
        })
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Bookings in the order they were requested.
    pub fn bookings(&self) -> &[OrderBooking] {
        &self.bookings
    }
}
