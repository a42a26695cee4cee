use common::{BookingId, OrderId, RoomId};
use serde::Serialize;

use crate::validation::DateRange;

/// One reserved slot: a room held for an order over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Booking {
    id: BookingId,
    order_id: OrderId,
    room_id: RoomId,
    range: DateRange,
}

impl Booking {
    /// Rebuilds a booking from its parts.
    pub fn new(id: BookingId, order_id: OrderId, room_id: RoomId, range: DateRange) -> Self {
        Self {
            id,
            order_id,
            room_id,
            range,
        }
    }

    /// Creates a booking with a fresh identifier.
    pub fn create(order_id: OrderId, room_id: RoomId, range: DateRange) -> Self {
        Self::new(BookingId::new(), order_id, room_id, range)
    }

    pub fn id(&self) -> BookingId {
        self.id
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    /// Returns true if both bookings hold the same room over intersecting dates.
    pub fn conflicts_with(&self, other: &Booking) -> bool {
        self.room_id == other.room_id && self.range.overlaps(&other.range)
    }
}
