use async_trait::async_trait;
use common::{BookingId, HotelId, OrderId, RoomId};
use serde::Serialize;

use super::{Booking, HotelError};

/// Point-in-time view of a hotel's registered rooms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HotelSnapshot {
    pub id: HotelId,
    pub rooms: Vec<RoomId>,
}

/// Point-in-time view of a room and its active bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomSnapshot {
    pub id: RoomId,
    pub hotel_id: HotelId,
    pub bookings: Vec<Booking>,
}

/// Storage port for hotels, rooms and bookings.
///
/// Implementations must be thread-safe. Bookings can only be inserted
/// through [`check_and_reserve`](HotelRepository::check_and_reserve), which
/// scans for overlaps and inserts as one atomic step; there is deliberately
/// no separate availability check.
#[async_trait]
pub trait HotelRepository: Send + Sync {
    /// Registers a hotel. Registering an existing hotel keeps its rooms.
    async fn save_hotel(&self, hotel_id: HotelId) -> Result<(), HotelError>;

    /// Looks up a hotel.
    async fn get_hotel(&self, hotel_id: &HotelId) -> Result<HotelSnapshot, HotelError>;

    /// Registers a room. Registering an existing room keeps its bookings.
    async fn save_room(&self, hotel_id: &HotelId, room_id: RoomId) -> Result<(), HotelError>;

    /// Looks up a room with its active bookings.
    async fn get_room(
        &self,
        hotel_id: &HotelId,
        room_id: &RoomId,
    ) -> Result<RoomSnapshot, HotelError>;

    /// Inserts `booking` if no active booking on the same room overlaps it.
    ///
    /// Fails with `RoomAlreadyBooked` on overlap, `HotelNotFound` or
    /// `RoomNotFound` if the target does not exist.
    async fn check_and_reserve(
        &self,
        hotel_id: &HotelId,
        booking: Booking,
    ) -> Result<BookingId, HotelError>;

    /// Removes an active booking, returning it.
    async fn delete_booking(
        &self,
        hotel_id: &HotelId,
        room_id: &RoomId,
        booking_id: BookingId,
    ) -> Result<Booking, HotelError>;

    /// Returns every active booking in the hotel made for `order_id`.
    async fn list_bookings_for_order(
        &self,
        hotel_id: &HotelId,
        order_id: OrderId,
    ) -> Result<Vec<Booking>, HotelError>;
}
