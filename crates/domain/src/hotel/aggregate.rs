//! Hotel facade over rooms.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use common::{BookingId, HotelId, OrderId, RoomId};

use crate::clock::Clock;

use super::{Booking, HotelError, HotelRepository, Room};

/// Parameters for booking a room in a hotel.
#[derive(Debug, Clone)]
pub struct BookingInfo {
    pub room_id: RoomId,
    pub order_id: OrderId,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

/// A hotel: a named collection of rooms.
///
/// Like [`Room`], this is identity plus a handle to the repository.
#[derive(Clone)]
pub struct Hotel<R> {
    id: HotelId,
    repo: R,
    clock: Arc<dyn Clock>,
}

impl<R> std::fmt::Debug for Hotel<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hotel")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl<R: HotelRepository + Clone> Hotel<R> {
    /// Registers a hotel, or returns the existing one untouched.
    pub async fn register(id: HotelId, repo: R, clock: Arc<dyn Clock>) -> Result<Self, HotelError> {
        repo.save_hotel(id.clone()).await?;
        Ok(Self { id, repo, clock })
    }

    /// Loads an existing hotel.
    pub async fn load(id: HotelId, repo: R, clock: Arc<dyn Clock>) -> Result<Self, HotelError> {
        repo.get_hotel(&id).await?;
        Ok(Self { id, repo, clock })
    }

    pub fn id(&self) -> &HotelId {
        &self.id
    }

    /// Adds a room. Adding a room that already exists keeps its bookings.
    pub async fn add_room(&self, room_id: RoomId) -> Result<Room<R>, HotelError> {
        self.repo.save_room(&self.id, room_id.clone()).await?;
        Ok(self.make_room(room_id))
    }

    /// Looks up one of the hotel's rooms.
    pub async fn room(&self, room_id: &RoomId) -> Result<Room<R>, HotelError> {
        self.repo.get_room(&self.id, room_id).await?;
        Ok(self.make_room(room_id.clone()))
    }

    /// Books a room for an order.
    #[tracing::instrument(skip(self), fields(hotel_id = %self.id))]
    pub async fn book_room(&self, info: BookingInfo) -> Result<BookingId, HotelError> {
        let room = self.room(&info.room_id).await.map_err(HotelError::get_room)?;
        let booking_id = room
            .reserve(info.order_id, info.from, info.to)
            .await
            .map_err(HotelError::book_room)?;

        tracing::debug!(%booking_id, room_id = %info.room_id, "room booked");
        Ok(booking_id)
    }

    /// Cancels a booking on one of the hotel's rooms.
    #[tracing::instrument(skip(self), fields(hotel_id = %self.id))]
    pub async fn cancel_booking(
        &self,
        room_id: &RoomId,
        booking_id: BookingId,
    ) -> Result<Booking, HotelError> {
        let room = self.room(room_id).await.map_err(HotelError::get_room)?;
        room.cancel(booking_id)
            .await
            .map_err(HotelError::cancel_booking)
    }

    /// Returns every active booking in this hotel made for `order_id`.
    pub async fn bookings_for_order(&self, order_id: OrderId) -> Result<Vec<Booking>, HotelError> {
        self.repo.list_bookings_for_order(&self.id, order_id).await
    }

    fn make_room(&self, room_id: RoomId) -> Room<R> {
        Room::new(room_id, self.id.clone(), self.repo.clone(), self.clock.clone())
    }
}
