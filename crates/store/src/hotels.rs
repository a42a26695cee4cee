use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use common::{BookingId, HotelId, OrderId, RoomId};
use domain::{Booking, HotelError, HotelRepository, HotelSnapshot, RoomSnapshot};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct HotelEntry {
    rooms: BTreeMap<RoomId, Vec<Booking>>,
}

impl HotelEntry {
    fn bookings(&self, hotel_id: &HotelId, room_id: &RoomId) -> Result<&Vec<Booking>, HotelError> {
        self.rooms
            .get(room_id)
            .ok_or_else(|| room_not_found(hotel_id, room_id))
    }

    fn bookings_mut(
        &mut self,
        hotel_id: &HotelId,
        room_id: &RoomId,
    ) -> Result<&mut Vec<Booking>, HotelError> {
        self.rooms
            .get_mut(room_id)
            .ok_or_else(|| room_not_found(hotel_id, room_id))
    }
}

fn room_not_found(hotel_id: &HotelId, room_id: &RoomId) -> HotelError {
    HotelError::RoomNotFound {
        hotel_id: hotel_id.clone(),
        room_id: room_id.clone(),
    }
}

/// In-memory hotel, room and booking store.
///
/// Locking is sharded per hotel: the outer map lock is held only long
/// enough to find a hotel's entry, and every read or write of that
/// hotel's rooms happens under the entry's own lock. Bookings in
/// different hotels never contend.
#[derive(Clone, Default)]
pub struct InMemoryHotelStore {
    hotels: Arc<RwLock<HashMap<HotelId, Arc<RwLock<HotelEntry>>>>>,
}

impl InMemoryHotelStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of registered hotels.
    pub async fn hotel_count(&self) -> usize {
        self.hotels.read().await.len()
    }

    async fn entry(&self, hotel_id: &HotelId) -> Result<Arc<RwLock<HotelEntry>>, HotelError> {
        self.hotels
            .read()
            .await
            .get(hotel_id)
            .cloned()
            .ok_or_else(|| HotelError::HotelNotFound(hotel_id.clone()))
    }
}

#[async_trait]
impl HotelRepository for InMemoryHotelStore {
    async fn save_hotel(&self, hotel_id: HotelId) -> Result<(), HotelError> {
        let mut hotels = self.hotels.write().await;
        hotels.entry(hotel_id).or_default();
        Ok(())
    }

    async fn get_hotel(&self, hotel_id: &HotelId) -> Result<HotelSnapshot, HotelError> {
        let entry = self.entry(hotel_id).await?;
        let entry = entry.read().await;
        Ok(HotelSnapshot {
            id: hotel_id.clone(),
            rooms: entry.rooms.keys().cloned().collect(),
        })
    }

    async fn save_room(&self, hotel_id: &HotelId, room_id: RoomId) -> Result<(), HotelError> {
        let entry = self.entry(hotel_id).await?;
        let mut entry = entry.write().await;
        entry.rooms.entry(room_id).or_default();
        Ok(())
    }

    async fn get_room(
        &self,
        hotel_id: &HotelId,
        room_id: &RoomId,
    ) -> Result<RoomSnapshot, HotelError> {
        let entry = self.entry(hotel_id).await?;
        let entry = entry.read().await;
        let bookings = entry.bookings(hotel_id, room_id)?;
        Ok(RoomSnapshot {
            id: room_id.clone(),
            hotel_id: hotel_id.clone(),
            bookings: bookings.clone(),
        })
    }

    #[tracing::instrument(skip(self, booking), fields(room_id = %booking.room_id(), booking_id = %booking.id()))]
    async fn check_and_reserve(
        &self,
        hotel_id: &HotelId,
        booking: Booking,
    ) -> Result<BookingId, HotelError> {
        let entry = self.entry(hotel_id).await?;
        // The overlap scan and the insert share this guard.
        let mut entry = entry.write().await;
        let bookings = entry.bookings_mut(hotel_id, booking.room_id())?;

        if let Some(existing) = bookings.iter().find(|b| b.conflicts_with(&booking)) {
            metrics::counter!("booking_conflicts_total").increment(1);
            tracing::debug!(conflicting_booking = %existing.id(), "room already booked");
            return Err(HotelError::RoomAlreadyBooked {
                room_id: booking.room_id().clone(),
                from: booking.range().from(),
                to: booking.range().to(),
            });
        }

        let booking_id = booking.id();
        bookings.push(booking);
        metrics::counter!("bookings_reserved_total").increment(1);
        Ok(booking_id)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_booking(
        &self,
        hotel_id: &HotelId,
        room_id: &RoomId,
        booking_id: BookingId,
    ) -> Result<Booking, HotelError> {
        let entry = self.entry(hotel_id).await?;
        let mut entry = entry.write().await;
        let bookings = entry.bookings_mut(hotel_id, room_id)?;

        let index = bookings
            .iter()
            .position(|b| b.id() == booking_id)
            .ok_or(HotelError::BookingNotFound(booking_id))?;
        let removed = bookings.remove(index);
        metrics::counter!("bookings_cancelled_total").increment(1);
        Ok(removed)
    }

    async fn list_bookings_for_order(
        &self,
        hotel_id: &HotelId,
        order_id: OrderId,
    ) -> Result<Vec<Booking>, HotelError> {
        let entry = self.entry(hotel_id).await?;
        let entry = entry.read().await;
        Ok(entry
            .rooms
            .values()
            .flatten()
            .filter(|b| b.order_id() == order_id)
            .cloned()
            .collect())
    }
}
