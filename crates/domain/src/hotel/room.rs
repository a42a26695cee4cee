use std::sync::Arc;

use chrono::{DateTime, Utc};
use common::{BookingId, HotelId, OrderId, RoomId};

use crate::clock::Clock;
use crate::validation::DateRange;

use super::{Booking, HotelError, HotelRepository, RoomSnapshot};

/// A bookable room.
///
/// Holds only identity; bookings are read from and written to the
/// repository on every call, so a `Room` never goes stale.
#[derive(Clone)]
pub struct Room<R> {
    id: RoomId,
    hotel_id: HotelId,
    repo: R,
    clock: Arc<dyn Clock>,
}

impl<R> std::fmt::Debug for Room<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Room")
            .field("id", &self.id)
            .field("hotel_id", &self.hotel_id)
            .finish_non_exhaustive()
    }
}

impl<R: HotelRepository> Room<R> {
    pub(crate) fn new(id: RoomId, hotel_id: HotelId, repo: R, clock: Arc<dyn Clock>) -> Self {
        Self {
            id,
            hotel_id,
            repo,
            clock,
        }
    }

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    pub fn hotel_id(&self) -> &HotelId {
        &self.hotel_id
    }

    /// Reserves the room for `order_id` over `[from, to)`.
    pub async fn reserve(
        &self,
        order_id: OrderId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<BookingId, HotelError> {
        let range = DateRange::new(from, to, self.clock.as_ref())?;
        let booking = Booking::create(order_id, self.id.clone(), range);
        self.repo.check_and_reserve(&self.hotel_id, booking).await
    }

    /// Cancels one of this room's bookings, freeing its slot.
    pub async fn cancel(&self, booking_id: BookingId) -> Result<Booking, HotelError> {
        self.repo
            .delete_booking(&self.hotel_id, &self.id, booking_id)
            .await
    }

    /// Reads the room's current bookings.
    pub async fn snapshot(&self) -> Result<RoomSnapshot, HotelError> {
        self.repo.get_room(&self.hotel_id, &self.id).await
    }
}
