//! Order service coordinating users, hotels and orders.

use std::sync::Arc;
use std::time::Instant;

use common::{BookingId, HotelId, OrderId, RoomId};
use domain::{
    Booking, BookingInfo, BookingRequest, Clock, Hotel, HotelRepository, HotelSnapshot, Order,
    OrderBooking, OrderError, OrderRepository, User, UserRepository,
};

use crate::error::{ReservationError, Result};

/// Command to place an order for one user.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub user_email: String,
    pub bookings: Vec<BookingRequest>,
}

impl CreateOrder {
    pub fn new(user_email: impl Into<String>, bookings: Vec<BookingRequest>) -> Self {
        Self {
            user_email: user_email.into(),
            bookings,
        }
    }
}

/// Service for placing and managing orders.
///
/// Every booking of an order is reserved through the hotel repository's
/// atomic check-and-reserve. If any of them fails, the ones already taken are
/// cancelled again before the error is returned. The cancellation is not
/// atomic with the failure: other readers may see those bookings briefly,
/// and a cancel that itself fails leaves its booking in place (logged and
/// counted in `order_compensation_failures_total`).
pub struct OrderService<H, O, U> {
    hotels: H,
    orders: O,
    users: U,
    clock: Arc<dyn Clock>,
}

impl<H, O, U> OrderService<H, O, U>
where
    H: HotelRepository + Clone,
    O: OrderRepository,
    U: UserRepository,
{
    pub fn new(hotels: H, orders: O, users: U, clock: Arc<dyn Clock>) -> Self {
        Self {
            hotels,
            orders,
            users,
            clock,
        }
    }

    /// Clock used to validate booking dates.
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Places an order, reserving each requested booking in turn.
    ///
    /// On failure, bookings already made for this order are cancelled
    /// newest first and the original error is returned.
    #[tracing::instrument(skip(self, cmd), fields(user_email = %cmd.user_email, bookings = cmd.bookings.len()))]
    pub async fn create_order(&self, cmd: CreateOrder) -> Result<Order> {
        let start = Instant::now();
        let result = self.place_order(cmd).await;

        metrics::histogram!("order_creation_duration_seconds")
            .record(start.elapsed().as_secs_f64());
        match &result {
            Ok(order) => {
                metrics::counter!("orders_created_total").increment(1);
                tracing::info!(order_id = %order.id(), "order created");
            }
            Err(e) => {
                metrics::counter!("orders_failed_total").increment(1);
                tracing::warn!(error = %e, "order failed");
            }
        }
        result
    }

    async fn place_order(&self, cmd: CreateOrder) -> Result<Order> {
        let user = self
            .users
            .get_user(&cmd.user_email)
            .await
            .map_err(ReservationError::User)?;

        if cmd.bookings.is_empty() {
            return Err(ReservationError::Order(OrderError::NoBookings));
        }

        let order_id = OrderId::new();
        let mut reserved: Vec<OrderBooking> = Vec::with_capacity(cmd.bookings.len());

        for request in cmd.bookings {
            match self.reserve(order_id, &request).await {
                Ok(booking_id) => reserved.push(request.reserved(booking_id)),
                Err(e) => {
                    self.compensate(order_id, &reserved).await;
                    return Err(e);
                }
            }
        }

        let order = match Order::new(order_id, user.id(), reserved.clone()) {
            Ok(order) => order,
            Err(e) => {
                self.compensate(order_id, &reserved).await;
                return Err(ReservationError::Order(e));
            }
        };

        if let Err(e) = self.orders.save_order(order.clone()).await {
            self.compensate(order_id, &reserved).await;
            return Err(ReservationError::SaveOrder(e));
        }

        Ok(order)
    }

    async fn reserve(&self, order_id: OrderId, request: &BookingRequest) -> Result<BookingId> {
        let hotel = self.hotel(request.hotel_id().clone()).await?;
        let range = request.range();
        hotel
            .book_room(BookingInfo {
                room_id: request.room_id().clone(),
                order_id,
                from: range.from(),
                to: range.to(),
            })
            .await
            .map_err(|source| ReservationError::Booking {
                hotel_id: request.hotel_id().clone(),
                source,
            })
    }

    /// Cancels bookings taken for a failed order, newest first.
    async fn compensate(&self, order_id: OrderId, reserved: &[OrderBooking]) {
        if reserved.is_empty() {
            return;
        }
        tracing::info!(%order_id, bookings = reserved.len(), "compensating order");
        metrics::counter!("order_compensations_total").increment(1);

        for booking in reserved.iter().rev() {
            if let Err(e) = self
                .cancel_booking(&booking.hotel_id, &booking.room_id, booking.booking_id)
                .await
            {
                metrics::counter!("order_compensation_failures_total").increment(1);
                tracing::error!(
                    %order_id,
                    booking_id = %booking.booking_id,
                    error = %e,
                    "compensation step failed"
                );
            }
        }
    }

    /// Loads a persisted order.
    pub async fn get_order(&self, order_id: OrderId) -> Result<Order> {
        self.orders
            .get_order(order_id)
            .await
            .map_err(ReservationError::Order)
    }

    /// Cancels a single booking, freeing its slot.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_booking(
        &self,
        hotel_id: &HotelId,
        room_id: &RoomId,
        booking_id: BookingId,
    ) -> Result<Booking> {
        let hotel = self.hotel(hotel_id.clone()).await?;
        hotel
            .cancel_booking(room_id, booking_id)
            .await
            .map_err(ReservationError::Cancel)
    }

    /// Registers a user. A second registration with the same email replaces
    /// the first.
    #[tracing::instrument(skip(self))]
    pub async fn register_user(&self, email: &str) -> Result<User> {
        let user = User::create(email).map_err(ReservationError::RegisterUser)?;
        self.users
            .save_user(user.clone())
            .await
            .map_err(ReservationError::RegisterUser)?;
        Ok(user)
    }

    /// Registers a hotel. Registering an existing hotel keeps its rooms.
    #[tracing::instrument(skip(self))]
    pub async fn register_hotel(&self, hotel_id: HotelId) -> Result<()> {
        Hotel::register(hotel_id, self.hotels.clone(), self.clock.clone())
            .await
            .map_err(ReservationError::Hotel)?;
        Ok(())
    }

    /// Adds a room to an existing hotel.
    #[tracing::instrument(skip(self))]
    pub async fn add_room(&self, hotel_id: HotelId, room_id: RoomId) -> Result<()> {
        let hotel = self.hotel(hotel_id).await?;
        hotel
            .add_room(room_id)
            .await
            .map_err(ReservationError::Hotel)?;
        Ok(())
    }

    /// Returns the hotel's id and room ids.
    pub async fn get_hotel(&self, hotel_id: &HotelId) -> Result<HotelSnapshot> {
        self.hotels
            .get_hotel(hotel_id)
            .await
            .map_err(ReservationError::Hotel)
    }

    /// Returns the bookings held in `hotel_id` for `order_id`.
    pub async fn bookings_for_order(
        &self,
        hotel_id: &HotelId,
        order_id: OrderId,
    ) -> Result<Vec<Booking>> {
        let hotel = self.hotel(hotel_id.clone()).await?;
        hotel
            .bookings_for_order(order_id)
            .await
            .map_err(ReservationError::Hotel)
    }

    async fn hotel(&self, hotel_id: HotelId) -> Result<Hotel<H>> {
        Hotel::load(hotel_id, self.hotels.clone(), self.clock.clone())
            .await
            .map_err(ReservationError::Hotel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use domain::{DateRange, ErrorKind, FixedClock, HotelError, RoomSnapshot};
    use store::{InMemoryHotelStore, InMemoryOrderStore, InMemoryUserStore};

    /// Order store that refuses every write.
    #[derive(Clone, Default)]
    struct BrokenOrderStore;

    #[async_trait]
    impl OrderRepository for BrokenOrderStore {
        async fn save_order(&self, order: Order) -> std::result::Result<(), OrderError> {
            Err(OrderError::OrderNotFound(order.id()))
        }

        async fn get_order(&self, order_id: OrderId) -> std::result::Result<Order, OrderError> {
            Err(OrderError::OrderNotFound(order_id))
        }
    }

    /// Hotel store whose cancellations always fail.
    #[derive(Clone, Default)]
    struct StuckCancelStore(InMemoryHotelStore);

    #[async_trait]
    impl HotelRepository for StuckCancelStore {
        async fn save_hotel(&self, hotel_id: HotelId) -> std::result::Result<(), HotelError> {
            self.0.save_hotel(hotel_id).await
        }

        async fn get_hotel(
            &self,
            hotel_id: &HotelId,
        ) -> std::result::Result<HotelSnapshot, HotelError> {
            self.0.get_hotel(hotel_id).await
        }

        async fn save_room(
            &self,
            hotel_id: &HotelId,
            room_id: RoomId,
        ) -> std::result::Result<(), HotelError> {
            self.0.save_room(hotel_id, room_id).await
        }

        async fn get_room(
            &self,
            hotel_id: &HotelId,
            room_id: &RoomId,
        ) -> std::result::Result<RoomSnapshot, HotelError> {
            self.0.get_room(hotel_id, room_id).await
        }

        async fn check_and_reserve(
            &self,
            hotel_id: &HotelId,
            booking: Booking,
        ) -> std::result::Result<BookingId, HotelError> {
            self.0.check_and_reserve(hotel_id, booking).await
        }

        async fn delete_booking(
            &self,
            _hotel_id: &HotelId,
            _room_id: &RoomId,
            booking_id: BookingId,
        ) -> std::result::Result<Booking, HotelError> {
            Err(HotelError::BookingNotFound(booking_id))
        }

        async fn list_bookings_for_order(
            &self,
            hotel_id: &HotelId,
            order_id: OrderId,
        ) -> std::result::Result<Vec<Booking>, HotelError> {
            self.0.list_bookings_for_order(hotel_id, order_id).await
        }
    }

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2030, 1, 1, 9, 30, 0).unwrap(),
        ))
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 6, d, 0, 0, 0).unwrap()
    }

    fn request(room: &str, from: u32, to: u32) -> BookingRequest {
        let range = DateRange::new(day(from), day(to), clock().as_ref()).unwrap();
        BookingRequest::new("reddison", room, range)
    }

    async fn setup<O: OrderRepository>(
        orders: O,
    ) -> (OrderService<InMemoryHotelStore, O, InMemoryUserStore>, InMemoryHotelStore) {
        let hotels = InMemoryHotelStore::new();
        let service = OrderService::new(hotels.clone(), orders, InMemoryUserStore::new(), clock());
        service.register_user("test@test.com").await.unwrap();
        service.register_hotel("reddison".into()).await.unwrap();
        service
            .add_room("reddison".into(), "lux".into())
            .await
            .unwrap();
        (service, hotels)
    }

    #[tokio::test]
    async fn create_order_reserves_and_saves() {
        let (service, _) = setup(InMemoryOrderStore::new()).await;

        let order = service
            .create_order(CreateOrder::new("test@test.com", vec![request("lux", 1, 3)]))
            .await
            .unwrap();

        assert_eq!(order.bookings().len(), 1);
        assert_eq!(service.get_order(order.id()).await.unwrap(), order);

        let held = service
            .bookings_for_order(&"reddison".into(), order.id())
            .await
            .unwrap();
        assert_eq!(held.len(), 1);
        assert_eq!(held[0].id(), order.bookings()[0].booking_id);
    }

    #[tokio::test]
    async fn empty_order_is_rejected_before_reserving() {
        let (service, _) = setup(InMemoryOrderStore::new()).await;

        let err = service
            .create_order(CreateOrder::new("test@test.com", vec![]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOrder);
    }

    #[tokio::test]
    async fn unknown_user_is_rejected() {
        let (service, _) = setup(InMemoryOrderStore::new()).await;

        let err = service
            .create_order(CreateOrder::new("nobody@test.com", vec![request("lux", 1, 3)]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UserNotFound);
        assert!(err.to_string().starts_with("could not get user"));
    }

    #[tokio::test]
    async fn failed_save_releases_bookings() {
        let (service, hotels) = setup(BrokenOrderStore).await;

        let err = service
            .create_order(CreateOrder::new("test@test.com", vec![request("lux", 1, 3)]))
            .await
            .unwrap_err();
        assert!(matches!(err, ReservationError::SaveOrder(_)));

        let room = hotels
            .get_room(&"reddison".into(), &"lux".into())
            .await
            .unwrap();
        assert!(room.bookings.is_empty());
    }

    #[tokio::test]
    async fn failed_cancel_during_compensation_keeps_original_error() {
        let hotels = StuckCancelStore::default();
        let service = OrderService::new(
            hotels.clone(),
            InMemoryOrderStore::new(),
            InMemoryUserStore::new(),
            clock(),
        );
        service.register_user("test@test.com").await.unwrap();
        service.register_hotel("reddison".into()).await.unwrap();
        service
            .add_room("reddison".into(), "lux".into())
            .await
            .unwrap();

        let err = service
            .create_order(CreateOrder::new(
                "test@test.com",
                vec![request("lux", 1, 3), request("lux", 2, 4)],
            ))
            .await
            .unwrap_err();
        assert!(err.is_room_already_booked());

        // The stuck cancel leaves the first booking behind.
        let room = hotels
            .get_room(&"reddison".into(), &"lux".into())
            .await
            .unwrap();
        assert_eq!(room.bookings.len(), 1);
    }

    #[tokio::test]
    async fn register_user_rejects_bad_email() {
        let (service, _) = setup(InMemoryOrderStore::new()).await;

        let err = service.register_user("not-an-email").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidUser);
    }

    #[tokio::test]
    async fn add_room_to_missing_hotel() {
        let (service, _) = setup(InMemoryOrderStore::new()).await;

        let err = service
            .add_room("nowhere".into(), "lux".into())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::HotelNotFound);
    }

    #[tokio::test]
    async fn cancel_unknown_booking() {
        let (service, _) = setup(InMemoryOrderStore::new()).await;

        let err = service
            .cancel_booking(&"reddison".into(), &"lux".into(), BookingId::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BookingNotFound);
    }
}
