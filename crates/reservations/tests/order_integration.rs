//! Integration tests for order placement against the in-memory stores.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use common::HotelId;
use domain::{BookingRequest, Clock, DateRange, ErrorKind, FixedClock, HotelRepository};
use reservations::{CreateOrder, OrderService, ReservationError};
use store::{InMemoryHotelStore, InMemoryOrderStore, InMemoryUserStore};
use tokio::task::JoinSet;

type Service = OrderService<InMemoryHotelStore, InMemoryOrderStore, InMemoryUserStore>;

const EMAIL: &str = "test@test.com";

fn clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2030, 1, 1, 9, 30, 0).unwrap(),
    ))
}

fn day(d: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 6, 1, 0, 0, 0).unwrap() + Duration::days(d)
}

fn request(hotel: &str, room: &str, from: i64, to: i64) -> BookingRequest {
    let range = DateRange::new(day(from), day(to), clock().as_ref()).unwrap();
    BookingRequest::new(hotel, room, range)
}

async fn setup() -> (Service, InMemoryHotelStore, InMemoryOrderStore) {
    let hotels = InMemoryHotelStore::new();
    let orders = InMemoryOrderStore::new();
    let service = OrderService::new(
        hotels.clone(),
        orders.clone(),
        InMemoryUserStore::new(),
        clock(),
    );

    service.register_user(EMAIL).await.unwrap();
    service.register_hotel("reddison".into()).await.unwrap();
    for room in ["lux", "std"] {
        service
            .add_room("reddison".into(), room.into())
            .await
            .unwrap();
    }
    (service, hotels, orders)
}

fn reddison() -> HotelId {
    HotelId::new("reddison")
}

#[tokio::test]
async fn order_round_trip() {
    let (service, _, orders) = setup().await;

    let order = service
        .create_order(CreateOrder::new(EMAIL, vec![request("reddison", "lux", 0, 2)]))
        .await
        .unwrap();

    let stored = service.get_order(order.id()).await.unwrap();
    assert_eq!(stored, order);
    assert_eq!(orders.order_count().await, 1);

    let booking = &order.bookings()[0];
    assert_eq!(booking.room_id.as_str(), "lux");
    assert_eq!(booking.range.from(), day(0));
    assert_eq!(booking.range.to(), day(2));
}

#[tokio::test]
async fn second_order_for_same_slot_conflicts() {
    let (service, _, orders) = setup().await;

    service
        .create_order(CreateOrder::new(EMAIL, vec![request("reddison", "lux", 0, 2)]))
        .await
        .unwrap();

    let err = service
        .create_order(CreateOrder::new(EMAIL, vec![request("reddison", "lux", 1, 3)]))
        .await
        .unwrap_err();

    assert!(err.is_room_already_booked());
    assert!(matches!(err, ReservationError::Booking { ref hotel_id, .. } if hotel_id.as_str() == "reddison"));
    assert_eq!(orders.order_count().await, 1);
}

#[tokio::test]
async fn adjacent_orders_both_succeed() {
    let (service, _, _) = setup().await;

    for (from, to) in [(0, 2), (2, 4)] {
        service
            .create_order(CreateOrder::new(
                EMAIL,
                vec![request("reddison", "lux", from, to)],
            ))
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn unknown_room_hotel_and_user() {
    let (service, _, orders) = setup().await;

    let err = service
        .create_order(CreateOrder::new(EMAIL, vec![request("reddison", "penthouse", 0, 1)]))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RoomNotFound);

    let err = service
        .create_order(CreateOrder::new(EMAIL, vec![request("nowhere", "lux", 0, 1)]))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::HotelNotFound);

    let err = service
        .create_order(CreateOrder::new(
            "ghost@test.com",
            vec![request("reddison", "lux", 0, 1)],
        ))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UserNotFound);

    assert_eq!(orders.order_count().await, 0);
}

#[tokio::test]
async fn failed_booking_cancels_earlier_ones() {
    let (service, hotels, orders) = setup().await;

    service
        .create_order(CreateOrder::new(EMAIL, vec![request("reddison", "std", 5, 7)]))
        .await
        .unwrap();

    let err = service
        .create_order(CreateOrder::new(
            EMAIL,
            vec![
                request("reddison", "lux", 0, 2),
                request("reddison", "std", 6, 8),
            ],
        ))
        .await
        .unwrap_err();
    assert!(err.is_room_already_booked());
    assert_eq!(orders.order_count().await, 1);

    let lux = hotels
        .get_room(&reddison(), &"lux".into())
        .await
        .unwrap();
    assert!(lux.bookings.is_empty(), "first booking should be released");

    // The released slot is free again.
    service
        .create_order(CreateOrder::new(EMAIL, vec![request("reddison", "lux", 0, 2)]))
        .await
        .unwrap();
}

#[tokio::test]
async fn cancelled_booking_frees_slot() {
    let (service, _, _) = setup().await;

    let order = service
        .create_order(CreateOrder::new(EMAIL, vec![request("reddison", "lux", 0, 2)]))
        .await
        .unwrap();
    let booking = &order.bookings()[0];

    let cancelled = service
        .cancel_booking(&reddison(), &booking.room_id, booking.booking_id)
        .await
        .unwrap();
    assert_eq!(cancelled.id(), booking.booking_id);
    assert!(
        service
            .bookings_for_order(&reddison(), order.id())
            .await
            .unwrap()
            .is_empty()
    );

    service
        .create_order(CreateOrder::new(EMAIL, vec![request("reddison", "lux", 0, 2)]))
        .await
        .unwrap();
}

#[tokio::test]
async fn hotel_snapshot_lists_rooms() {
    let (service, _, _) = setup().await;

    let hotel = service.get_hotel(&reddison()).await.unwrap();
    let rooms: Vec<&str> = hotel.rooms.iter().map(|r| r.as_str()).collect();
    assert_eq!(rooms, ["lux", "std"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_orders_have_one_winner() {
    for _ in 0..20 {
        let (service, hotels, orders) = setup().await;
        let service = Arc::new(service);

        let mut tasks = JoinSet::new();
        for _ in 0..16 {
            let service = service.clone();
            tasks.spawn(async move {
                service
                    .create_order(CreateOrder::new(
                        EMAIL,
                        vec![request("reddison", "lux", 0, 3)],
                    ))
                    .await
            });
        }

        let mut winners = 0;
        while let Some(joined) = tasks.join_next().await {
            match joined.unwrap() {
                Ok(_) => winners += 1,
                Err(e) => assert!(e.is_room_already_booked(), "unexpected error: {e}"),
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(orders.order_count().await, 1);
        let lux = hotels
            .get_room(&reddison(), &"lux".into())
            .await
            .unwrap();
        assert_eq!(lux.bookings.len(), 1);
    }
}
