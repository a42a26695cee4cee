//! Order endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, FixedOffset, Utc};
use common::OrderId;
use domain::{BookingRequest, DateRange, Order};
use reservations::CreateOrder;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ApiError;

// -- Request types --

/// A single-room order. Dates are RFC 3339 midnights in any offset, `to`
/// exclusive.
#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub email: String,
    pub hotel_id: String,
    pub room_id: String,
    pub from: Option<DateTime<FixedOffset>>,
    pub to: Option<DateTime<FixedOffset>>,
}

// -- Response types --

#[derive(Serialize)]
pub struct OrderCreatedResponse {
    pub id: String,
}

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub user_id: String,
    pub bookings: Vec<OrderBookingResponse>,
}

#[derive(Serialize)]
pub struct OrderBookingResponse {
    pub booking_id: String,
    pub hotel_id: String,
    pub room_id: String,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id().to_string(),
            user_id: order.user_id().to_string(),
            bookings: order
                .bookings()
                .iter()
                .map(|b| OrderBookingResponse {
                    booking_id: b.booking_id.to_string(),
                    hotel_id: b.hotel_id.to_string(),
                    room_id: b.room_id.to_string(),
                    from: b.range.from(),
                    to: b.range.to(),
                })
                .collect(),
        }
    }
}

// -- Handlers --

/// POST /orders — book a room for a registered user.
#[tracing::instrument(skip(state, req), fields(hotel_id = %req.hotel_id, room_id = %req.room_id))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderCreatedResponse>), ApiError> {
    let range = DateRange::from_parts(req.from, req.to, state.service.clock())?;
    let booking = BookingRequest::new(req.hotel_id, req.room_id, range);

    let order = state
        .service
        .create_order(CreateOrder::new(req.email, vec![booking]))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(OrderCreatedResponse {
            id: order.id().to_string(),
        }),
    ))
}

/// GET /orders/:id — load an order with its bookings.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id: OrderId = id
        .parse()
        .map_err(|e| ApiError::BadRequest(format!("invalid order id: {e}")))?;

    let order = state.service.get_order(order_id).await?;
    Ok(Json(OrderResponse::from(&order)))
}
