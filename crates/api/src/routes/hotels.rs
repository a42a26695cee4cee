//! Hotel, room and booking endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::{BookingId, HotelId, RoomId};
use domain::HotelSnapshot;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ApiError;

#[derive(Deserialize)]
pub struct CreateHotelRequest {
    pub id: String,
}

#[derive(Serialize)]
pub struct HotelCreatedResponse {
    pub id: String,
}

/// POST /hotels — register a hotel.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateHotelRequest>,
) -> Result<(StatusCode, Json<HotelCreatedResponse>), ApiError> {
    if req.id.trim().is_empty() {
        return Err(ApiError::BadRequest("hotel id cannot be empty".to_string()));
    }
    state.service.register_hotel(HotelId::new(&req.id)).await?;

    Ok((StatusCode::CREATED, Json(HotelCreatedResponse { id: req.id })))
}

/// GET /hotels/:hotel_id — list a hotel's rooms.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(hotel_id): Path<String>,
) -> Result<Json<HotelSnapshot>, ApiError> {
    let hotel = state.service.get_hotel(&HotelId::new(hotel_id)).await?;
    Ok(Json(hotel))
}

/// PUT /hotels/:hotel_id/rooms/:room_id — add a room to a hotel.
#[tracing::instrument(skip(state))]
pub async fn add_room(
    State(state): State<Arc<AppState>>,
    Path((hotel_id, room_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state
        .service
        .add_room(HotelId::new(hotel_id), RoomId::new(room_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /hotels/:hotel_id/rooms/:room_id/bookings/:booking_id — cancel a booking.
#[tracing::instrument(skip(state))]
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path((hotel_id, room_id, booking_id)): Path<(String, String, String)>,
) -> Result<StatusCode, ApiError> {
    let booking_id: BookingId = booking_id
        .parse()
        .map_err(|e| ApiError::BadRequest(format!("invalid booking id: {e}")))?;

    state
        .service
        .cancel_booking(&HotelId::new(hotel_id), &RoomId::new(room_id), booking_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
