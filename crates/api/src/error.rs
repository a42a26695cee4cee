//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::{DateRangeError, ErrorKind};
use reservations::ReservationError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from the client.
    BadRequest(String),
    /// Error from the order service.
    Reservation(ReservationError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Reservation(err) => reservation_error_to_response(err),
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::HotelNotFound
        | ErrorKind::RoomNotFound
        | ErrorKind::BookingNotFound
        | ErrorKind::UserNotFound
        | ErrorKind::OrderNotFound => StatusCode::NOT_FOUND,
        ErrorKind::InvalidBooking | ErrorKind::InvalidOrder | ErrorKind::InvalidUser => {
            StatusCode::BAD_REQUEST
        }
        ErrorKind::RoomAlreadyBooked => StatusCode::CONFLICT,
    }
}

fn reservation_error_to_response(err: ReservationError) -> (StatusCode, String) {
    // Persistence failures are server-side whatever their kind.
    if let ReservationError::SaveOrder(_) = err {
        tracing::error!(error = %err, "internal server error");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal server error".to_string(),
        );
    }
    (status_for(err.kind()), err.to_string())
}

impl From<ReservationError> for ApiError {
    fn from(err: ReservationError) -> Self {
        ApiError::Reservation(err)
    }
}

impl From<DateRangeError> for ApiError {
    fn from(err: DateRangeError) -> Self {
        ApiError::BadRequest(format!("invalid booking: {err}"))
    }
}
