//! HTTP API server for hotel room reservations.
//!
//! Provides REST endpoints for users, hotels, rooms and orders, with
//! structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderName, Request};
use axum::routing::{delete, get, post, put};
use domain::Clock;
use metrics_exporter_prometheus::PrometheusHandle;
use reservations::OrderService;
use store::{InMemoryHotelStore, InMemoryOrderStore, InMemoryUserStore};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::Span;

use routes::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    let router = Router::new()
        .route("/health", get(routes::health::check))
        .route("/users", post(routes::users::create))
        .route("/hotels", post(routes::hotels::create))
        .route("/hotels/{hotel_id}", get(routes::hotels::get))
        .route("/hotels/{hotel_id}/rooms/{room_id}", put(routes::hotels::add_room))
        .route(
            "/hotels/{hotel_id}/rooms/{room_id}/bookings/{booking_id}",
            delete(routes::hotels::cancel_booking),
        )
        .route("/orders", post(routes::orders::create))
        .route("/orders/{id}", get(routes::orders::get))
        .with_state(state)
        .merge(metrics_router);

    with_middleware(router)
}

/// Wraps a router in CORS, request ids, tracing and panic recovery.
fn with_middleware(router: Router) -> Router {
    router
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        // Outermost first: the id is set before the span opens, and a
        // recovered panic still leaves with the id and a trace.
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(REQUEST_ID.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(PropagateRequestIdLayer::new(REQUEST_ID.clone()))
                .layer(CatchPanicLayer::new()),
        )
}

/// Header carrying the per-request id. A client-supplied value is kept.
pub static REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(&REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id,
    )
}

/// Creates the application state backed by the in-memory stores.
pub fn create_default_state(clock: Arc<dyn Clock>) -> Arc<AppState> {
    let service = OrderService::new(
        InMemoryHotelStore::new(),
        InMemoryOrderStore::new(),
        InMemoryUserStore::new(),
        clock,
    );
    Arc::new(AppState { service })
}
