//! HTTP route handlers.

pub mod health;
pub mod hotels;
pub mod metrics;
pub mod orders;
pub mod users;

use reservations::OrderService;
use store::{InMemoryHotelStore, InMemoryOrderStore, InMemoryUserStore};

/// Order service over the in-memory stores.
pub type Service = OrderService<InMemoryHotelStore, InMemoryOrderStore, InMemoryUserStore>;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub service: Service,
}
