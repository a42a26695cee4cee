//! Order orchestration for hotel room reservations.
//!
//! [`OrderService`] ties users, hotels and orders together. It reserves the
//! slots of a new order one by one; when one fails, the slots already taken
//! are cancelled again before the error is returned.

pub mod error;
pub mod service;

pub use error::{ReservationError, Result};
pub use service::{CreateOrder, OrderService};
