//! In-memory implementations of the domain repository traits.
//!
//! All stores are cheap-to-clone handles over shared state, safe to use
//! from many tasks at once. Nothing survives a restart.

pub mod hotels;
pub mod orders;
pub mod users;

pub use hotels::InMemoryHotelStore;
pub use orders::InMemoryOrderStore;
pub use users::InMemoryUserStore;
