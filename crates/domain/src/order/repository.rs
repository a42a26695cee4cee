use async_trait::async_trait;
use common::OrderId;

use super::{Order, OrderError};

/// Storage port for orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persists an order, replacing any order with the same id.
    async fn save_order(&self, order: Order) -> Result<(), OrderError>;

    /// Looks up an order by id.
    async fn get_order(&self, order_id: OrderId) -> Result<Order, OrderError>;
}
