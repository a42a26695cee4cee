use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::OrderId;
use domain::{Order, OrderError, OrderRepository};
use tokio::sync::RwLock;

/// In-memory order store.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderStore {
    async fn save_order(&self, order: Order) -> Result<(), OrderError> {
        self.orders.write().await.insert(order.id(), order);
        Ok(())
    }

    async fn get_order(&self, order_id: OrderId) -> Result<Order, OrderError> {
        self.orders
            .read()
            .await
            .get(&order_id)
            .cloned()
            .ok_or(OrderError::OrderNotFound(order_id))
    }
}
