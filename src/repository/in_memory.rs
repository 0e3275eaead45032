//! InMemoryOrderRepository - Vec-backed order store for development and tests.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::OrderRepository;
use crate::error::RepositoryError;
use crate::models::Order;

/// In-memory order store. Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<Vec<Order>>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn insert_order(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut orders = self
            .orders
            .write()
            .map_err(|_| RepositoryError::LockPoisoned("insert_order"))?;

        if orders.iter().any(|o| o.order_id == order.order_id) {
            return Err(RepositoryError::DuplicateKey(order.order_id.clone()));
        }
        orders.push(order.clone());
        Ok(())
    }

    async fn get_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        let orders = self
            .orders
            .read()
            .map_err(|_| RepositoryError::LockPoisoned("get_orders"))?;
        Ok(orders.clone())
    }

    async fn get_namespace_orders(&self, namespace: &str) -> Result<Vec<Order>, RepositoryError> {
        let orders = self
            .orders
            .read()
            .map_err(|_| RepositoryError::LockPoisoned("get_namespace_orders"))?;
        Ok(orders
            .iter()
            .filter(|o| o.namespace == namespace)
            .cloned()
            .collect())
    }

    async fn delete_orders(&self) -> Result<(), RepositoryError> {
        self.orders
            .write()
            .map_err(|_| RepositoryError::LockPoisoned("delete_orders"))?
            .clear();
        Ok(())
    }

    async fn delete_namespace_orders(&self, namespace: &str) -> Result<(), RepositoryError> {
        self.orders
            .write()
            .map_err(|_| RepositoryError::LockPoisoned("delete_namespace_orders"))?
            .retain(|o| o.namespace != namespace);
        Ok(())
    }
}
