//! Order storage behind a single capability trait.
//!
//! Route handlers only see `Arc<dyn OrderRepository>`; the backend is picked
//! once at startup.
//! - `in_memory`: process-local store, also used by tests
//! - `postgres`: sqlx-backed store with bundled migrations

pub mod in_memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::RepositoryError;
use crate::models::Order;

pub use in_memory::InMemoryOrderRepository;
pub use postgres::PgOrderRepository;

/// Shared handle injected into the router as an `Extension`.
pub type SharedRepository = Arc<dyn OrderRepository>;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Store a new order. Reports [`RepositoryError::DuplicateKey`] when the
    /// order id is already taken.
    async fn insert_order(&self, order: &Order) -> Result<(), RepositoryError>;

    /// All orders across every namespace, in insertion order.
    async fn get_orders(&self) -> Result<Vec<Order>, RepositoryError>;

    async fn get_namespace_orders(&self, namespace: &str) -> Result<Vec<Order>, RepositoryError>;

    async fn delete_orders(&self) -> Result<(), RepositoryError>;

    async fn delete_namespace_orders(&self, namespace: &str) -> Result<(), RepositoryError>;
}
