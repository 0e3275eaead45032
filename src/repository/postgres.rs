//! PostgreSQL order store.
//!
//! Orders live in the `orders` table created by `migrations/`. The `seq`
//! column keeps list results in insertion order.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::OrderRepository;
use crate::error::RepositoryError;
use crate::models::Order;

#[derive(Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Apply the bundled schema migrations.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

fn classify_insert_error(err: sqlx::Error, order_id: &str) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            RepositoryError::DuplicateKey(order_id.to_string())
        }
        _ => RepositoryError::Database(err),
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn insert_order(&self, order: &Order) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO orders (order_id, namespace, postal_code, town, total)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&order.order_id)
        .bind(&order.namespace)
        .bind(&order.postal_code)
        .bind(&order.town)
        .bind(order.total)
        .execute(&self.pool)
        .await
        .map_err(|e| classify_insert_error(e, &order.order_id))?;
        Ok(())
    }

    async fn get_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT order_id, namespace, postal_code, town, total FROM orders ORDER BY seq",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

    async fn get_namespace_orders(&self, namespace: &str) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT order_id, namespace, postal_code, town, total
            FROM orders
            WHERE namespace = $1
            ORDER BY seq
            "#,
        )
        .bind(namespace)
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

    async fn delete_orders(&self) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM orders").execute(&self.pool).await?;
        Ok(())
    }

    async fn delete_namespace_orders(&self, namespace: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM orders WHERE namespace = $1")
            .bind(namespace)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: &str, namespace: &str) -> Order {
        Order {
            order_id: id.into(),
            namespace: namespace.into(),
            postal_code: "12345".into(),
            town: "Metropolis".into(),
            total: 10.0,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs DATABASE_URL pointing at a PostgreSQL server"]
    async fn unique_violation_maps_to_duplicate_key(pool: PgPool) {
        let repo = PgOrderRepository::new(pool);
        repo.insert_order(&order("o1", "default")).await.unwrap();

        let err = repo.insert_order(&order("o1", "stage")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::DuplicateKey(id) if id == "o1"));
        assert_eq!(repo.get_orders().await.unwrap(), vec![order("o1", "default")]);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs DATABASE_URL pointing at a PostgreSQL server"]
    async fn namespace_queries_keep_insertion_order(pool: PgPool) {
        let repo = PgOrderRepository::new(pool);
        repo.insert_order(&order("b", "stage")).await.unwrap();
        repo.insert_order(&order("a", "default")).await.unwrap();
        repo.insert_order(&order("c", "stage")).await.unwrap();

        let stage = repo.get_namespace_orders("stage").await.unwrap();
        assert_eq!(stage, vec![order("b", "stage"), order("c", "stage")]);

        repo.delete_namespace_orders("stage").await.unwrap();
        assert_eq!(repo.get_orders().await.unwrap(), vec![order("a", "default")]);

        repo.delete_orders().await.unwrap();
        assert!(repo.get_orders().await.unwrap().is_empty());
    }

    #[test]
    fn non_database_errors_are_not_duplicates() {
        let err = classify_insert_error(sqlx::Error::RowNotFound, "o1");
        assert!(matches!(err, RepositoryError::Database(sqlx::Error::RowNotFound)));
    }
}
