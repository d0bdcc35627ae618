use crate::{
    abstract_trait::order::repository::{OrderCommandRepositoryTrait, OrderQueryRepositoryTrait},
    domain::requests::order::CreateOrderRecordRequest,
    model::order::Order as OrderModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::types::Json;
use tracing::{error, info};

#[derive(Clone)]
pub struct OrderQueryRepository {
    db: ConnectionPool,
}

impl OrderQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for OrderQueryRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<OrderModel>, RepositoryError> {
        info!("🆔 Fetching order by ID: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let order = sqlx::query_as::<_, OrderModel>(
            r#"
            SELECT order_id, items, total, customer_name, customer_email, customer_phone,
                   delivery_method, address, payment_method, payment_status, created_at
            FROM orders
            WHERE order_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch order {}: {:?}", id, e);
            RepositoryError::from(e)
        })?;

        Ok(order)
    }
}

#[derive(Clone)]
pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create_order(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<OrderModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let order = sqlx::query_as::<_, OrderModel>(
            r#"
            INSERT INTO orders (items, total, customer_name, customer_email, customer_phone,
                                delivery_method, address, payment_method, payment_status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, current_timestamp)
            RETURNING order_id, items, total, customer_name, customer_email, customer_phone,
                      delivery_method, address, payment_method, payment_status, created_at
            "#,
        )
        .bind(Json(&req.items))
        .bind(req.total)
        .bind(&req.customer_name)
        .bind(&req.customer_email)
        .bind(&req.customer_phone)
        .bind(&req.delivery_method)
        .bind(&req.address)
        .bind(&req.payment_method)
        .bind(&req.payment_status)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to create order for {}: {:?}",
                req.customer_email, err
            );
            RepositoryError::from_sqlx(err)
        })?;

        info!(
            "✅ Created order ID {} with {} line(s), total {}",
            order.order_id,
            order.items.len(),
            order.total
        );
        Ok(order)
    }
}
