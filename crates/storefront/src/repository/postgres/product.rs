use crate::{
    abstract_trait::{
        AdjustOutcome,
        product::repository::{
            ProductCommandRepositoryTrait, ProductQueryRepositoryTrait, ProductStockRepositoryTrait,
        },
    },
    domain::requests::product::CreateProductRequest,
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info, warn};

const SELECT_PRODUCT: &str = r#"
    SELECT product_id, name, description, price, category, image, stock, created_at
    FROM products
"#;

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_all(&self) -> Result<Vec<ProductModel>, RepositoryError> {
        info!("🔍 Fetching all products");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let products = sqlx::query_as::<_, ProductModel>(&format!(
            "{SELECT_PRODUCT} ORDER BY name ASC, product_id ASC"
        ))
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch products: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(products)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        info!("🆔 Fetching product by ID: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let product =
            sqlx::query_as::<_, ProductModel>(&format!("{SELECT_PRODUCT} WHERE product_id = $1"))
                .bind(id)
                .fetch_optional(&mut *conn)
                .await
                .map_err(RepositoryError::from)?;

        Ok(product)
    }
}

#[derive(Clone)]
pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let product = sqlx::query_as::<_, ProductModel>(
            r#"
            INSERT INTO products (name, description, price, category, image, stock, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, current_timestamp)
            RETURNING product_id, name, description, price, category, image, stock, created_at
            "#,
        )
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.price)
        .bind(&req.category)
        .bind(&req.image)
        .bind(req.stock)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create product '{}': {:?}", req.name, err);
            RepositoryError::from_sqlx(err)
        })?;

        info!("✅ Created product ID {} '{}'", product.product_id, product.name);
        Ok(product)
    }
}

#[derive(Clone)]
pub struct ProductStockRepository {
    db: ConnectionPool,
}

impl ProductStockRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductStockRepositoryTrait for ProductStockRepository {
    async fn adjust_stock(
        &self,
        product_id: i32,
        delta: i32,
    ) -> Result<AdjustOutcome<ProductModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let applied = sqlx::query_as::<_, ProductModel>(
            r#"
            UPDATE products
            SET stock = stock + $2
            WHERE product_id = $1
              AND stock + $2 >= 0
            RETURNING product_id, name, description, price, category, image, stock, created_at
            "#,
        )
        .bind(product_id)
        .bind(delta)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to adjust stock for product {} by {}: {:?}",
                product_id, delta, err
            );
            RepositoryError::from_sqlx(err)
        })?;

        if let Some(product) = applied {
            info!(
                "📦 Product {} stock adjusted by {} to {}",
                product_id, delta, product.stock
            );
            return Ok(AdjustOutcome::Applied(product));
        }

        let current =
            sqlx::query_as::<_, ProductModel>(&format!("{SELECT_PRODUCT} WHERE product_id = $1"))
                .bind(product_id)
                .fetch_optional(&mut *conn)
                .await
                .map_err(RepositoryError::from)?;

        match current {
            Some(product) => {
                warn!(
                    "⚠️ Refused stock adjustment of {} on product {} (stock {})",
                    delta, product_id, product.stock
                );
                Ok(AdjustOutcome::Rejected(product))
            }
            None => Ok(AdjustOutcome::NotFound),
        }
    }
}
