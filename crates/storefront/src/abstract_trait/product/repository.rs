use crate::{
    abstract_trait::AdjustOutcome, domain::requests::product::CreateProductRequest,
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;
pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;
pub type DynProductStockRepository = Arc<dyn ProductStockRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    /// Products ordered by name.
    async fn find_all(&self) -> Result<Vec<ProductModel>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError>;
}

#[async_trait]
pub trait ProductCommandRepositoryTrait {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError>;
}

/// Owner of `stock`. Only the stock ledger holds this handle.
#[async_trait]
pub trait ProductStockRepositoryTrait {
    /// Adds `delta` to `stock` in one indivisible step, provided the result
    /// is not negative.
    async fn adjust_stock(
        &self,
        product_id: i32,
        delta: i32,
    ) -> Result<AdjustOutcome<ProductModel>, RepositoryError>;
}
