use crate::{
    abstract_trait::{AdjustOutcome, product::repository::DynProductStockRepository},
    domain::errors::StockError,
    model::product::Product as ProductModel,
};
use tracing::{info, warn};

/// Per-product stock counter. Each call touches exactly one product; making
/// several decrements succeed or fail together is up to the caller.
#[derive(Clone)]
pub struct StockLedger {
    repo: DynProductStockRepository,
}

impl StockLedger {
    pub fn new(repo: DynProductStockRepository) -> Self {
        Self { repo }
    }

    /// Takes `quantity` units, returning the product as it is afterwards.
    pub async fn decrement(&self, product_id: i32, quantity: i32) -> Result<ProductModel, StockError> {
        if quantity <= 0 {
            return Err(StockError::InvalidQuantity(quantity));
        }

        match self.repo.adjust_stock(product_id, -quantity).await? {
            AdjustOutcome::Applied(product) => {
                info!(
                    "📦 Took {} unit(s) of product {}, {} left",
                    quantity, product_id, product.stock
                );
                Ok(product)
            }
            AdjustOutcome::Rejected(product) => {
                // the row may be read after a concurrent restock
                let available = product.stock.min(quantity - 1);
                warn!(
                    "⚠️ Product {} has {} unit(s), {} requested",
                    product_id, available, quantity
                );
                Err(StockError::InsufficientStock {
                    product_id,
                    requested: quantity,
                    available,
                })
            }
            AdjustOutcome::NotFound => Err(StockError::ProductNotFound(product_id)),
        }
    }

    /// Puts back units taken by an earlier `decrement`.
    pub async fn restock(&self, product_id: i32, quantity: i32) -> Result<ProductModel, StockError> {
        if quantity <= 0 {
            return Err(StockError::InvalidQuantity(quantity));
        }

        match self.repo.adjust_stock(product_id, quantity).await? {
            AdjustOutcome::Applied(product) => {
                info!(
                    "↩️ Returned {} unit(s) to product {}, {} left",
                    quantity, product_id, product.stock
                );
                Ok(product)
            }
            // only reachable on i32 overflow
            AdjustOutcome::Rejected(product) => Err(StockError::InsufficientStock {
                product_id,
                requested: -quantity,
                available: product.stock,
            }),
            AdjustOutcome::NotFound => Err(StockError::ProductNotFound(product_id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::product::repository::{
            ProductCommandRepositoryTrait, ProductQueryRepositoryTrait,
        },
        domain::requests::product::CreateProductRequest,
        repository::MemoryStore,
    };
    use std::sync::Arc;

    async fn seeded(stock: i32) -> (MemoryStore, StockLedger, i32) {
        let store = MemoryStore::new();
        let product = store
            .create_product(&CreateProductRequest {
                name: "Speckled bowl".into(),
                description: "Hand thrown".into(),
                price: 3100,
                category: "ceramics".into(),
                image: "/img/bowl.jpg".into(),
                stock,
            })
            .await
            .unwrap();
        let ledger = StockLedger::new(Arc::new(store.clone()));
        (store, ledger, product.product_id)
    }

    async fn stock_of(store: &MemoryStore, product_id: i32) -> i32 {
        ProductQueryRepositoryTrait::find_by_id(store, product_id)
            .await
            .unwrap()
            .unwrap()
            .stock
    }

    #[tokio::test]
    async fn decrement_reports_shortfall_without_touching_stock() {
        let (store, ledger, product_id) = seeded(1).await;

        let err = ledger.decrement(product_id, 2).await.unwrap_err();
        assert_eq!(err.shortfall(), Some(1));
        assert_eq!(stock_of(&store, product_id).await, 1);
    }

    #[tokio::test]
    async fn decrement_to_zero_then_restock() {
        let (store, ledger, product_id) = seeded(3).await;

        assert_eq!(ledger.decrement(product_id, 3).await.unwrap().stock, 0);
        assert_eq!(ledger.restock(product_id, 3).await.unwrap().stock, 3);
        assert_eq!(stock_of(&store, product_id).await, 3);
    }

    #[tokio::test]
    async fn rejects_invalid_quantities_and_missing_products() {
        let (_, ledger, product_id) = seeded(3).await;

        assert!(matches!(
            ledger.decrement(product_id, 0).await,
            Err(StockError::InvalidQuantity(0))
        ));
        assert!(matches!(
            ledger.restock(product_id, -1).await,
            Err(StockError::InvalidQuantity(-1))
        ));
        assert!(matches!(
            ledger.decrement(product_id + 1, 1).await,
            Err(StockError::ProductNotFound(_))
        ));
    }

    /// Refuses every decrement but reports the row as it looks after a
    /// restock landed in between.
    struct RestockedMeanwhile;

    #[async_trait::async_trait]
    impl crate::abstract_trait::product::repository::ProductStockRepositoryTrait
        for RestockedMeanwhile
    {
        async fn adjust_stock(
            &self,
            product_id: i32,
            _delta: i32,
        ) -> Result<AdjustOutcome<ProductModel>, shared::errors::RepositoryError> {
            Ok(AdjustOutcome::Rejected(ProductModel {
                product_id,
                name: "Speckled bowl".into(),
                description: "Hand thrown".into(),
                price: 3100,
                category: "ceramics".into(),
                image: "/img/bowl.jpg".into(),
                stock: 10,
                created_at: None,
            }))
        }
    }

    #[tokio::test]
    async fn refusal_always_reports_a_positive_shortfall() {
        let ledger = StockLedger::new(Arc::new(RestockedMeanwhile));

        let err = ledger.decrement(4, 3).await.unwrap_err();
        assert!(matches!(
            err,
            StockError::InsufficientStock {
                product_id: 4,
                requested: 3,
                available: 2,
            }
        ));
        assert_eq!(err.shortfall(), Some(1));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_decrements_never_oversell() {
        let (store, ledger, product_id) = seeded(25).await;

        let handles: Vec<_> = (0..40)
            .map(|i| {
                let ledger = ledger.clone();
                let quantity = 1 + (i % 3);
                tokio::spawn(async move { (quantity, ledger.decrement(product_id, quantity).await) })
            })
            .collect();

        let mut sold = 0;
        for handle in handles {
            let (quantity, outcome) = handle.await.unwrap();
            match outcome {
                Ok(_) => sold += quantity,
                Err(StockError::InsufficientStock { .. }) => {}
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        let left = stock_of(&store, product_id).await;
        assert!(left >= 0);
        assert_eq!(left, 25 - sold);
    }
}
