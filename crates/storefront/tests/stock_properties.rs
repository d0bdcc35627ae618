mod common;

use common::*;
use proptest::prelude::*;
use std::collections::HashMap;
use storefront::{
    abstract_trait::order::service::OrderFulfillmentServiceTrait, di::RepositoryDeps,
    domain::errors::OrderError, repository::MemoryStore,
};

fn orders() -> impl Strategy<Value = Vec<Vec<(usize, i32)>>> {
    prop::collection::vec(
        prop::collection::vec((0usize..3, 1i32..5), 1..4),
        1..10,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn final_stock_reflects_only_successful_orders(
        initial in prop::collection::vec(0i32..12, 3),
        submitted in orders(),
    ) {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(4)
            .enable_all()
            .build()
            .unwrap();

        let (expected, actual) = runtime.block_on(async {
            let store = MemoryStore::new();
            let mut ids = Vec::new();
            for (i, &units) in initial.iter().enumerate() {
                ids.push(seed_product(&store, &format!("Item{i}"), 500, units).await.product_id);
            }
            let services = services(RepositoryDeps::memory(store.clone()));

            let handles: Vec<_> = submitted
                .iter()
                .map(|lines| {
                    let fulfillment = services.order_fulfillment.clone();
                    let lines: Vec<(i32, i32)> =
                        lines.iter().map(|&(idx, qty)| (ids[idx], qty)).collect();
                    tokio::spawn(async move { fulfillment.place_order(&order_request(&lines)).await })
                })
                .collect();

            let mut sold: HashMap<i32, i32> = HashMap::new();
            for handle in handles {
                match handle.await.unwrap() {
                    Ok(response) => {
                        for item in response.data.items {
                            *sold.entry(item.product_id).or_default() += item.quantity;
                        }
                    }
                    Err(OrderError::InsufficientStock { .. }) => {}
                    Err(other) => panic!("unexpected error: {other}"),
                }
            }

            let mut expected = Vec::new();
            let mut actual = Vec::new();
            for (i, &id) in ids.iter().enumerate() {
                expected.push(initial[i] - sold.get(&id).copied().unwrap_or(0));
                actual.push(stock(&store, id).await);
            }
            (expected, actual)
        });

        prop_assert!(actual.iter().all(|&units| units >= 0));
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn rejected_order_leaves_every_stock_unchanged(
        initial in prop::collection::vec(0i32..6, 3),
        lines in prop::collection::vec((0usize..3, 1i32..8), 1..5),
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        runtime.block_on(async {
            let store = MemoryStore::new();
            let mut ids = Vec::new();
            for (i, &units) in initial.iter().enumerate() {
                ids.push(seed_product(&store, &format!("Item{i}"), 500, units).await.product_id);
            }
            let services = services(RepositoryDeps::memory(store.clone()));

            let lines: Vec<(i32, i32)> = lines.iter().map(|&(idx, qty)| (ids[idx], qty)).collect();
            let outcome = services.order_fulfillment.place_order(&order_request(&lines)).await;

            if outcome.is_err() {
                for (i, &id) in ids.iter().enumerate() {
                    assert_eq!(stock(&store, id).await, initial[i]);
                }
            }
        });
    }
}
