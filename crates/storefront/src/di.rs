use crate::{
    abstract_trait::{
        booking::{
            repository::{DynBookingCommandRepository, DynBookingQueryRepository},
            service::DynBookingService,
        },
        event::{
            repository::{
                DynEventCapacityRepository, DynEventCommandRepository, DynEventQueryRepository,
            },
            service::{DynEventCommandService, DynEventQueryService},
        },
        order::{
            repository::{DynOrderCommandRepository, DynOrderQueryRepository},
            service::{DynOrderFulfillmentService, DynOrderQueryService},
        },
        product::{
            repository::{
                DynProductCommandRepository, DynProductQueryRepository, DynProductStockRepository,
            },
            service::{DynProductCommandService, DynProductQueryService},
        },
    },
    ledger::{CapacityLedger, StockLedger},
    repository::{
        MemoryStore,
        postgres::{
            BookingCommandRepository, BookingQueryRepository, EventCapacityRepository,
            EventCommandRepository, EventQueryRepository, OrderCommandRepository,
            OrderQueryRepository, ProductCommandRepository, ProductQueryRepository,
            ProductStockRepository,
        },
    },
    service::{
        BookingService, BookingServiceDeps, EventCommandService, EventQueryService,
        OrderFulfillmentService, OrderFulfillmentServiceDeps, OrderQueryService,
        ProductCommandService, ProductQueryService,
    },
};
use prometheus_client::registry::Registry;
use shared::config::ConnectionPool;
use std::{fmt, sync::Arc};
use tokio::time::Duration;

/// One handle per repository seam. The counter repositories are only
/// passed on to the ledgers.
#[derive(Clone)]
pub struct RepositoryDeps {
    pub event_query: DynEventQueryRepository,
    pub event_command: DynEventCommandRepository,
    pub event_capacity: DynEventCapacityRepository,
    pub booking_query: DynBookingQueryRepository,
    pub booking_command: DynBookingCommandRepository,
    pub product_query: DynProductQueryRepository,
    pub product_command: DynProductCommandRepository,
    pub product_stock: DynProductStockRepository,
    pub order_query: DynOrderQueryRepository,
    pub order_command: DynOrderCommandRepository,
}

impl RepositoryDeps {
    pub fn postgres(pool: ConnectionPool) -> Self {
        Self {
            event_query: Arc::new(EventQueryRepository::new(pool.clone())),
            event_command: Arc::new(EventCommandRepository::new(pool.clone())),
            event_capacity: Arc::new(EventCapacityRepository::new(pool.clone())),
            booking_query: Arc::new(BookingQueryRepository::new(pool.clone())),
            booking_command: Arc::new(BookingCommandRepository::new(pool.clone())),
            product_query: Arc::new(ProductQueryRepository::new(pool.clone())),
            product_command: Arc::new(ProductCommandRepository::new(pool.clone())),
            product_stock: Arc::new(ProductStockRepository::new(pool.clone())),
            order_query: Arc::new(OrderQueryRepository::new(pool.clone())),
            order_command: Arc::new(OrderCommandRepository::new(pool)),
        }
    }

    pub fn memory(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            event_query: store.clone(),
            event_command: store.clone(),
            event_capacity: store.clone(),
            booking_query: store.clone(),
            booking_command: store.clone(),
            product_query: store.clone(),
            product_command: store.clone(),
            product_stock: store.clone(),
            order_query: store.clone(),
            order_command: store,
        }
    }
}

#[derive(Clone)]
pub struct DependenciesInject {
    pub event_query: DynEventQueryService,
    pub event_command: DynEventCommandService,
    pub booking: DynBookingService,
    pub product_query: DynProductQueryService,
    pub product_command: DynProductCommandService,
    pub order_query: DynOrderQueryService,
    pub order_fulfillment: DynOrderFulfillmentService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("event_query", &"EventQueryService")
            .field("event_command", &"EventCommandService")
            .field("booking", &"BookingService")
            .field("product_query", &"ProductQueryService")
            .field("product_command", &"ProductCommandService")
            .field("order_query", &"OrderQueryService")
            .field("order_fulfillment", &"OrderFulfillmentService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(repos: RepositoryDeps, ledger_timeout: Duration, registry: &mut Registry) -> Self {
        let RepositoryDeps {
            event_query,
            event_command,
            event_capacity,
            booking_query,
            booking_command,
            product_query,
            product_command,
            product_stock,
            order_query,
            order_command,
        } = repos;

        let capacity = CapacityLedger::new(event_capacity);
        let stock = StockLedger::new(product_stock);

        let event_query: DynEventQueryService =
            Arc::new(EventQueryService::new(event_query, booking_query, registry));
        let event_command: DynEventCommandService =
            Arc::new(EventCommandService::new(event_command, registry));

        let booking: DynBookingService = Arc::new(BookingService::new(
            BookingServiceDeps {
                capacity,
                command: booking_command,
                ledger_timeout,
            },
            registry,
        ));

        let order_fulfillment: DynOrderFulfillmentService = Arc::new(OrderFulfillmentService::new(
            OrderFulfillmentServiceDeps {
                products: product_query.clone(),
                stock,
                command: order_command,
                ledger_timeout,
            },
            registry,
        ));

        let product_query: DynProductQueryService =
            Arc::new(ProductQueryService::new(product_query, registry));
        let product_command: DynProductCommandService =
            Arc::new(ProductCommandService::new(product_command, registry));

        let order_query: DynOrderQueryService =
            Arc::new(OrderQueryService::new(order_query, registry));

        Self {
            event_query,
            event_command,
            booking,
            product_query,
            product_command,
            order_query,
            order_fulfillment,
        }
    }
}
