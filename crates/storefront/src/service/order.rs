use crate::{
    abstract_trait::{
        order::{
            repository::{DynOrderCommandRepository, DynOrderQueryRepository},
            service::{OrderFulfillmentServiceTrait, OrderQueryServiceTrait},
        },
        product::repository::DynProductQueryRepository,
    },
    domain::{
        errors::{OrderError, StockError},
        requests::order::{CreateOrderRecordRequest, CreateOrderRequest},
        response::{api::ApiResponse, order::OrderResponse},
    },
    ledger::{StepOutcome, StockLedger, within_deadline},
    model::order::{OrderLineItem, PaymentStatus},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, OperationTracer, TracingContext},
};
use std::collections::{BTreeMap, HashMap};
use tokio::time::Duration;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct OrderQueryService {
    query: DynOrderQueryRepository,
    tracer: OperationTracer,
}

impl OrderQueryService {
    pub fn new(query: DynOrderQueryRepository, registry: &mut Registry) -> Self {
        Self {
            query,
            tracer: OperationTracer::new(
                "order-query-service",
                "order_query_service",
                "OrderQueryService",
                registry,
            ),
        }
    }
}

#[async_trait]
impl OrderQueryServiceTrait for OrderQueryService {
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!("🔍 Finding order id={id}");

        let tracing_ctx = self.tracer.start_tracing(
            "order_find_by_id",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "find_by_id"),
                KeyValue::new("order.id", id.to_string()),
            ],
        );

        match self.query.find_by_id(id).await {
            Ok(Some(order)) => {
                self.tracer
                    .complete_success(&tracing_ctx, Method::Get, "Order retrieved");
                Ok(ApiResponse::success(
                    "Order retrieved successfully",
                    OrderResponse::from(order),
                ))
            }
            Ok(None) => {
                self.tracer
                    .complete_rejected(&tracing_ctx, Method::Get, "Order not found");
                Err(ServiceError::NotFound(format!("Order {id} not found")))
            }
            Err(e) => {
                self.tracer.complete_error(
                    &tracing_ctx,
                    Method::Get,
                    &format!("Order lookup failed: {e}"),
                );
                Err(ServiceError::Repo(e))
            }
        }
    }
}

/// Snapshotted order contents, computed before any stock moves.
#[derive(Debug)]
struct OrderPlan {
    lines: Vec<OrderLineItem>,
    total: i64,
    /// Merged quantity per product, iterated in ascending product id.
    required: BTreeMap<i32, i32>,
    names: HashMap<i32, String>,
}

#[derive(Clone)]
pub struct OrderFulfillmentService {
    products: DynProductQueryRepository,
    stock: StockLedger,
    command: DynOrderCommandRepository,
    ledger_timeout: Duration,
    tracer: OperationTracer,
}

pub struct OrderFulfillmentServiceDeps {
    pub products: DynProductQueryRepository,
    pub stock: StockLedger,
    pub command: DynOrderCommandRepository,
    pub ledger_timeout: Duration,
}

impl OrderFulfillmentService {
    pub fn new(deps: OrderFulfillmentServiceDeps, registry: &mut Registry) -> Self {
        let OrderFulfillmentServiceDeps {
            products,
            stock,
            command,
            ledger_timeout,
        } = deps;

        Self {
            products,
            stock,
            command,
            ledger_timeout,
            tracer: OperationTracer::new(
                "order-fulfillment-service",
                "order_fulfillment_service",
                "OrderFulfillmentService",
                registry,
            ),
        }
    }

    /// Reads every referenced product once and prices the order. Nothing is
    /// written here.
    async fn prepare(&self, req: &CreateOrderRequest) -> Result<OrderPlan, OrderError> {
        if req.items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }

        let mut required: BTreeMap<i32, i32> = BTreeMap::new();
        for item in &req.items {
            if item.quantity <= 0 {
                return Err(OrderError::InvalidQuantity {
                    product_id: item.product_id,
                    quantity: item.quantity,
                });
            }
            let merged = required.entry(item.product_id).or_insert(0);
            *merged = merged
                .checked_add(item.quantity)
                .ok_or(OrderError::InvalidQuantity {
                    product_id: item.product_id,
                    quantity: item.quantity,
                })?;
        }

        let mut snapshots = HashMap::with_capacity(required.len());
        for &product_id in required.keys() {
            let product = self
                .products
                .find_by_id(product_id)
                .await
                .map_err(|e| OrderError::Internal(e.to_string()))?
                .ok_or(OrderError::ProductNotFound(product_id))?;
            snapshots.insert(product_id, product);
        }

        let mut lines = Vec::with_capacity(req.items.len());
        let mut total: i64 = 0;
        for item in &req.items {
            let product = snapshots
                .get(&item.product_id)
                .ok_or(OrderError::ProductNotFound(item.product_id))?;

            let line = OrderLineItem {
                product_id: product.product_id,
                product_name: product.name.clone(),
                quantity: item.quantity,
                price: product.price,
            };
            total = line
                .line_total()
                .and_then(|line_total| total.checked_add(line_total))
                .ok_or(OrderError::TotalOverflow)?;
            lines.push(line);
        }

        let names = snapshots
            .into_iter()
            .map(|(id, product)| (id, product.name))
            .collect();

        Ok(OrderPlan {
            lines,
            total,
            required,
            names,
        })
    }

    /// Decrements every product in ascending id order. On any failure the
    /// decrements already taken are restocked before the error is returned.
    async fn commit(&self, plan: &OrderPlan) -> Result<Vec<(i32, i32)>, OrderError> {
        let mut applied: Vec<(i32, i32)> = Vec::with_capacity(plan.required.len());

        for (&product_id, &quantity) in &plan.required {
            let ledger = self.stock.clone();
            let undo_ledger = self.stock.clone();

            let outcome = within_deadline(
                self.ledger_timeout,
                async move { ledger.decrement(product_id, quantity).await },
                move |_| async move {
                    restock_or_log(&undo_ledger, product_id, quantity).await;
                },
            )
            .await;

            let failure = match outcome {
                StepOutcome::Finished(Ok(_)) => {
                    applied.push((product_id, quantity));
                    continue;
                }
                StepOutcome::Finished(Err(e)) => self.stock_failure(plan, e),
                StepOutcome::TimedOut => OrderError::LedgerTimeout(product_id),
                StepOutcome::Aborted(msg) => {
                    error!("💥 Decrement task for product {} aborted: {}", product_id, msg);
                    OrderError::Internal(msg)
                }
            };

            self.rollback(&applied).await;
            return Err(failure);
        }

        Ok(applied)
    }

    fn stock_failure(&self, plan: &OrderPlan, err: StockError) -> OrderError {
        match err {
            StockError::ProductNotFound(product_id) => OrderError::ProductNotFound(product_id),
            StockError::InsufficientStock {
                product_id,
                requested,
                available,
            } => OrderError::InsufficientStock {
                product_id,
                product_name: plan.names.get(&product_id).cloned().unwrap_or_default(),
                requested,
                available,
                shortfall: requested - available,
            },
            StockError::InvalidQuantity(quantity) => {
                OrderError::Internal(format!("stock ledger refused quantity {quantity}"))
            }
            StockError::Repo(e) => OrderError::Internal(e.to_string()),
        }
    }

    async fn rollback(&self, applied: &[(i32, i32)]) {
        for &(product_id, quantity) in applied.iter().rev() {
            warn!(
                "↩️ Reversing decrement of {} unit(s) on product {}",
                quantity, product_id
            );
            restock_or_log(&self.stock, product_id, quantity).await;
        }
    }

    fn finish_with_error(&self, tracing_ctx: &TracingContext, err: &OrderError) {
        let message = err.to_string();
        match err {
            OrderError::EmptyOrder
            | OrderError::ProductNotFound(_)
            | OrderError::InsufficientStock { .. }
            | OrderError::InvalidQuantity { .. }
            | OrderError::TotalOverflow => {
                self.tracer
                    .complete_rejected(tracing_ctx, Method::Post, &message)
            }
            _ => self.tracer.complete_error(tracing_ctx, Method::Post, &message),
        }
    }
}

async fn restock_or_log(ledger: &StockLedger, product_id: i32, quantity: i32) {
    if let Err(e) = ledger.restock(product_id, quantity).await {
        error!(
            "💥 Could not restock {} unit(s) of product {}: {}",
            quantity, product_id, e
        );
    }
}

impl OrderFulfillmentService {
    async fn fulfill(
        &self,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, OrderError> {
        info!(
            "🛒 Placing order with {} line(s) for {}",
            req.items.len(),
            req.customer_email
        );

        let tracing_ctx = self.tracer.start_tracing(
            "place_order",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "create"),
                KeyValue::new("order.lines", req.items.len().to_string()),
            ],
        );

        let plan = match self.prepare(req).await {
            Ok(plan) => plan,
            Err(e) => {
                self.finish_with_error(&tracing_ctx, &e);
                return Err(e);
            }
        };

        let applied = match self.commit(&plan).await {
            Ok(applied) => applied,
            Err(e) => {
                self.finish_with_error(&tracing_ctx, &e);
                return Err(e);
            }
        };

        let record = CreateOrderRecordRequest {
            items: plan.lines,
            total: plan.total,
            customer_name: req.customer_name.clone(),
            customer_email: req.customer_email.clone(),
            customer_phone: req.customer_phone.clone(),
            delivery_method: req.delivery_method.to_string(),
            address: req.address.clone(),
            payment_method: req.payment_method.clone(),
            payment_status: PaymentStatus::Pending.to_string(),
        };

        let order = match self.command.create_order(&record).await {
            Ok(order) => order,
            Err(e) => {
                warn!("↩️ Order row could not be written, restocking");
                self.rollback(&applied).await;

                let err = OrderError::PersistenceFailed(e.to_string());
                self.finish_with_error(&tracing_ctx, &err);
                return Err(err);
            }
        };

        info!("✅ Order {} placed, total {}", order.order_id, order.total);
        self.tracer
            .complete_success(&tracing_ctx, Method::Post, "Order placed");

        Ok(ApiResponse::success(
            "Order placed successfully",
            OrderResponse::from(order),
        ))
    }
}

#[async_trait]
impl OrderFulfillmentServiceTrait for OrderFulfillmentService {
    /// Runs the placement on its own task. A caller that goes away mid-order
    /// does not stop it.
    async fn place_order(
        &self,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, OrderError> {
        let service = self.clone();
        let req = req.clone();

        tokio::spawn(async move { service.fulfill(&req).await })
            .await
            .map_err(|e| {
                error!("💥 Order placement task failed: {e}");
                OrderError::Internal(e.to_string())
            })?
    }
}
