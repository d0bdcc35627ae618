use crate::{
    abstract_trait::product::{
        repository::{DynProductCommandRepository, DynProductQueryRepository},
        service::{ProductCommandServiceTrait, ProductQueryServiceTrait},
    },
    domain::{
        requests::product::CreateProductRequest,
        response::{api::ApiResponse, product::ProductResponse},
    },
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, OperationTracer},
};
use tracing::info;

#[derive(Clone)]
pub struct ProductQueryService {
    query: DynProductQueryRepository,
    tracer: OperationTracer,
}

impl ProductQueryService {
    pub fn new(query: DynProductQueryRepository, registry: &mut Registry) -> Self {
        Self {
            query,
            tracer: OperationTracer::new(
                "product-query-service",
                "product_query_service",
                "ProductQueryService",
                registry,
            ),
        }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(&self) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        info!("🔍 Listing products");

        let tracing_ctx = self.tracer.start_tracing(
            "product_find_all",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_all"),
            ],
        );

        match self.query.find_all().await {
            Ok(products) => {
                let data: Vec<ProductResponse> =
                    products.into_iter().map(ProductResponse::from).collect();
                self.tracer.complete_success(
                    &tracing_ctx,
                    Method::Get,
                    &format!("Retrieved {} products", data.len()),
                );
                Ok(ApiResponse::success("Products retrieved successfully", data))
            }
            Err(e) => {
                self.tracer.complete_error(
                    &tracing_ctx,
                    Method::Get,
                    &format!("Listing products failed: {e}"),
                );
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🔍 Finding product id={id}");

        let tracing_ctx = self.tracer.start_tracing(
            "product_find_by_id",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_by_id"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        match self.query.find_by_id(id).await {
            Ok(Some(product)) => {
                self.tracer
                    .complete_success(&tracing_ctx, Method::Get, "Product retrieved");
                Ok(ApiResponse::success(
                    "Product retrieved successfully",
                    ProductResponse::from(product),
                ))
            }
            Ok(None) => {
                self.tracer
                    .complete_rejected(&tracing_ctx, Method::Get, "Product not found");
                Err(ServiceError::NotFound(format!("Product {id} not found")))
            }
            Err(e) => {
                self.tracer.complete_error(
                    &tracing_ctx,
                    Method::Get,
                    &format!("Product lookup failed: {e}"),
                );
                Err(ServiceError::Repo(e))
            }
        }
    }
}

#[derive(Clone)]
pub struct ProductCommandService {
    command: DynProductCommandRepository,
    tracer: OperationTracer,
}

impl ProductCommandService {
    pub fn new(command: DynProductCommandRepository, registry: &mut Registry) -> Self {
        Self {
            command,
            tracer: OperationTracer::new(
                "product-command-service",
                "product_command_service",
                "ProductCommandService",
                registry,
            ),
        }
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🏗️ Creating product '{}' with stock {}", req.name, req.stock);

        let tracing_ctx = self.tracer.start_tracing(
            "create_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "create"),
                KeyValue::new("product.name", req.name.clone()),
            ],
        );

        match self.command.create_product(req).await {
            Ok(product) => {
                self.tracer
                    .complete_success(&tracing_ctx, Method::Post, "Product created");
                Ok(ApiResponse::success(
                    "Product created successfully",
                    ProductResponse::from(product),
                ))
            }
            Err(e) => {
                self.tracer.complete_error(
                    &tracing_ctx,
                    Method::Post,
                    &format!("Product creation failed: {e}"),
                );
                Err(ServiceError::Repo(e))
            }
        }
    }
}
