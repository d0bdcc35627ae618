#![allow(dead_code)]

use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::errors::RepositoryError;
use std::{
    sync::{
        Arc,
        atomic::{AtomicI64, Ordering},
    },
    time::Duration,
};
use storefront::{
    abstract_trait::{
        AdjustOutcome,
        booking::repository::BookingCommandRepositoryTrait,
        event::repository::{EventCommandRepositoryTrait, EventQueryRepositoryTrait},
        order::repository::OrderCommandRepositoryTrait,
        product::repository::{
            ProductCommandRepositoryTrait, ProductQueryRepositoryTrait, ProductStockRepositoryTrait,
        },
    },
    di::{DependenciesInject, RepositoryDeps},
    domain::requests::{
        booking::{CreateBookingRecordRequest, CreateBookingRequest},
        event::CreateEventRequest,
        order::{CreateOrderRecordRequest, CreateOrderRequest, DeliveryMethod, OrderItemRequest},
        product::CreateProductRequest,
    },
    model::{booking::Booking, event::Event, order::Order, product::Product},
    repository::MemoryStore,
};

pub const LEDGER_TIMEOUT: Duration = Duration::from_secs(5);

pub fn services(repos: RepositoryDeps) -> DependenciesInject {
    DependenciesInject::new(repos, LEDGER_TIMEOUT, &mut Registry::default())
}

pub fn services_with_timeout(repos: RepositoryDeps, timeout: Duration) -> DependenciesInject {
    DependenciesInject::new(repos, timeout, &mut Registry::default())
}

pub async fn seed_event(store: &MemoryStore, max_people: i32, booked: i32) -> Event {
    let event = store
        .create_event(&CreateEventRequest {
            title: "Raku firing night".into(),
            description: "Outdoor kiln session".into(),
            date: "2025-08-02".into(),
            time: "19:00".into(),
            max_people,
            price: 6000,
            image: None,
        })
        .await
        .unwrap();

    if booked > 0 {
        use storefront::abstract_trait::event::repository::EventCapacityRepositoryTrait;
        assert!(matches!(
            store.adjust_booked_count(event.event_id, booked).await.unwrap(),
            AdjustOutcome::Applied(_)
        ));
    }

    event
}

pub async fn seed_product(store: &MemoryStore, name: &str, price: i64, stock: i32) -> Product {
    store
        .create_product(&CreateProductRequest {
            name: name.into(),
            description: "Studio made".into(),
            price,
            category: "ceramics".into(),
            image: format!("/img/{}.jpg", name.to_lowercase()),
            stock,
        })
        .await
        .unwrap()
}

pub async fn booked_count(store: &MemoryStore, event_id: i32) -> i32 {
    EventQueryRepositoryTrait::find_by_id(store, event_id)
        .await
        .unwrap()
        .unwrap()
        .booked_count
}

pub async fn stock(store: &MemoryStore, product_id: i32) -> i32 {
    ProductQueryRepositoryTrait::find_by_id(store, product_id)
        .await
        .unwrap()
        .unwrap()
        .stock
}

pub fn booking_request(event_id: i32, num_people: i32) -> CreateBookingRequest {
    CreateBookingRequest {
        event_id,
        name: "Grace".into(),
        email: "grace@example.com".into(),
        phone: "555-0199".into(),
        num_people,
    }
}

pub fn order_request(items: &[(i32, i32)]) -> CreateOrderRequest {
    CreateOrderRequest {
        items: items
            .iter()
            .map(|&(product_id, quantity)| OrderItemRequest {
                product_id,
                quantity,
            })
            .collect(),
        customer_name: "Ada".into(),
        customer_email: "ada@example.com".into(),
        customer_phone: "555-0101".into(),
        delivery_method: DeliveryMethod::Pickup,
        address: None,
        payment_method: "card".into(),
    }
}

/// Booking writes that always fail, as if the table were unavailable.
pub struct FailingBookings;

#[async_trait]
impl BookingCommandRepositoryTrait for FailingBookings {
    async fn create_booking(
        &self,
        _req: &CreateBookingRecordRequest,
    ) -> Result<Booking, RepositoryError> {
        Err(RepositoryError::Custom("bookings table unavailable".into()))
    }
}

/// Booking writes that land only after `delay`.
pub struct SlowBookings {
    pub inner: MemoryStore,
    pub delay: Duration,
}

#[async_trait]
impl BookingCommandRepositoryTrait for SlowBookings {
    async fn create_booking(
        &self,
        req: &CreateBookingRecordRequest,
    ) -> Result<Booking, RepositoryError> {
        tokio::time::sleep(self.delay).await;
        self.inner.create_booking(req).await
    }
}

pub struct FailingOrders;

#[async_trait]
impl OrderCommandRepositoryTrait for FailingOrders {
    async fn create_order(&self, _req: &CreateOrderRecordRequest) -> Result<Order, RepositoryError> {
        Err(RepositoryError::Custom("orders table unavailable".into()))
    }
}

/// Delays decrements on one product, then applies them anyway.
pub struct SlowStock {
    pub inner: MemoryStore,
    pub slow_product: i32,
    pub delay: Duration,
}

#[async_trait]
impl ProductStockRepositoryTrait for SlowStock {
    async fn adjust_stock(
        &self,
        product_id: i32,
        delta: i32,
    ) -> Result<AdjustOutcome<Product>, RepositoryError> {
        if product_id == self.slow_product && delta < 0 {
            tokio::time::sleep(self.delay).await;
        }
        self.inner.adjust_stock(product_id, delta).await
    }
}

/// Catalog reads whose price can be changed after the fact.
pub struct RepricedCatalog {
    pub inner: MemoryStore,
    pub price_override: Arc<AtomicI64>,
}

impl RepricedCatalog {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            price_override: Arc::new(AtomicI64::new(-1)),
        }
    }

    fn reprice(&self, mut product: Product) -> Product {
        let price = self.price_override.load(Ordering::SeqCst);
        if price >= 0 {
            product.price = price;
        }
        product
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for RepricedCatalog {
    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = ProductQueryRepositoryTrait::find_all(&self.inner).await?;
        Ok(products.into_iter().map(|p| self.reprice(p)).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, RepositoryError> {
        let product = ProductQueryRepositoryTrait::find_by_id(&self.inner, id).await?;
        Ok(product.map(|p| self.reprice(p)))
    }
}
