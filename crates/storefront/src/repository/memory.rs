use crate::{
    abstract_trait::{
        AdjustOutcome,
        booking::repository::{BookingCommandRepositoryTrait, BookingQueryRepositoryTrait},
        event::repository::{
            EventCapacityRepositoryTrait, EventCommandRepositoryTrait, EventQueryRepositoryTrait,
        },
        order::repository::{OrderCommandRepositoryTrait, OrderQueryRepositoryTrait},
        product::repository::{
            ProductCommandRepositoryTrait, ProductQueryRepositoryTrait, ProductStockRepositoryTrait,
        },
    },
    domain::requests::{
        booking::CreateBookingRecordRequest, event::CreateEventRequest,
        order::CreateOrderRecordRequest, product::CreateProductRequest,
    },
    model::{
        booking::Booking as BookingModel, event::Event as EventModel, order::Order as OrderModel,
        product::Product as ProductModel,
    },
};
use async_trait::async_trait;
use chrono::Utc;
use shared::errors::RepositoryError;
use sqlx::types::Json;
use std::{
    collections::BTreeMap,
    sync::{
        Arc,
        atomic::{AtomicI32, Ordering},
    },
};
use tokio::sync::RwLock;
use tracing::{info, warn};

struct Table<T> {
    rows: RwLock<BTreeMap<i32, T>>,
    next_id: AtomicI32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI32::new(1),
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&self) -> i32 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

#[derive(Default)]
struct Tables {
    events: Table<EventModel>,
    bookings: Table<BookingModel>,
    products: Table<ProductModel>,
    orders: Table<OrderModel>,
}

/// Process-local row store with the same observable semantics as the
/// Postgres repositories, including the CHECK and foreign-key constraints.
///
/// Each counter adjustment holds the table's write guard across its read,
/// check and write with no await point in between, so it is indivisible with
/// respect to every other caller.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventQueryRepositoryTrait for MemoryStore {
    async fn find_all(&self) -> Result<Vec<EventModel>, RepositoryError> {
        let rows = self.tables.events.rows.read().await;
        let mut events: Vec<EventModel> = rows.values().cloned().collect();
        events.sort_by(|a, b| {
            (a.date.as_str(), a.time.as_str(), a.event_id).cmp(&(
                b.date.as_str(),
                b.time.as_str(),
                b.event_id,
            ))
        });
        Ok(events)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<EventModel>, RepositoryError> {
        Ok(self.tables.events.rows.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl EventCommandRepositoryTrait for MemoryStore {
    async fn create_event(&self, req: &CreateEventRequest) -> Result<EventModel, RepositoryError> {
        if req.max_people <= 0 {
            return Err(RepositoryError::Conflict(
                "max_people must be greater than zero".into(),
            ));
        }
        if req.price < 0 {
            return Err(RepositoryError::Conflict("price cannot be negative".into()));
        }

        let event = EventModel {
            event_id: self.tables.events.allocate_id(),
            title: req.title.clone(),
            description: req.description.clone(),
            date: req.date.clone(),
            time: req.time.clone(),
            max_people: req.max_people,
            booked_count: 0,
            price: req.price,
            image: req.image.clone(),
            created_at: Some(Utc::now().naive_utc()),
        };

        self.tables
            .events
            .rows
            .write()
            .await
            .insert(event.event_id, event.clone());

        info!("✅ Created event ID {} '{}'", event.event_id, event.title);
        Ok(event)
    }
}

#[async_trait]
impl EventCapacityRepositoryTrait for MemoryStore {
    async fn adjust_booked_count(
        &self,
        event_id: i32,
        delta: i32,
    ) -> Result<AdjustOutcome<EventModel>, RepositoryError> {
        let mut rows = self.tables.events.rows.write().await;

        let Some(event) = rows.get_mut(&event_id) else {
            return Ok(AdjustOutcome::NotFound);
        };

        match event.booked_count.checked_add(delta) {
            Some(next) if (0..=event.max_people).contains(&next) => {
                event.booked_count = next;
                Ok(AdjustOutcome::Applied(event.clone()))
            }
            _ => {
                warn!(
                    "⚠️ Refused booked_count adjustment of {} on event {} ({}/{})",
                    delta, event_id, event.booked_count, event.max_people
                );
                Ok(AdjustOutcome::Rejected(event.clone()))
            }
        }
    }
}

#[async_trait]
impl BookingQueryRepositoryTrait for MemoryStore {
    async fn find_by_event(&self, event_id: i32) -> Result<Vec<BookingModel>, RepositoryError> {
        let rows = self.tables.bookings.rows.read().await;
        Ok(rows
            .values()
            .filter(|b| b.event_id == event_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BookingCommandRepositoryTrait for MemoryStore {
    async fn create_booking(
        &self,
        req: &CreateBookingRecordRequest,
    ) -> Result<BookingModel, RepositoryError> {
        if !self
            .tables
            .events
            .rows
            .read()
            .await
            .contains_key(&req.event_id)
        {
            return Err(RepositoryError::ForeignKey(format!(
                "event {} does not exist",
                req.event_id
            )));
        }
        if req.num_people <= 0 {
            return Err(RepositoryError::Conflict(
                "num_people must be greater than zero".into(),
            ));
        }

        let booking = BookingModel {
            booking_id: self.tables.bookings.allocate_id(),
            event_id: req.event_id,
            name: req.name.clone(),
            email: req.email.clone(),
            phone: req.phone.clone(),
            num_people: req.num_people,
            booking_date: Some(Utc::now().naive_utc()),
            status: req.status.clone(),
        };

        self.tables
            .bookings
            .rows
            .write()
            .await
            .insert(booking.booking_id, booking.clone());

        Ok(booking)
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for MemoryStore {
    async fn find_all(&self) -> Result<Vec<ProductModel>, RepositoryError> {
        let rows = self.tables.products.rows.read().await;
        let mut products: Vec<ProductModel> = rows.values().cloned().collect();
        products.sort_by(|a, b| {
            (a.name.as_str(), a.product_id).cmp(&(b.name.as_str(), b.product_id))
        });
        Ok(products)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        Ok(self.tables.products.rows.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for MemoryStore {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        if req.stock < 0 {
            return Err(RepositoryError::Conflict("stock cannot be negative".into()));
        }
        if req.price < 0 {
            return Err(RepositoryError::Conflict("price cannot be negative".into()));
        }

        let product = ProductModel {
            product_id: self.tables.products.allocate_id(),
            name: req.name.clone(),
            description: req.description.clone(),
            price: req.price,
            category: req.category.clone(),
            image: req.image.clone(),
            stock: req.stock,
            created_at: Some(Utc::now().naive_utc()),
        };

        self.tables
            .products
            .rows
            .write()
            .await
            .insert(product.product_id, product.clone());

        info!("✅ Created product ID {} '{}'", product.product_id, product.name);
        Ok(product)
    }
}

#[async_trait]
impl ProductStockRepositoryTrait for MemoryStore {
    async fn adjust_stock(
        &self,
        product_id: i32,
        delta: i32,
    ) -> Result<AdjustOutcome<ProductModel>, RepositoryError> {
        let mut rows = self.tables.products.rows.write().await;

        let Some(product) = rows.get_mut(&product_id) else {
            return Ok(AdjustOutcome::NotFound);
        };

        match product.stock.checked_add(delta) {
            Some(next) if next >= 0 => {
                product.stock = next;
                Ok(AdjustOutcome::Applied(product.clone()))
            }
            _ => {
                warn!(
                    "⚠️ Refused stock adjustment of {} on product {} (stock {})",
                    delta, product_id, product.stock
                );
                Ok(AdjustOutcome::Rejected(product.clone()))
            }
        }
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for MemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<OrderModel>, RepositoryError> {
        Ok(self.tables.orders.rows.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for MemoryStore {
    async fn create_order(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<OrderModel, RepositoryError> {
        if req.total < 0 {
            return Err(RepositoryError::Conflict("total cannot be negative".into()));
        }

        let order = OrderModel {
            order_id: self.tables.orders.allocate_id(),
            items: Json(req.items.clone()),
            total: req.total,
            customer_name: req.customer_name.clone(),
            customer_email: req.customer_email.clone(),
            customer_phone: req.customer_phone.clone(),
            delivery_method: req.delivery_method.clone(),
            address: req.address.clone(),
            payment_method: req.payment_method.clone(),
            payment_status: req.payment_status.clone(),
            created_at: Some(Utc::now().naive_utc()),
        };

        self.tables
            .orders
            .rows
            .write()
            .await
            .insert(order.order_id, order.clone());

        Ok(order)
    }
}
