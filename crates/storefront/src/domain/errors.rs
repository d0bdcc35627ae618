use axum::http::StatusCode;
use serde_json::json;
use shared::errors::{HttpError, RepositoryError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CapacityError {
    #[error("Event {0} not found")]
    EventNotFound(i32),

    #[error(
        "Not enough seats for event {event_id}: requested={requested}, remaining={remaining}"
    )]
    CapacityExceeded {
        event_id: i32,
        requested: i32,
        remaining: i32,
    },

    #[error("Invalid quantity: {0}, party size must be positive")]
    InvalidQuantity(i32),

    #[error("Repository error: {0}")]
    Repo(#[from] RepositoryError),
}

#[derive(Debug, Error)]
pub enum StockError {
    #[error("Product {0} not found")]
    ProductNotFound(i32),

    #[error(
        "Insufficient stock for product {product_id}: requested={requested}, available={available}"
    )]
    InsufficientStock {
        product_id: i32,
        requested: i32,
        available: i32,
    },

    #[error("Invalid quantity: {0}, quantity must be positive")]
    InvalidQuantity(i32),

    #[error("Repository error: {0}")]
    Repo(#[from] RepositoryError),
}

impl StockError {
    /// Units missing to satisfy the request, when the failure was a shortfall.
    pub fn shortfall(&self) -> Option<i32> {
        match self {
            StockError::InsufficientStock {
                requested,
                available,
                ..
            } => Some(requested - available),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order must contain at least one item")]
    EmptyOrder,

    #[error("Product {0} not found")]
    ProductNotFound(i32),

    #[error(
        "Insufficient stock for {product_name} (product {product_id}): requested={requested}, available={available}, shortfall={shortfall}"
    )]
    InsufficientStock {
        product_id: i32,
        product_name: String,
        requested: i32,
        available: i32,
        shortfall: i32,
    },

    #[error("Invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity { product_id: i32, quantity: i32 },

    #[error("Order total overflows")]
    TotalOverflow,

    #[error("Stock ledger timed out for product {0}")]
    LedgerTimeout(i32),

    #[error("Order could not be persisted: {0}")]
    PersistenceFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Error)]
pub enum BookingError {
    #[error(transparent)]
    Capacity(#[from] CapacityError),

    #[error("Capacity ledger timed out for event {0}")]
    LedgerTimeout(i32),

    #[error("Booking could not be persisted: {0}")]
    PersistenceFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CapacityError> for HttpError {
    fn from(err: CapacityError) -> Self {
        match err {
            CapacityError::EventNotFound(id) => HttpError::NotFound(format!("Event {id} not found")),
            CapacityError::CapacityExceeded {
                event_id,
                requested,
                remaining,
            } => HttpError::Rejected {
                status: StatusCode::CONFLICT,
                message: format!(
                    "Only {remaining} seat(s) left for this event, {requested} requested"
                ),
                details: json!({
                    "reason": "capacity_exceeded",
                    "eventId": event_id,
                    "requested": requested,
                    "remaining": remaining,
                }),
            },
            CapacityError::InvalidQuantity(n) => {
                HttpError::BadRequest(format!("Party size must be positive, got {n}"))
            }
            CapacityError::Repo(e) => HttpError::from(e),
        }
    }
}

impl From<BookingError> for HttpError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Capacity(e) => HttpError::from(e),
            BookingError::LedgerTimeout(_) => {
                HttpError::ServiceUnavailable("Booking timed out, please retry".into())
            }
            BookingError::PersistenceFailed(_) | BookingError::Internal(_) => {
                HttpError::Internal("Booking could not be completed".into())
            }
        }
    }
}

impl From<OrderError> for HttpError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::EmptyOrder => HttpError::BadRequest(err.to_string()),
            OrderError::ProductNotFound(product_id) => HttpError::Rejected {
                status: StatusCode::BAD_REQUEST,
                message: format!("Product {product_id} not found"),
                details: json!({
                    "reason": "product_not_found",
                    "productId": product_id,
                }),
            },
            OrderError::InsufficientStock {
                product_id,
                ref product_name,
                requested,
                available,
                shortfall,
            } => HttpError::Rejected {
                status: StatusCode::BAD_REQUEST,
                message: format!(
                    "Insufficient stock for {product_name}: {available} available, {requested} requested"
                ),
                details: json!({
                    "reason": "insufficient_stock",
                    "productId": product_id,
                    "productName": product_name,
                    "requested": requested,
                    "available": available,
                    "shortfall": shortfall,
                }),
            },
            OrderError::InvalidQuantity { .. } | OrderError::TotalOverflow => {
                HttpError::BadRequest(err.to_string())
            }
            OrderError::LedgerTimeout(_) => {
                HttpError::ServiceUnavailable("Order timed out, please retry".into())
            }
            OrderError::PersistenceFailed(_) | OrderError::Internal(_) => {
                HttpError::Internal("Order could not be completed".into())
            }
        }
    }
}
