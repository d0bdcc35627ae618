use crate::domain::{
    errors::BookingError,
    requests::booking::CreateBookingRequest,
    response::{api::ApiResponse, booking::BookingResponse},
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynBookingService = Arc<dyn BookingServiceTrait + Send + Sync>;

#[async_trait]
pub trait BookingServiceTrait {
    /// Reserves seats and records a confirmed booking, or changes nothing.
    async fn book(
        &self,
        req: &CreateBookingRequest,
    ) -> Result<ApiResponse<BookingResponse>, BookingError>;
}
