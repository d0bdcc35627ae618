use crate::domain::{
    requests::event::CreateEventRequest,
    response::{api::ApiResponse, booking::BookingResponse, event::EventResponse},
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynEventQueryService = Arc<dyn EventQueryServiceTrait + Send + Sync>;
pub type DynEventCommandService = Arc<dyn EventCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait EventQueryServiceTrait {
    async fn find_all(&self) -> Result<ApiResponse<Vec<EventResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<EventResponse>, ServiceError>;
    async fn find_bookings(
        &self,
        event_id: i32,
    ) -> Result<ApiResponse<Vec<BookingResponse>>, ServiceError>;
}

#[async_trait]
pub trait EventCommandServiceTrait {
    async fn create_event(
        &self,
        req: &CreateEventRequest,
    ) -> Result<ApiResponse<EventResponse>, ServiceError>;
}
