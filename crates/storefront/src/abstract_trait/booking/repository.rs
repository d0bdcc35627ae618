use crate::{
    domain::requests::booking::CreateBookingRecordRequest, model::booking::Booking as BookingModel,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynBookingQueryRepository = Arc<dyn BookingQueryRepositoryTrait + Send + Sync>;
pub type DynBookingCommandRepository = Arc<dyn BookingCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait BookingQueryRepositoryTrait {
    async fn find_by_event(&self, event_id: i32) -> Result<Vec<BookingModel>, RepositoryError>;
}

#[async_trait]
pub trait BookingCommandRepositoryTrait {
    async fn create_booking(
        &self,
        req: &CreateBookingRecordRequest,
    ) -> Result<BookingModel, RepositoryError>;
}
