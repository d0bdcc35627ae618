use crate::{
    abstract_trait::AdjustOutcome, domain::requests::event::CreateEventRequest,
    model::event::Event as EventModel,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynEventQueryRepository = Arc<dyn EventQueryRepositoryTrait + Send + Sync>;
pub type DynEventCommandRepository = Arc<dyn EventCommandRepositoryTrait + Send + Sync>;
pub type DynEventCapacityRepository = Arc<dyn EventCapacityRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait EventQueryRepositoryTrait {
    /// Events ordered by date.
    async fn find_all(&self) -> Result<Vec<EventModel>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<EventModel>, RepositoryError>;
}

#[async_trait]
pub trait EventCommandRepositoryTrait {
    async fn create_event(&self, req: &CreateEventRequest) -> Result<EventModel, RepositoryError>;
}

/// Owner of `booked_count`. Only the capacity ledger holds this handle.
#[async_trait]
pub trait EventCapacityRepositoryTrait {
    /// Adds `delta` to `booked_count` in one indivisible step, provided the
    /// result stays within `0..=max_people`.
    async fn adjust_booked_count(
        &self,
        event_id: i32,
        delta: i32,
    ) -> Result<AdjustOutcome<EventModel>, RepositoryError>;
}
