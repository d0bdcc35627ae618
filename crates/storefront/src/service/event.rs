use crate::{
    abstract_trait::{
        booking::repository::DynBookingQueryRepository,
        event::{
            repository::{DynEventCommandRepository, DynEventQueryRepository},
            service::{EventCommandServiceTrait, EventQueryServiceTrait},
        },
    },
    domain::{
        requests::event::CreateEventRequest,
        response::{api::ApiResponse, booking::BookingResponse, event::EventResponse},
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
pub struct EventQueryService {
    query: DynEventQueryRepository,
    bookings: DynBookingQueryRepository,
    tracer: OperationTracer,
}

impl EventQueryService {
    pub fn new(
        query: DynEventQueryRepository,
        bookings: DynBookingQueryRepository,
        registry: &mut Registry,
    ) -> Self {
        Self {
            query,
            bookings,
            tracer: OperationTracer::new(
                "event-query-service",
                "event_query_service",
                "EventQueryService",
                registry,
            ),
        }
    }
}

#[async_trait]
impl EventQueryServiceTrait for EventQueryService {
    async fn find_all(&self) -> Result<ApiResponse<Vec<EventResponse>>, ServiceError> {
        info!("🔍 Listing events");

        let tracing_ctx = self.tracer.start_tracing(
            "event_find_all",
            vec![
                KeyValue::new("component", "event"),
                KeyValue::new("operation", "find_all"),
            ],
        );

        let events = match self.query.find_all().await {
            Ok(events) => events,
            Err(e) => {
                self.tracer
                    .complete_error(&tracing_ctx, Method::Get, &format!("Listing events failed: {e}"));
                return Err(ServiceError::Repo(e));
            }
        };

        let data: Vec<EventResponse> = events.into_iter().map(EventResponse::from).collect();

        self.tracer.complete_success(
            &tracing_ctx,
            Method::Get,
            &format!("Retrieved {} events", data.len()),
        );

        Ok(ApiResponse::success("Events retrieved successfully", data))
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<EventResponse>, ServiceError> {
        info!("🔍 Finding event id={id}");

        let tracing_ctx = self.tracer.start_tracing(
            "event_find_by_id",
            vec![
                KeyValue::new("component", "event"),
                KeyValue::new("operation", "find_by_id"),
                KeyValue::new("event.id", id.to_string()),
            ],
        );

        match self.query.find_by_id(id).await {
            Ok(Some(event)) => {
                self.tracer
                    .complete_success(&tracing_ctx, Method::Get, "Event retrieved");
                Ok(ApiResponse::success(
                    "Event retrieved successfully",
                    EventResponse::from(event),
                ))
            }
            Ok(None) => {
                self.tracer
                    .complete_rejected(&tracing_ctx, Method::Get, "Event not found");
                Err(ServiceError::NotFound(format!("Event {id} not found")))
            }
            Err(e) => {
                self.tracer
                    .complete_error(&tracing_ctx, Method::Get, &format!("Event lookup failed: {e}"));
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn find_bookings(
        &self,
        event_id: i32,
    ) -> Result<ApiResponse<Vec<BookingResponse>>, ServiceError> {
        let tracing_ctx = self.tracer.start_tracing(
            "event_find_bookings",
            vec![
                KeyValue::new("component", "event"),
                KeyValue::new("operation", "find_bookings"),
                KeyValue::new("event.id", event_id.to_string()),
            ],
        );

        let lookup = async {
            if self.query.find_by_id(event_id).await?.is_none() {
                return Ok(None);
            }
            self.bookings.find_by_event(event_id).await.map(Some)
        };

        match lookup.await {
            Ok(Some(bookings)) => {
                let data: Vec<BookingResponse> =
                    bookings.into_iter().map(BookingResponse::from).collect();
                self.tracer.complete_success(
                    &tracing_ctx,
                    Method::Get,
                    &format!("Retrieved {} bookings", data.len()),
                );
                Ok(ApiResponse::success("Bookings retrieved successfully", data))
            }
            Ok(None) => {
                self.tracer
                    .complete_rejected(&tracing_ctx, Method::Get, "Event not found");
                Err(ServiceError::NotFound(format!("Event {event_id} not found")))
            }
            Err(e) => {
                self.tracer.complete_error(
                    &tracing_ctx,
                    Method::Get,
                    &format!("Booking lookup failed: {e}"),
                );
                Err(ServiceError::Repo(e))
            }
        }
    }
}

#[derive(Clone)]
pub struct EventCommandService {
    command: DynEventCommandRepository,
    tracer: OperationTracer,
}

impl EventCommandService {
    pub fn new(command: DynEventCommandRepository, registry: &mut Registry) -> Self {
        Self {
            command,
            tracer: OperationTracer::new(
                "event-command-service",
                "event_command_service",
                "EventCommandService",
                registry,
            ),
        }
    }
}

#[async_trait]
impl EventCommandServiceTrait for EventCommandService {
    async fn create_event(
        &self,
        req: &CreateEventRequest,
    ) -> Result<ApiResponse<EventResponse>, ServiceError> {
        info!("🏗️ Creating event '{}' for {} people", req.title, req.max_people);

        let tracing_ctx = self.tracer.start_tracing(
            "create_event",
            vec![
                KeyValue::new("component", "event"),
                KeyValue::new("operation", "create"),
                KeyValue::new("event.title", req.title.clone()),
            ],
        );

        match self.command.create_event(req).await {
            Ok(event) => {
                self.tracer
                    .complete_success(&tracing_ctx, Method::Post, "Event created");
                Ok(ApiResponse::success(
                    "Event created successfully",
                    EventResponse::from(event),
                ))
            }
            Err(e) => {
                self.tracer.complete_error(
                    &tracing_ctx,
                    Method::Post,
                    &format!("Event creation failed: {e}"),
                );
                Err(ServiceError::Repo(e))
            }
        }
    }
}
