use crate::{
    abstract_trait::booking::{
        repository::DynBookingCommandRepository, service::BookingServiceTrait,
    },
    domain::{
        errors::{BookingError, CapacityError},
        requests::booking::{CreateBookingRecordRequest, CreateBookingRequest},
        response::{api::ApiResponse, booking::BookingResponse},
    },
    ledger::{CapacityLedger, StepOutcome, within_deadline},
    model::booking::BookingStatus,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::utils::{Method, OperationTracer, TracingContext};
use tokio::time::Duration;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct BookingService {
    capacity: CapacityLedger,
    command: DynBookingCommandRepository,
    ledger_timeout: Duration,
    tracer: OperationTracer,
}

pub struct BookingServiceDeps {
    pub capacity: CapacityLedger,
    pub command: DynBookingCommandRepository,
    pub ledger_timeout: Duration,
}

impl BookingService {
    pub fn new(deps: BookingServiceDeps, registry: &mut Registry) -> Self {
        let BookingServiceDeps {
            capacity,
            command,
            ledger_timeout,
        } = deps;

        Self {
            capacity,
            command,
            ledger_timeout,
            tracer: OperationTracer::new(
                "booking-service",
                "booking_service",
                "BookingService",
                registry,
            ),
        }
    }

    async fn reserve(&self, event_id: i32, seats: i32) -> Result<(), BookingError> {
        let ledger = self.capacity.clone();
        let undo_ledger = self.capacity.clone();

        let outcome = within_deadline(
            self.ledger_timeout,
            async move { ledger.reserve(event_id, seats).await },
            move |reservation| async move {
                release_or_log(&undo_ledger, reservation.event_id, reservation.seats).await;
            },
        )
        .await;

        match outcome {
            StepOutcome::Finished(Ok(reservation)) => {
                info!(
                    "🎟️ Reserved {} seat(s) for event {}, {} remaining",
                    seats,
                    event_id,
                    reservation.remaining()
                );
                Ok(())
            }
            StepOutcome::Finished(Err(e)) => Err(BookingError::Capacity(e)),
            StepOutcome::TimedOut => Err(BookingError::LedgerTimeout(event_id)),
            StepOutcome::Aborted(msg) => {
                error!("💥 Reservation task for event {} aborted: {}", event_id, msg);
                Err(BookingError::Internal(msg))
            }
        }
    }

    fn finish_with_error(&self, tracing_ctx: &TracingContext, err: &BookingError) {
        let message = err.to_string();
        match err {
            BookingError::Capacity(
                CapacityError::CapacityExceeded { .. }
                | CapacityError::EventNotFound(_)
                | CapacityError::InvalidQuantity(_),
            ) => self
                .tracer
                .complete_rejected(tracing_ctx, Method::Post, &message),
            _ => self.tracer.complete_error(tracing_ctx, Method::Post, &message),
        }
    }
}

async fn release_or_log(ledger: &CapacityLedger, event_id: i32, seats: i32) {
    if let Err(e) = ledger.release(event_id, seats).await {
        error!(
            "💥 Could not release {} seat(s) for event {}: {}",
            seats, event_id, e
        );
    }
}

impl BookingService {
    async fn confirm(
        &self,
        req: &CreateBookingRequest,
    ) -> Result<ApiResponse<BookingResponse>, BookingError> {
        info!(
            "🎫 Booking {} seat(s) on event {} for {}",
            req.num_people, req.event_id, req.email
        );

        let tracing_ctx = self.tracer.start_tracing(
            "create_booking",
            vec![
                KeyValue::new("component", "booking"),
                KeyValue::new("operation", "create"),
                KeyValue::new("event.id", req.event_id.to_string()),
                KeyValue::new("booking.num_people", req.num_people.to_string()),
            ],
        );

        if let Err(e) = self.reserve(req.event_id, req.num_people).await {
            self.finish_with_error(&tracing_ctx, &e);
            return Err(e);
        }

        let record = CreateBookingRecordRequest {
            event_id: req.event_id,
            name: req.name.clone(),
            email: req.email.clone(),
            phone: req.phone.clone(),
            num_people: req.num_people,
            status: BookingStatus::Confirmed.to_string(),
        };

        let booking = match self.command.create_booking(&record).await {
            Ok(booking) => booking,
            Err(e) => {
                warn!(
                    "↩️ Booking row for event {} failed, releasing {} seat(s)",
                    req.event_id, req.num_people
                );
                release_or_log(&self.capacity, req.event_id, req.num_people).await;

                let err = BookingError::PersistenceFailed(e.to_string());
                self.finish_with_error(&tracing_ctx, &err);
                return Err(err);
            }
        };

        self.tracer
            .complete_success(&tracing_ctx, Method::Post, "Booking confirmed");

        Ok(ApiResponse::success(
            "Booking confirmed",
            BookingResponse::from(booking),
        ))
    }
}

#[async_trait]
impl BookingServiceTrait for BookingService {
    /// Reservation and insert run on their own task, detached from the caller.
    async fn book(
        &self,
        req: &CreateBookingRequest,
    ) -> Result<ApiResponse<BookingResponse>, BookingError> {
        let service = self.clone();
        let req = req.clone();

        tokio::spawn(async move { service.confirm(&req).await })
            .await
            .map_err(|e| {
                error!("💥 Booking task failed: {e}");
                BookingError::Internal(e.to_string())
            })?
    }
}
