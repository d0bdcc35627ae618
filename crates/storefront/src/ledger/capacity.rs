use crate::{
    abstract_trait::{AdjustOutcome, event::repository::DynEventCapacityRepository},
    domain::errors::CapacityError,
};
use shared::errors::RepositoryError;
use tracing::{info, warn};

/// Seats taken from an event by one successful `reserve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reservation {
    pub event_id: i32,
    pub seats: i32,
    pub booked_count: i32,
    pub max_people: i32,
}

impl Reservation {
    pub fn remaining(&self) -> i32 {
        self.max_people - self.booked_count
    }
}

#[derive(Clone)]
pub struct CapacityLedger {
    repo: DynEventCapacityRepository,
}

impl CapacityLedger {
    pub fn new(repo: DynEventCapacityRepository) -> Self {
        Self { repo }
    }

    pub async fn reserve(&self, event_id: i32, requested: i32) -> Result<Reservation, CapacityError> {
        if requested <= 0 {
            return Err(CapacityError::InvalidQuantity(requested));
        }

        match self.repo.adjust_booked_count(event_id, requested).await? {
            AdjustOutcome::Applied(event) => {
                info!(
                    "🎟️ Reserved {} seat(s) on event {} ({}/{})",
                    requested, event_id, event.booked_count, event.max_people
                );
                Ok(Reservation {
                    event_id,
                    seats: requested,
                    booked_count: event.booked_count,
                    max_people: event.max_people,
                })
            }
            AdjustOutcome::Rejected(event) => {
                // the row may be read after a concurrent release
                let remaining = event.remaining().min(requested - 1);
                warn!(
                    "⚠️ Event {} cannot take {} more seat(s), {} remaining",
                    event_id, requested, remaining
                );
                Err(CapacityError::CapacityExceeded {
                    event_id,
                    requested,
                    remaining,
                })
            }
            AdjustOutcome::NotFound => Err(CapacityError::EventNotFound(event_id)),
        }
    }

    /// Gives back seats taken by an earlier `reserve`. Only used to
    /// compensate a booking that could not be recorded.
    pub async fn release(&self, event_id: i32, seats: i32) -> Result<(), CapacityError> {
        if seats <= 0 {
            return Err(CapacityError::InvalidQuantity(seats));
        }

        match self.repo.adjust_booked_count(event_id, -seats).await? {
            AdjustOutcome::Applied(event) => {
                info!(
                    "↩️ Released {} seat(s) on event {} ({}/{})",
                    seats, event_id, event.booked_count, event.max_people
                );
                Ok(())
            }
            AdjustOutcome::Rejected(event) => Err(CapacityError::Repo(RepositoryError::Conflict(
                format!(
                    "cannot release {} seat(s) from event {} with only {} booked",
                    seats, event_id, event.booked_count
                ),
            ))),
            AdjustOutcome::NotFound => Err(CapacityError::EventNotFound(event_id)),
        }
    }
}
