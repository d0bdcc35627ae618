//! Exclusive writers of the shared counters.
//!
//! `CapacityLedger` owns `events.booked_count` and `StockLedger` owns
//! `products.stock`. Nothing else in the crate is handed the repositories
//! that can change those columns.

mod capacity;
mod deadline;
mod stock;

pub use self::capacity::{CapacityLedger, Reservation};
pub use self::deadline::{StepOutcome, within_deadline};
pub use self::stock::StockLedger;
