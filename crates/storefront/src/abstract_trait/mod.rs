pub mod booking;
mod counter;
pub mod event;
pub mod order;
pub mod product;

pub use self::counter::AdjustOutcome;
