mod booking;
mod event;
mod order;
mod product;

pub use self::booking::{BookingCommandRepository, BookingQueryRepository};
pub use self::event::{EventCapacityRepository, EventCommandRepository, EventQueryRepository};
pub use self::order::{OrderCommandRepository, OrderQueryRepository};
pub use self::product::{ProductCommandRepository, ProductQueryRepository, ProductStockRepository};
