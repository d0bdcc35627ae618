mod booking;
mod event;
mod order;
mod product;

pub use self::booking::{BookingService, BookingServiceDeps};
pub use self::event::{EventCommandService, EventQueryService};
pub use self::order::{OrderFulfillmentService, OrderFulfillmentServiceDeps, OrderQueryService};
pub use self::product::{ProductCommandService, ProductQueryService};
