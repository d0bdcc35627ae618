pub mod api;
pub mod booking;
pub mod event;
pub mod order;
pub mod product;
