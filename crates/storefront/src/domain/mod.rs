pub mod errors;
pub mod requests;
pub mod response;
