use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[schema(example = 1)]
    pub event_id: i32,

    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Email must be valid"))]
    pub email: String,

    #[validate(length(min = 5, message = "Phone number is required"))]
    pub phone: String,

    #[validate(range(min = 1, message = "Party size must be at least one"))]
    #[schema(example = 2)]
    pub num_people: i32,
}

#[derive(Debug, Clone)]
pub struct CreateBookingRecordRequest {
    pub event_id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub num_people: i32,
    pub status: String,
}
