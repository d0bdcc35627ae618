use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Sunset pottery workshop")]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(length(min = 1, message = "Date is required"))]
    #[schema(example = "2025-07-12")]
    pub date: String,

    #[validate(length(min = 1, message = "Time is required"))]
    #[schema(example = "18:30")]
    pub time: String,

    #[validate(range(min = 1, message = "Capacity must be at least one person"))]
    #[schema(example = 12)]
    pub max_people: i32,

    #[validate(range(min = 0, message = "Price cannot be negative"))]
    #[schema(example = 4500)]
    pub price: i64,

    pub image: Option<String>,
}
