use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Glazed mug")]
    pub name: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(range(min = 0, message = "Price cannot be negative"))]
    #[schema(example = 2200)]
    pub price: i64,

    #[validate(length(min = 1, message = "Category is required"))]
    #[schema(example = "ceramics")]
    pub category: String,

    #[validate(length(min = 1, message = "Image is required"))]
    pub image: String,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    #[schema(example = 25)]
    pub stock: i32,
}
