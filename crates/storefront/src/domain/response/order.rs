use crate::model::order::{Order as OrderModel, OrderLineItem};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub price: i64,
}

impl From<OrderLineItem> for OrderItemResponse {
    fn from(value: OrderLineItem) -> Self {
        OrderItemResponse {
            product_id: value.product_id,
            product_name: value.product_name,
            quantity: value.quantity,
            price: value.price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i32,
    pub items: Vec<OrderItemResponse>,
    pub total: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub delivery_method: String,
    pub address: Option<String>,
    pub payment_method: String,
    pub payment_status: String,
    pub created_at: Option<String>,
}

impl From<OrderModel> for OrderResponse {
    fn from(value: OrderModel) -> Self {
        OrderResponse {
            id: value.order_id,
            items: value
                .items
                .0
                .into_iter()
                .map(OrderItemResponse::from)
                .collect(),
            total: value.total,
            customer_name: value.customer_name,
            customer_email: value.customer_email,
            customer_phone: value.customer_phone,
            delivery_method: value.delivery_method,
            address: value.address,
            payment_method: value.payment_method,
            payment_status: value.payment_status,
            created_at: value.created_at.map(|dt| dt.to_string()),
        }
    }
}
