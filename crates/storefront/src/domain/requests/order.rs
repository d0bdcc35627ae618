use crate::model::order::OrderLineItem;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    Pickup,
    Delivery,
}

impl DeliveryMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMethod::Pickup => "pickup",
            DeliveryMethod::Delivery => "delivery",
        }
    }
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    #[schema(example = 3)]
    pub product_id: i32,

    #[validate(range(min = 1, message = "Quantity must be at least one"))]
    #[schema(example = 2)]
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_delivery_address", skip_on_field_errors = false))]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "Order must contain at least one item"))]
    #[validate(nested)]
    pub items: Vec<OrderItemRequest>,

    #[validate(length(min = 1, message = "Customer name is required"))]
    pub customer_name: String,

    #[validate(email(message = "Customer email must be valid"))]
    pub customer_email: String,

    #[validate(length(min = 5, message = "Customer phone is required"))]
    pub customer_phone: String,

    pub delivery_method: DeliveryMethod,

    pub address: Option<String>,

    #[validate(length(min = 1, message = "Payment method is required"))]
    #[schema(example = "card")]
    pub payment_method: String,
}

fn validate_delivery_address(req: &CreateOrderRequest) -> Result<(), ValidationError> {
    let has_address = req
        .address
        .as_deref()
        .is_some_and(|a| !a.trim().is_empty());

    if req.delivery_method == DeliveryMethod::Delivery && !has_address {
        let mut err = ValidationError::new("address_required");
        err.message = Some("Address is required for delivery orders".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct CreateOrderRecordRequest {
    pub items: Vec<OrderLineItem>,
    pub total: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub delivery_method: String,
    pub address: Option<String>,
    pub payment_method: String,
    pub payment_status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(delivery_method: DeliveryMethod, address: Option<&str>) -> CreateOrderRequest {
        CreateOrderRequest {
            items: vec![OrderItemRequest {
                product_id: 1,
                quantity: 1,
            }],
            customer_name: "Ada".into(),
            customer_email: "ada@example.com".into(),
            customer_phone: "555-0101".into(),
            delivery_method,
            address: address.map(str::to_string),
            payment_method: "card".into(),
        }
    }

    #[test]
    fn pickup_needs_no_address() {
        assert!(order(DeliveryMethod::Pickup, None).validate().is_ok());
    }

    #[test]
    fn delivery_without_address_is_rejected() {
        assert!(order(DeliveryMethod::Delivery, None).validate().is_err());
        assert!(order(DeliveryMethod::Delivery, Some("  ")).validate().is_err());
        assert!(
            order(DeliveryMethod::Delivery, Some("1 Harbour Rd"))
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn nested_items_are_validated() {
        let mut req = order(DeliveryMethod::Pickup, None);
        req.items[0].quantity = 0;
        assert!(req.validate().is_err());

        req.items.clear();
        assert!(req.validate().is_err());
    }

    #[test]
    fn deserializes_camel_case_payload() {
        let req: CreateOrderRequest = serde_json::from_value(serde_json::json!({
            "items": [{ "productId": 4, "quantity": 2 }],
            "customerName": "Ada",
            "customerEmail": "ada@example.com",
            "customerPhone": "555-0101",
            "deliveryMethod": "delivery",
            "address": "1 Harbour Rd",
            "paymentMethod": "cash"
        }))
        .unwrap();

        assert_eq!(req.items[0].product_id, 4);
        assert_eq!(req.delivery_method, DeliveryMethod::Delivery);
    }
}
