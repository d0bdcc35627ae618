use crate::model::booking::Booking as BookingModel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: i32,
    pub event_id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub num_people: i32,
    pub booking_date: Option<String>,
    pub status: String,
}

impl From<BookingModel> for BookingResponse {
    fn from(value: BookingModel) -> Self {
        BookingResponse {
            id: value.booking_id,
            event_id: value.event_id,
            name: value.name,
            email: value.email,
            phone: value.phone,
            num_people: value.num_people,
            booking_date: value.booking_date.map(|dt| dt.to_string()),
            status: value.status,
        }
    }
}
