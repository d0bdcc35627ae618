use crate::model::event::Event as EventModel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub max_people: i32,
    pub booked_count: i32,
    pub remaining: i32,
    pub price: i64,
    pub image: Option<String>,
    pub created_at: Option<String>,
}

impl From<EventModel> for EventResponse {
    fn from(value: EventModel) -> Self {
        EventResponse {
            remaining: value.remaining(),
            id: value.event_id,
            title: value.title,
            description: value.description,
            date: value.date,
            time: value.time,
            max_people: value.max_people,
            booked_count: value.booked_count,
            price: value.price,
            image: value.image,
            created_at: value.created_at.map(|dt| dt.to_string()),
        }
    }
}
