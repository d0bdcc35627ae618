use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub event_id: i32,
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub max_people: i32,
    pub booked_count: i32,
    pub price: i64,
    pub image: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

impl Event {
    pub fn remaining(&self) -> i32 {
        (self.max_people - self.booked_count).max(0)
    }
}
