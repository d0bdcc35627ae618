use crate::{
    abstract_trait::{
        AdjustOutcome,
        event::repository::{
            EventCapacityRepositoryTrait, EventCommandRepositoryTrait, EventQueryRepositoryTrait,
        },
    },
    domain::requests::event::CreateEventRequest,
    model::event::Event as EventModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info, warn};

const SELECT_EVENT: &str = r#"
    SELECT event_id, title, description, date, time, max_people, booked_count,
           price, image, created_at
    FROM events
"#;

#[derive(Clone)]
pub struct EventQueryRepository {
    db: ConnectionPool,
}

impl EventQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EventQueryRepositoryTrait for EventQueryRepository {
    async fn find_all(&self) -> Result<Vec<EventModel>, RepositoryError> {
        info!("🔍 Fetching all events");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let events = sqlx::query_as::<_, EventModel>(&format!(
            "{SELECT_EVENT} ORDER BY date ASC, time ASC, event_id ASC"
        ))
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch events: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(events)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<EventModel>, RepositoryError> {
        info!("🆔 Fetching event by ID: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let event =
            sqlx::query_as::<_, EventModel>(&format!("{SELECT_EVENT} WHERE event_id = $1"))
                .bind(id)
                .fetch_optional(&mut *conn)
                .await
                .map_err(RepositoryError::from)?;

        Ok(event)
    }
}

#[derive(Clone)]
pub struct EventCommandRepository {
    db: ConnectionPool,
}

impl EventCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EventCommandRepositoryTrait for EventCommandRepository {
    async fn create_event(&self, req: &CreateEventRequest) -> Result<EventModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let event = sqlx::query_as::<_, EventModel>(
            r#"
            INSERT INTO events (title, description, date, time, max_people, booked_count, price, image, created_at)
            VALUES ($1, $2, $3, $4, $5, 0, $6, $7, current_timestamp)
            RETURNING event_id, title, description, date, time, max_people, booked_count,
                      price, image, created_at
            "#,
        )
        .bind(&req.title)
        .bind(&req.description)
        .bind(&req.date)
        .bind(&req.time)
        .bind(req.max_people)
        .bind(req.price)
        .bind(&req.image)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create event '{}': {:?}", req.title, err);
            RepositoryError::from_sqlx(err)
        })?;

        info!("✅ Created event ID {} '{}'", event.event_id, event.title);
        Ok(event)
    }
}

#[derive(Clone)]
pub struct EventCapacityRepository {
    db: ConnectionPool,
}

impl EventCapacityRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EventCapacityRepositoryTrait for EventCapacityRepository {
    async fn adjust_booked_count(
        &self,
        event_id: i32,
        delta: i32,
    ) -> Result<AdjustOutcome<EventModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        // The row lock taken by UPDATE makes concurrent adjustments queue up and
        // re-evaluate the WHERE clause against the committed count.
        let applied = sqlx::query_as::<_, EventModel>(
            r#"
            UPDATE events
            SET booked_count = booked_count + $2
            WHERE event_id = $1
              AND booked_count + $2 >= 0
              AND booked_count + $2 <= max_people
            RETURNING event_id, title, description, date, time, max_people, booked_count,
                      price, image, created_at
            "#,
        )
        .bind(event_id)
        .bind(delta)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to adjust booked_count for event {} by {}: {:?}",
                event_id, delta, err
            );
            RepositoryError::from_sqlx(err)
        })?;

        if let Some(event) = applied {
            info!(
                "🎟️ Event {} booked_count adjusted by {} to {}/{}",
                event_id, delta, event.booked_count, event.max_people
            );
            return Ok(AdjustOutcome::Applied(event));
        }

        let current =
            sqlx::query_as::<_, EventModel>(&format!("{SELECT_EVENT} WHERE event_id = $1"))
                .bind(event_id)
                .fetch_optional(&mut *conn)
                .await
                .map_err(RepositoryError::from)?;

        match current {
            Some(event) => {
                warn!(
                    "⚠️ Refused booked_count adjustment of {} on event {} ({}/{})",
                    delta, event_id, event.booked_count, event.max_people
                );
                Ok(AdjustOutcome::Rejected(event))
            }
            None => Ok(AdjustOutcome::NotFound),
        }
    }
}
