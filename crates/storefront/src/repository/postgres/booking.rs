use crate::{
    abstract_trait::booking::repository::{
        BookingCommandRepositoryTrait, BookingQueryRepositoryTrait,
    },
    domain::requests::booking::CreateBookingRecordRequest,
    model::booking::Booking as BookingModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct BookingQueryRepository {
    db: ConnectionPool,
}

impl BookingQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookingQueryRepositoryTrait for BookingQueryRepository {
    async fn find_by_event(&self, event_id: i32) -> Result<Vec<BookingModel>, RepositoryError> {
        info!("🔍 Fetching bookings for event {}", event_id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let bookings = sqlx::query_as::<_, BookingModel>(
            r#"
            SELECT booking_id, event_id, name, email, phone, num_people, booking_date, status
            FROM bookings
            WHERE event_id = $1
            ORDER BY booking_date ASC, booking_id ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch bookings for event {}: {:?}", event_id, e);
            RepositoryError::from(e)
        })?;

        Ok(bookings)
    }
}

#[derive(Clone)]
pub struct BookingCommandRepository {
    db: ConnectionPool,
}

impl BookingCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookingCommandRepositoryTrait for BookingCommandRepository {
    async fn create_booking(
        &self,
        req: &CreateBookingRecordRequest,
    ) -> Result<BookingModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let booking = sqlx::query_as::<_, BookingModel>(
            r#"
            INSERT INTO bookings (event_id, name, email, phone, num_people, booking_date, status)
            VALUES ($1, $2, $3, $4, $5, current_timestamp, $6)
            RETURNING booking_id, event_id, name, email, phone, num_people, booking_date, status
            "#,
        )
        .bind(req.event_id)
        .bind(&req.name)
        .bind(&req.email)
        .bind(&req.phone)
        .bind(req.num_people)
        .bind(&req.status)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to create booking for event {}: {:?}",
                req.event_id, err
            );
            RepositoryError::from_sqlx(err)
        })?;

        info!(
            "✅ Created booking ID {} for event {} ({} people)",
            booking.booking_id, booking.event_id, booking.num_people
        );
        Ok(booking)
    }
}
