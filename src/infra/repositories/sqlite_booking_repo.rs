use crate::domain::{models::{booking::{Booking, Reservation}, event::Event}, ports::BookingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn reserve(&self, booking: &Booking) -> Result<Reservation, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // Guarded decrement: the availability check and the write are one statement.
        let result = sqlx::query(
            "UPDATE events SET available_tickets = available_tickets - ? WHERE id = ? AND available_tickets >= ?"
        )
            .bind(booking.quantity).bind(&booking.event_id).bind(booking.quantity)
            .execute(&mut *tx).await.map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            let remaining: Option<i32> = sqlx::query_scalar("SELECT available_tickets FROM events WHERE id = ?")
                .bind(&booking.event_id)
                .fetch_optional(&mut *tx).await.map_err(AppError::Database)?;
            debug!("Reserve rejected for event {}: remaining {:?}", booking.event_id, remaining);
            return Err(match remaining {
                Some(left) => AppError::insufficient_tickets(left),
                None => AppError::NotFound("Event not found".into()),
            });
        }

        let created = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, user_id, event_id, quantity, total_price, booking_date, status)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.user_id).bind(&booking.event_id).bind(booking.quantity)
            .bind(booking.total_price).bind(booking.booking_date).bind(&booking.status)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = ?")
            .bind(&booking.event_id)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(Reservation { booking: created, event })
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE user_id = ? ORDER BY booking_date ASC, id ASC").bind(user_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY booking_date ASC, id ASC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
