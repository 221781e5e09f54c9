//! SQL implementation of the booking repository
//!
//! The guarded writes embed the overlap test `start_time < :end AND :start <
//! end_time` in a `NOT EXISTS` clause, so a write can never commit an
//! interval that another confirmed booking on the room already holds.
//! Instants are fixed-width UTC text (see `rows`), so these comparisons are
//! plain string comparisons.

use crate::error::DbError;
use crate::repositories::booking::{
    Booking, BookingFilter, BookingRepository, BookingStatus, NewBooking,
};
use crate::repositories::rows::{
    instant, optional_text, query_error, to_text, EARLIEST_INSTANT, LATEST_INSTANT,
};
use crate::DbClient;
use chrono::{DateTime, Utc};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, info};

const BOOKING_COLUMNS: &str = "id, room_id, user_id, start_time, end_time, status, \
     COALESCE(title, '') AS title, COALESCE(description, '') AS description, created_at";

/// SQL implementation of the booking repository
#[derive(Debug, Clone)]
pub struct SqlBookingRepository {
    db_client: DbClient,
}

impl SqlBookingRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

fn bookings_from_rows(rows: &[AnyRow]) -> Result<Vec<Booking>, DbError> {
    rows.iter().map(booking_from_row).collect()
}

fn booking_from_row(row: &AnyRow) -> Result<Booking, DbError> {
    let status: String = row.try_get("status")?;
    let status = status
        .parse::<BookingStatus>()
        .map_err(DbError::DecodeError)?;
    Ok(Booking {
        id: row.try_get("id")?,
        room_id: row.try_get("room_id")?,
        user_id: row.try_get("user_id")?,
        start_time: instant(row, "start_time")?,
        end_time: instant(row, "end_time")?,
        status,
        title: optional_text(row, "title")?,
        description: optional_text(row, "description")?,
        created_at: Some(instant(row, "created_at")?),
    })
}

impl BookingRepository for SqlBookingRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing booking schema");

        let table = r#"
            CREATE TABLE IF NOT EXISTS bookings (
                id TEXT PRIMARY KEY,
                room_id TEXT NOT NULL REFERENCES rooms(id),
                user_id TEXT NOT NULL,
                start_time TEXT NOT NULL,
                end_time TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'confirmed'
                    CHECK (status IN ('confirmed', 'cancelled')),
                title TEXT,
                description TEXT,
                created_at TEXT NOT NULL,
                CHECK (start_time < end_time)
            )
        "#;
        self.db_client.execute(table).await?;

        self.db_client
            .execute(
                "CREATE INDEX IF NOT EXISTS idx_bookings_room_status_start \
                 ON bookings (room_id, status, start_time)",
            )
            .await?;
        self.db_client
            .execute("CREATE INDEX IF NOT EXISTS idx_bookings_user ON bookings (user_id)")
            .await?;

        info!("Booking schema initialized successfully");
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, DbError> {
        let query = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1");

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(query_error("Failed to find booking"))?;

        row.as_ref().map(booking_from_row).transpose()
    }

    async fn list_confirmed_for_room(
        &self,
        room_id: &str,
        exclude: Option<&str>,
    ) -> Result<Vec<Booking>, DbError> {
        // Ids are never empty, so "" excludes nothing.
        let query = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings \
             WHERE room_id = $1 AND status = 'confirmed' AND id <> $2 \
             ORDER BY start_time"
        );

        let rows = sqlx::query(&query)
            .bind(room_id)
            .bind(exclude.unwrap_or(""))
            .fetch_all(self.db_client.pool())
            .await
            .map_err(query_error("Failed to list room bookings"))?;

        bookings_from_rows(&rows)
    }

    async fn insert_if_free(&self, booking: &NewBooking) -> Result<bool, DbError> {
        let query = r#"
            INSERT INTO bookings
                (id, room_id, user_id, start_time, end_time, status, title, description, created_at)
            SELECT $1, $2, $3, $4, $5, 'confirmed', $6, $7, $8
            WHERE NOT EXISTS (
                SELECT 1 FROM bookings
                WHERE room_id = $2
                  AND status = 'confirmed'
                  AND start_time < $5
                  AND $4 < end_time
            )
        "#;

        let result = sqlx::query(query)
            .bind(&booking.id)
            .bind(&booking.room_id)
            .bind(&booking.user_id)
            .bind(to_text(booking.start_time))
            .bind(to_text(booking.end_time))
            .bind(&booking.title)
            .bind(&booking.description)
            .bind(to_text(booking.created_at))
            .execute(self.db_client.pool())
            .await
            .map_err(query_error("Failed to insert booking"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn reschedule_if_free(
        &self,
        id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<bool, DbError> {
        let query = r#"
            UPDATE bookings
            SET start_time = $2, end_time = $3
            WHERE id = $1
              AND status = 'confirmed'
              AND NOT EXISTS (
                  SELECT 1 FROM bookings AS other
                  WHERE other.room_id = bookings.room_id
                    AND other.id <> $1
                    AND other.status = 'confirmed'
                    AND other.start_time < $3
                    AND $2 < other.end_time
              )
        "#;

        let result = sqlx::query(query)
            .bind(id)
            .bind(to_text(start))
            .bind(to_text(end))
            .execute(self.db_client.pool())
            .await
            .map_err(query_error("Failed to reschedule booking"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn cancel(&self, id: &str) -> Result<bool, DbError> {
        let result = sqlx::query(
            "UPDATE bookings SET status = 'cancelled' WHERE id = $1 AND status = 'confirmed'",
        )
        .bind(id)
        .execute(self.db_client.pool())
        .await
        .map_err(query_error("Failed to cancel booking"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_for_window(
        &self,
        room_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Booking>, DbError> {
        let query = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings \
             WHERE room_id = $1 AND status = 'confirmed' \
               AND start_time < $3 AND $2 < end_time \
             ORDER BY start_time"
        );

        let rows = sqlx::query(&query)
            .bind(room_id)
            .bind(to_text(from))
            .bind(to_text(to))
            .fetch_all(self.db_client.pool())
            .await
            .map_err(query_error("Failed to list bookings for day"))?;

        bookings_from_rows(&rows)
    }

    async fn list_for_owner(&self, user_id: &str) -> Result<Vec<Booking>, DbError> {
        let query = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings \
             WHERE user_id = $1 AND status = 'confirmed' \
             ORDER BY start_time"
        );

        let rows = sqlx::query(&query)
            .bind(user_id)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(query_error("Failed to list user bookings"))?;

        bookings_from_rows(&rows)
    }

    async fn list_filtered(&self, filter: &BookingFilter) -> Result<Vec<Booking>, DbError> {
        // Absent bounds become the widest possible ones.
        let query = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings \
             WHERE status = 'confirmed' \
               AND ($1 = '' OR room_id = $1) \
               AND start_time >= $2 \
               AND end_time <= $3 \
             ORDER BY start_time"
        );

        let rows = sqlx::query(&query)
            .bind(filter.room_id.as_deref().unwrap_or(""))
            .bind(
                filter
                    .starts_at_or_after
                    .map_or_else(|| EARLIEST_INSTANT.to_string(), to_text),
            )
            .bind(
                filter
                    .ends_at_or_before
                    .map_or_else(|| LATEST_INSTANT.to_string(), to_text),
            )
            .fetch_all(self.db_client.pool())
            .await
            .map_err(query_error("Failed to list bookings"))?;

        bookings_from_rows(&rows)
    }
}
