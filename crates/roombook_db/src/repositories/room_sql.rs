//! SQL implementation of the room repository

use crate::error::DbError;
use crate::repositories::room::{Room, RoomRepository};
use crate::repositories::rows::{from_flag, optional_text, query_error, to_flag};
use crate::DbClient;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, info};

const ROOM_COLUMNS: &str =
    "id, name, COALESCE(description, '') AS description, capacity, equipment, is_available";

/// SQL implementation of the room repository
#[derive(Debug, Clone)]
pub struct SqlRoomRepository {
    db_client: DbClient,
}

impl SqlRoomRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

fn room_from_row(row: &AnyRow) -> Result<Room, DbError> {
    let equipment: String = row.try_get("equipment")?;
    let equipment: Vec<String> = serde_json::from_str(&equipment)
        .map_err(|e| DbError::DecodeError(format!("room equipment: {e}")))?;

    Ok(Room {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: optional_text(row, "description")?,
        capacity: row.try_get("capacity")?,
        equipment,
        is_available: from_flag(row.try_get("is_available")?),
    })
}

impl RoomRepository for SqlRoomRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing room schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS rooms (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                description TEXT,
                capacity BIGINT NOT NULL,
                equipment TEXT NOT NULL DEFAULT '[]',
                is_available BIGINT NOT NULL DEFAULT 1
            )
        "#;
        self.db_client.execute(query).await?;

        info!("Room schema initialized successfully");
        Ok(())
    }

    async fn list_available(&self) -> Result<Vec<Room>, DbError> {
        let query =
            format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE is_available = 1 ORDER BY name");

        let rows = sqlx::query(&query)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(query_error("Failed to list rooms"))?;

        rows.iter().map(room_from_row).collect()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Room>, DbError> {
        let query = format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE id = $1");

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(query_error("Failed to find room"))?;

        row.as_ref().map(room_from_row).transpose()
    }

    async fn insert_if_missing(&self, room: &Room) -> Result<bool, DbError> {
        let equipment = serde_json::to_string(&room.equipment)
            .map_err(|e| DbError::DecodeError(format!("room equipment: {e}")))?;

        let query = r#"
            INSERT INTO rooms (id, name, description, capacity, equipment, is_available)
            SELECT $1, $2, $3, $4, $5, $6
            WHERE NOT EXISTS (SELECT 1 FROM rooms WHERE name = $2)
        "#;

        let result = sqlx::query(query)
            .bind(&room.id)
            .bind(&room.name)
            .bind(&room.description)
            .bind(room.capacity)
            .bind(equipment)
            .bind(to_flag(room.is_available))
            .execute(self.db_client.pool())
            .await
            .map_err(query_error("Failed to seed room"))?;

        let inserted = result.rows_affected() > 0;
        if inserted {
            info!(room = %room.name, "Seeded room");
        }
        Ok(inserted)
    }
}
