//! Factory for ready-to-use database clients
//!
//! Connecting is only half of startup: the schema has to exist and the
//! configured rooms have to be present before the first request.

use crate::client::DbClient;
use crate::error::DbError;
use crate::repositories::{
    AccountRepository, BookingRepository, RoomRepository, SqlAccountRepository,
    SqlBookingRepository, SqlRoomRepository,
};
use roombook_common::models::Room;
use roombook_config::{AppConfig, RoomSeed};
use std::sync::Arc;
use tracing::{debug, info};

/// Factory for creating database clients
#[derive(Debug, Clone, Default)]
pub struct DbClientFactory;

impl DbClientFactory {
    pub fn new() -> Self {
        Self
    }

    /// Connect using the `database` section, create the schema and seed the
    /// configured rooms.
    pub async fn from_app_config(&self, config: &Arc<AppConfig>) -> Result<DbClient, DbError> {
        debug!("Creating database client from application configuration");

        let client = DbClient::new(config).await?;
        self.prepare(&client, &config.seed_rooms).await?;
        Ok(client)
    }

    /// Connect to `db_url`, create the schema and seed `rooms`.
    pub async fn from_url(&self, db_url: &str, rooms: &[RoomSeed]) -> Result<DbClient, DbError> {
        debug!("Creating database client from URL");

        let client = DbClient::from_url(db_url).await?;
        self.prepare(&client, rooms).await?;
        Ok(client)
    }

    /// Create every table (rooms first, bookings reference them) and insert
    /// the seed rooms whose names are not taken yet.
    pub async fn prepare(&self, client: &DbClient, rooms: &[RoomSeed]) -> Result<(), DbError> {
        let room_repo = SqlRoomRepository::new(client.clone());
        room_repo.init_schema().await?;
        SqlBookingRepository::new(client.clone()).init_schema().await?;
        SqlAccountRepository::new(client.clone()).init_schema().await?;

        let mut seeded = 0;
        for seed in rooms {
            if room_repo.insert_if_missing(&room_from_seed(seed)).await? {
                seeded += 1;
            }
        }

        info!(seeded, configured = rooms.len(), "Database ready");
        Ok(())
    }
}

fn room_from_seed(seed: &RoomSeed) -> Room {
    Room {
        id: uuid::Uuid::new_v4().to_string(),
        name: seed.name.clone(),
        description: seed.description.clone(),
        capacity: seed.capacity,
        equipment: seed.equipment.clone(),
        is_available: seed.is_available,
    }
}
