// --- File: crates/roombook_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g. loaded via ROOMBOOK__DATABASE__URL
    /// Upper bound for the connection pool. In-memory SQLite always uses one.
    #[serde(default)]
    pub max_connections: Option<u32>,
}

// --- Identity / bearer token Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    /// HS256 signing secret. Usually "secret_from_env" in the config file.
    pub jwt_secret: String,
    /// Token lifetime in hours, 7 days when absent.
    #[serde(default)]
    pub token_ttl_hours: Option<i64>,
    #[serde(default)]
    pub min_password_length: Option<usize>,
}

impl AuthConfig {
    pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24 * 7;
    pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;

    pub fn token_ttl_hours(&self) -> i64 {
        self.token_ttl_hours
            .unwrap_or(Self::DEFAULT_TOKEN_TTL_HOURS)
    }

    pub fn min_password_length(&self) -> usize {
        self.min_password_length
            .unwrap_or(Self::DEFAULT_MIN_PASSWORD_LENGTH)
    }
}

// --- Booking Config ---
// Day windows and the slot grid are computed in `time_zone`.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct BookingConfig {
    pub time_zone: Option<String>, // IANA name, e.g. "Europe/Paris"
    pub day_start: Option<String>, // "HH:MM"
    pub day_end: Option<String>,   // "HH:MM"
    pub slot_minutes: Option<u16>,
}

impl BookingConfig {
    pub fn time_zone(&self) -> &str {
        self.time_zone.as_deref().unwrap_or("UTC")
    }

    pub fn day_start(&self) -> &str {
        self.day_start.as_deref().unwrap_or("08:00")
    }

    pub fn day_end(&self) -> &str {
        self.day_end.as_deref().unwrap_or("20:00")
    }

    pub fn slot_minutes(&self) -> u16 {
        self.slot_minutes.unwrap_or(30)
    }
}

/// A room created at startup when no room with the same name exists yet.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RoomSeed {
    pub name: String,
    pub description: Option<String>,
    pub capacity: i64,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

fn default_true() -> bool {
    true
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server and auth config are mandatory
    pub server: ServerConfig,
    pub auth: AuthConfig,

    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub seed_rooms: Vec<RoomSeed>,
}
