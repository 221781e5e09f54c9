// --- File: crates/services/roombook_backend/src/app_state.rs ---
use std::sync::Arc;

use roombook_auth::AuthState;
use roombook_booking::BookingState;
use roombook_common::{RoombookError, ServiceFactory};
use roombook_config::AppConfig;
use roombook_db::DbClient;

use crate::service_factory::RoombookServiceFactory;

/// Application state shared across all routes.
///
/// Each feature router receives its own slice of it; nothing here is a
/// process-wide singleton.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DbClient,
    pub service_factory: Arc<RoombookServiceFactory>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, db: DbClient) -> Result<Self, RoombookError> {
        let service_factory = Arc::new(RoombookServiceFactory::new(&config, db.clone())?);
        Ok(Self {
            config,
            db,
            service_factory,
        })
    }

    pub fn auth_state(&self) -> AuthState {
        AuthState {
            identity: self.service_factory.identity_provider(),
        }
    }

    pub fn booking_state(&self) -> BookingState {
        BookingState {
            service: self.service_factory.booking_service(),
            identity: self.service_factory.identity_provider(),
        }
    }
}
