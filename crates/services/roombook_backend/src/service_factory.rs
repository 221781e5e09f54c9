// --- File: crates/services/roombook_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! Builds every service the HTTP layer needs from the loaded configuration
//! and one database client.
use std::sync::Arc;

use roombook_auth::LocalIdentityProvider;
use roombook_booking::{BookingSettings, SqlBookingService};
use roombook_common::{IdentityProvider, RoombookError, ServiceFactory};
use roombook_config::AppConfig;
use roombook_db::{DbClient, RepositoryFactory, SqlAccountRepository, SqlRepositoryFactory};
use tracing::info;

pub struct RoombookServiceFactory {
    identity_provider: Arc<dyn IdentityProvider>,
    booking_service: Arc<SqlBookingService>,
}

impl RoombookServiceFactory {
    /// Fails when the booking calendar settings are invalid.
    pub fn new(config: &AppConfig, db: DbClient) -> Result<Self, RoombookError> {
        let settings = BookingSettings::from_config(&config.booking)?;
        info!(
            "booking calendar: {} from {} to {} in {} minute slots",
            settings.time_zone.name(),
            settings.day_start,
            settings.day_end,
            settings.slot.num_minutes()
        );

        let repositories = SqlRepositoryFactory::new();
        let accounts: SqlAccountRepository = repositories.create_repository(db.clone());
        let identity_provider: Arc<dyn IdentityProvider> =
            Arc::new(LocalIdentityProvider::from_config(accounts, &config.auth));
        let booking_service = Arc::new(SqlBookingService::new(
            repositories.create_repository(db.clone()),
            repositories.create_repository(db),
            settings,
        ));

        Ok(Self {
            identity_provider,
            booking_service,
        })
    }

    pub fn booking_service(&self) -> Arc<SqlBookingService> {
        self.booking_service.clone()
    }
}

impl ServiceFactory for RoombookServiceFactory {
    fn identity_provider(&self) -> Arc<dyn IdentityProvider> {
        self.identity_provider.clone()
    }
}
