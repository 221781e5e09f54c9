//! Factory for the SQL repositories
//!
//! All repositories share one `DbClient`, and so one pool.

use crate::repositories::account_sql::SqlAccountRepository;
use crate::repositories::booking_sql::SqlBookingRepository;
use crate::repositories::room_sql::SqlRoomRepository;
use crate::{DbClient, RepositoryFactory};

/// Creates SQL repositories over a database client
#[derive(Debug, Clone, Default)]
pub struct SqlRepositoryFactory;

impl SqlRepositoryFactory {
    pub fn new() -> Self {
        Self
    }
}

impl RepositoryFactory<SqlRoomRepository, DbClient> for SqlRepositoryFactory {
    fn create_repository(&self, db_client: DbClient) -> SqlRoomRepository {
        SqlRoomRepository::new(db_client)
    }
}

impl RepositoryFactory<SqlBookingRepository, DbClient> for SqlRepositoryFactory {
    fn create_repository(&self, db_client: DbClient) -> SqlBookingRepository {
        SqlBookingRepository::new(db_client)
    }
}

impl RepositoryFactory<SqlAccountRepository, DbClient> for SqlRepositoryFactory {
    fn create_repository(&self, db_client: DbClient) -> SqlAccountRepository {
        SqlAccountRepository::new(db_client)
    }
}
