//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database,
    domain::waitlist::{PgWaitlistService, WaitlistService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to initialize database schema")]
    Schema(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub waitlist: Arc<dyn WaitlistService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// Connects and bootstraps the waitlist schema, so a fresh database is
    /// usable without a separate migration step.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting or creating the schema fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::ensure_schema(&pool)
            .await
            .map_err(AppInitError::Schema)?;

        Ok(Self {
            waitlist: Arc::new(PgWaitlistService::new(pool)),
        })
    }
}
