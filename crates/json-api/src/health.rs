//! Waitline JSON API Health Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{extensions::*, state::State};

/// Health response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HealthResponse {
    /// Service status
    pub status: String,
    /// Current server time, RFC 3339
    pub timestamp: String,
    /// Database connectivity
    pub database: String,
}

/// Health handler
///
/// Reports service status and round-trips the database so load balancers
/// see storage outages, not just a live process.
#[endpoint(
    tags("health"),
    summary = "Health check endpoint",
    responses(
        (status_code = StatusCode::OK, description = "Service healthy"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Database unreachable"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let (status, database) = match state.app.waitlist.ping().await {
        Ok(()) => ("ok", "connected"),
        Err(ping_error) => {
            error!("health check failed to reach database: {ping_error}");

            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

            ("error", "disconnected")
        }
    };

    Ok(Json(HealthResponse {
        status: status.to_string(),
        timestamp: Timestamp::now().to_string(),
        database: database.to_string(),
    }))
}
