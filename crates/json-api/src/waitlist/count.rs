//! Waitlist Count Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State, waitlist::errors::into_status_error};

/// Waitlist Count Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CountResponse {
    /// Total signups stored
    pub count: i64,
}

/// Waitlist Count Handler
#[endpoint(
    tags("waitlist"),
    summary = "Waitlist size",
    responses(
        (status_code = StatusCode::OK, description = "Current signup count"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CountResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let count = state
        .app
        .waitlist
        .count()
        .await
        .map_err(into_status_error)?;

    Ok(Json(CountResponse { count }))
}
