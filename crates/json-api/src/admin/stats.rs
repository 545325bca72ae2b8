//! Admin Stats Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use waitline_app::domain::waitlist::records::{BreakdownRow, DailyCount, WaitlistStats};

use crate::{extensions::*, state::State, waitlist::errors::into_status_error};

/// One aggregation bucket.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BreakdownEntry {
    pub label: String,
    pub count: i64,
}

impl From<BreakdownRow> for BreakdownEntry {
    fn from(row: BreakdownRow) -> Self {
        Self {
            label: row.label,
            count: row.count,
        }
    }
}

/// Signups for one calendar day.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DailyEntry {
    /// Day formatted as `YYYY-MM-DD`
    pub day: String,
    pub count: i64,
}

impl From<DailyCount> for DailyEntry {
    fn from(row: DailyCount) -> Self {
        Self {
            day: row.day,
            count: row.count,
        }
    }
}

/// Admin Stats Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatsResponse {
    pub total_signups: i64,
    pub signups_today: i64,
    pub game_breakdown: Vec<BreakdownEntry>,
    pub referrer_breakdown: Vec<BreakdownEntry>,
    /// Ascending chronological order
    pub signups_by_day: Vec<DailyEntry>,
}

impl From<WaitlistStats> for StatsResponse {
    fn from(stats: WaitlistStats) -> Self {
        Self {
            total_signups: stats.total_signups,
            signups_today: stats.signups_today,
            game_breakdown: stats.game_breakdown.into_iter().map(Into::into).collect(),
            referrer_breakdown: stats
                .referrer_breakdown
                .into_iter()
                .map(Into::into)
                .collect(),
            signups_by_day: stats.signups_by_day.into_iter().map(Into::into).collect(),
        }
    }
}

/// Admin Stats Handler
#[endpoint(
    tags("admin"),
    summary = "Waitlist statistics",
    responses(
        (status_code = StatusCode::OK, description = "Aggregate statistics"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<StatsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let stats = state
        .app
        .waitlist
        .stats()
        .await
        .map_err(into_status_error)?;

    Ok(Json(stats.into()))
}
