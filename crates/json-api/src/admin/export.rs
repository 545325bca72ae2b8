//! Admin Export Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use waitline_app::domain::waitlist::records::ExportRow;

use crate::{extensions::*, state::State, waitlist::errors::into_status_error};

/// One exported signup.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExportedSignup {
    pub id: Uuid,
    pub email: String,
    pub gamertag: Option<String>,
    pub primary_game: Option<String>,
    /// Creation time, RFC 3339
    pub created_at: String,
    pub referrer: Option<String>,
}

impl From<ExportRow> for ExportedSignup {
    fn from(row: ExportRow) -> Self {
        Self {
            id: row.uuid,
            email: row.email,
            gamertag: row.gamertag,
            primary_game: row.primary_game,
            created_at: row.created_at.to_string(),
            referrer: row.referrer,
        }
    }
}

/// Admin Export Handler
///
/// Returns every signup, newest first.
#[endpoint(
    tags("admin"),
    summary = "Export all signups",
    responses(
        (status_code = StatusCode::OK, description = "All signups, newest first"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<ExportedSignup>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let rows = state
        .app
        .waitlist
        .export()
        .await
        .map_err(into_status_error)?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use uuid::Uuid;

    use waitline_app::domain::waitlist::MockWaitlistService;

    use crate::test_helpers::waitlist_service;

    use super::*;

    #[tokio::test]
    async fn test_export_maps_rows_to_camel_case() -> TestResult {
        let uuid = Uuid::new_v4();

        let mut waitlist = MockWaitlistService::new();

        waitlist.expect_export().once().return_once(move || {
            Ok(vec![ExportRow {
                uuid,
                email: "gamer@example.com".to_string(),
                gamertag: Some("PlayerOne".to_string()),
                primary_game: None,
                created_at: Timestamp::UNIX_EPOCH,
                referrer: Some("direct".to_string()),
            }])
        });

        let service =
            waitlist_service(waitlist, Router::with_path("api/admin/export").get(handler));

        let mut res = TestClient::get("http://example.com/api/admin/export")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: serde_json::Value = res.take_json().await?;

        assert_eq!(body[0]["id"], uuid.to_string());
        assert_eq!(body[0]["email"], "gamer@example.com");
        assert_eq!(body[0]["primaryGame"], serde_json::Value::Null);
        assert!(body[0]["createdAt"].is_string(), "createdAt should be set");

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_waitlist_exports_empty_array() -> TestResult {
        let mut waitlist = MockWaitlistService::new();

        waitlist.expect_export().once().return_once(|| Ok(vec![]));

        let service =
            waitlist_service(waitlist, Router::with_path("api/admin/export").get(handler));

        let mut res = TestClient::get("http://example.com/api/admin/export")
            .send(&service)
            .await;

        let body: Vec<ExportedSignup> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.is_empty(), "expected no rows");

        Ok(())
    }
}
