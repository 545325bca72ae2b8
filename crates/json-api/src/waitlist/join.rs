//! Join Waitlist Handler

use std::sync::Arc;

use salvo::{
    http::header::{HeaderName, LOCATION, REFERER, USER_AGENT},
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use waitline_app::domain::waitlist::data::NewSignup;

use crate::{extensions::*, ratelimit::client_key, state::State, waitlist::errors::into_status_error};

/// Join Waitlist Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JoinWaitlistRequest {
    /// Email address to register
    pub email: String,
    /// Optional player handle
    pub gamertag: Option<String>,
    /// Optional favourite game
    pub primary_game: Option<String>,
    /// Explicit consent; must be `true`
    #[serde(default)]
    pub consent: bool,
}

/// Joined Waitlist Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct JoinedResponse {
    pub success: bool,
    pub message: String,
    /// Identifier of the new entry
    pub id: Uuid,
    /// Creation time, RFC 3339
    pub timestamp: String,
}

/// Join Waitlist Handler
///
/// Client address, user agent, and referrer are captured server-side; the
/// request body cannot spoof them.
#[endpoint(
    tags("waitlist"),
    summary = "Join the waitlist",
    responses(
        (status_code = StatusCode::CREATED, description = "Signup stored"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::TOO_MANY_REQUESTS, description = "Rate limited"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<JoinWaitlistRequest>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<JoinedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request = json.into_inner();

    let signup = NewSignup {
        email: request.email,
        gamertag: request.gamertag,
        primary_game: request.primary_game,
        consent: request.consent,
        ip_address: client_key(req),
        user_agent: header_string(req, USER_AGENT),
        referrer: header_string(req, REFERER).or_else(|| Some("direct".to_string())),
    };

    let record = state
        .app
        .waitlist
        .join(signup)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/api/waitlist/{}", record.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(JoinedResponse {
        success: true,
        message: "Successfully joined the waitlist".to_string(),
        id: record.uuid,
        timestamp: record.created_at.to_string(),
    }))
}

fn header_string(req: &Request, name: HeaderName) -> Option<String> {
    let value = req.headers().get(name)?.to_str().ok()?.trim();

    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use waitline_app::domain::waitlist::{MockWaitlistService, WaitlistServiceError};

    use crate::test_helpers::{make_record, waitlist_service};

    use super::*;

    fn make_service(waitlist: MockWaitlistService) -> Service {
        waitlist_service(waitlist, Router::with_path("api/waitlist/join").post(handler))
    }

    #[tokio::test]
    async fn test_join_success_returns_201_with_location() -> TestResult {
        let record = make_record("gamer@example.com");
        let uuid = record.uuid;

        let mut waitlist = MockWaitlistService::new();

        waitlist
            .expect_join()
            .once()
            .withf(|signup| {
                signup.email == "gamer@example.com"
                    && signup.gamertag.as_deref() == Some("PlayerOne")
                    && signup.consent
                    && signup.referrer.as_deref() == Some("direct")
            })
            .return_once(move |_| Ok(record));

        let mut res = TestClient::post("http://example.com/api/waitlist/join")
            .json(&json!({
                "email": "gamer@example.com",
                "gamertag": "PlayerOne",
                "consent": true,
            }))
            .send(&make_service(waitlist))
            .await;

        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(location, Some(format!("/api/waitlist/{uuid}").as_str()));
        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: JoinedResponse = res.take_json().await?;

        assert!(body.success);
        assert_eq!(body.id, uuid);

        Ok(())
    }

    #[tokio::test]
    async fn test_join_forwards_referer_header() -> TestResult {
        let record = make_record("gamer@example.com");

        let mut waitlist = MockWaitlistService::new();

        waitlist
            .expect_join()
            .once()
            .withf(|signup| signup.referrer.as_deref() == Some("https://news.example.com"))
            .return_once(move |_| Ok(record));

        let res = TestClient::post("http://example.com/api/waitlist/join")
            .add_header("referer", "https://news.example.com", true)
            .json(&json!({ "email": "gamer@example.com", "consent": true }))
            .send(&make_service(waitlist))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_email_returns_409() -> TestResult {
        let mut waitlist = MockWaitlistService::new();

        waitlist
            .expect_join()
            .once()
            .return_once(|_| Err(WaitlistServiceError::AlreadyExists));

        let mut res = TestClient::post("http://example.com/api/waitlist/join")
            .json(&json!({ "email": "gamer@example.com", "consent": true }))
            .send(&make_service(waitlist))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        let body = res.take_string().await?;

        assert!(
            body.contains("Email already registered"),
            "409 body should explain the conflict: {body}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_email_returns_400() -> TestResult {
        let mut waitlist = MockWaitlistService::new();

        waitlist
            .expect_join()
            .once()
            .return_once(|_| Err(WaitlistServiceError::InvalidEmail));

        let res = TestClient::post("http://example.com/api/waitlist/join")
            .json(&json!({ "email": "not-an-email", "consent": true }))
            .send(&make_service(waitlist))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_consent_returns_400() -> TestResult {
        let mut waitlist = MockWaitlistService::new();

        waitlist
            .expect_join()
            .once()
            .withf(|signup| !signup.consent)
            .return_once(|_| Err(WaitlistServiceError::ConsentRequired));

        let res = TestClient::post("http://example.com/api/waitlist/join")
            .json(&json!({ "email": "gamer@example.com" }))
            .send(&make_service(waitlist))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_non_json_body_never_reaches_the_service() -> TestResult {
        let mut waitlist = MockWaitlistService::new();

        waitlist.expect_join().never();

        let res = TestClient::post("http://example.com/api/waitlist/join")
            .text("not json")
            .send(&make_service(waitlist))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
