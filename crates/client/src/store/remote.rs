//! HTTP client for the waitlist backend.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::store::{SignupForm, SignupReceipt, StoreError, WaitlistStore};

/// Store backed by the waitlist JSON API.
#[derive(Debug, Clone)]
pub struct RemoteWaitlistStore {
    base_url: String,
    http: Client,
}

impl RemoteWaitlistStore {
    /// Create a client for a backend at `base_url`,
    /// e.g. `"http://localhost:3001"`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();

        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            base_url,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl WaitlistStore for RemoteWaitlistStore {
    async fn health_check(&self) -> bool {
        let url = format!("{}/api/health", self.base_url);

        match self.http.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(probe_error) => {
                debug!("backend health probe failed: {probe_error}");

                false
            }
        }
    }

    async fn join(&self, form: SignupForm) -> Result<SignupReceipt, StoreError> {
        let url = format!("{}/api/waitlist/join", self.base_url);

        let body = serde_json::json!({
            "email": form.email,
            "gamertag": form.gamertag,
            "primaryGame": form.primary_game,
            "consent": form.consent,
        });

        // Provenance travels as headers; the backend records it server-side.
        let mut request = self.http.post(&url).json(&body);

        if let Some(user_agent) = &form.user_agent {
            request = request.header(reqwest::header::USER_AGENT, user_agent.as_str());
        }

        if let Some(referrer) = &form.referrer {
            request = request.header(reqwest::header::REFERER, referrer.as_str());
        }

        let response = request.send().await.map_err(StoreError::Unavailable)?;

        match response.status() {
            StatusCode::CREATED | StatusCode::OK => {
                let parsed: JoinedBody = response.json().await.map_err(StoreError::Unavailable)?;

                Ok(SignupReceipt {
                    id: parsed.id,
                    message: parsed.message,
                })
            }
            StatusCode::CONFLICT => Err(StoreError::AlreadyRegistered),
            StatusCode::BAD_REQUEST => {
                let text = response.text().await.unwrap_or_default();

                Err(StoreError::InvalidInput(text))
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after_secs = response
                    .json::<RateLimitedBody>()
                    .await
                    .map(|body| body.retry_after)
                    .unwrap_or_default();

                Err(StoreError::RateLimited { retry_after_secs })
            }
            status => {
                let text = response.text().await.unwrap_or_default();

                Err(StoreError::UnexpectedResponse(format!(
                    "join failed with status {status}: {text}"
                )))
            }
        }
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let url = format!("{}/api/waitlist/count", self.base_url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(StoreError::Unavailable)?;

        if !response.status().is_success() {
            let status = response.status();

            return Err(StoreError::UnexpectedResponse(format!(
                "count failed with status {status}"
            )));
        }

        let parsed: CountBody = response.json().await.map_err(StoreError::Unavailable)?;

        Ok(parsed.count)
    }
}

#[derive(Debug, Deserialize)]
struct JoinedBody {
    id: Uuid,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RateLimitedBody {
    #[serde(rename = "retryAfter")]
    retry_after: u64,
}

#[derive(Debug, Deserialize)]
struct CountBody {
    count: i64,
}
