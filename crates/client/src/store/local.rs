//! Durable local fallback store.
//!
//! Entries are kept in a JSON array on disk so signups taken while the
//! backend is down survive restarts and can be re-entered later.

use std::{path::PathBuf, time::Duration};

use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use tokio::fs;
use uuid::Uuid;

use crate::store::{SignupForm, SignupReceipt, StoreError, WaitlistStore};

/// Store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct LocalWaitlistStore {
    path: PathBuf,
    latency: Duration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LocalEntry {
    id: Uuid,
    email: String,
    gamertag: Option<String>,
    primary_game: Option<String>,
    submitted_at: Timestamp,
    user_agent: Option<String>,
    referrer: String,
}

impl LocalWaitlistStore {
    /// Store entries at `path`, simulating the backend's response time so
    /// the form behaves the same in fallback mode.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_latency(path, Duration::from_secs(1))
    }

    #[must_use]
    pub fn with_latency(path: impl Into<PathBuf>, latency: Duration) -> Self {
        Self {
            path: path.into(),
            latency,
        }
    }

    async fn read_entries(&self) -> Result<Vec<LocalEntry>, StoreError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(read_error) if read_error.kind() == std::io::ErrorKind::NotFound => Ok(vec![]),
            Err(read_error) => Err(read_error.into()),
        }
    }

    async fn write_entries(&self, entries: &[LocalEntry]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(entries)?;

        fs::write(&self.path, bytes).await?;

        Ok(())
    }
}

#[async_trait]
impl WaitlistStore for LocalWaitlistStore {
    async fn health_check(&self) -> bool {
        true
    }

    async fn join(&self, form: SignupForm) -> Result<SignupReceipt, StoreError> {
        tokio::time::sleep(self.latency).await;

        let email = form.email.trim().to_lowercase();

        let mut entries = self.read_entries().await?;

        if entries.iter().any(|entry| entry.email == email) {
            return Err(StoreError::AlreadyRegistered);
        }

        let id = Uuid::new_v4();

        entries.push(LocalEntry {
            id,
            email,
            gamertag: form.gamertag,
            primary_game: form.primary_game,
            submitted_at: Timestamp::now(),
            user_agent: form.user_agent,
            referrer: form.referrer.unwrap_or_else(|| "direct".to_string()),
        });

        self.write_entries(&entries).await?;

        Ok(SignupReceipt {
            id,
            message: "Successfully joined the waitlist".to_string(),
        })
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.read_entries().await?.len() as i64)
    }
}
