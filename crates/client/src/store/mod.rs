//! Waitlist storage backends.

use std::io;

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use uuid::Uuid;

mod local;
mod remote;

pub use local::LocalWaitlistStore;
pub use remote::RemoteWaitlistStore;

/// A signup as collected from the form.
///
/// `user_agent` and `referrer` describe where the signup came from; both
/// are optional and forwarded to whichever store takes the entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignupForm {
    pub email: String,
    pub gamertag: Option<String>,
    pub primary_game: Option<String>,
    pub consent: bool,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

/// Confirmation of a stored signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupReceipt {
    pub id: Uuid,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    AlreadyRegistered,

    #[error("{0}")]
    InvalidInput(String),

    #[error("too many attempts, retry in {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("backend unavailable")]
    Unavailable(#[source] reqwest::Error),

    #[error("unexpected response from backend: {0}")]
    UnexpectedResponse(String),

    #[error("local storage error: {0}")]
    Storage(#[from] io::Error),

    #[error("local storage corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Somewhere signups can be recorded and counted.
#[automock]
#[async_trait]
pub trait WaitlistStore: Send + Sync {
    /// Whether the store is reachable and ready.
    async fn health_check(&self) -> bool;

    /// Record a signup, rejecting duplicates.
    async fn join(&self, form: SignupForm) -> Result<SignupReceipt, StoreError>;

    /// Total signups the store knows about.
    async fn count(&self) -> Result<i64, StoreError>;
}
