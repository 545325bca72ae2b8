//! Signup client that prefers the backend and falls back to local storage.

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::store::{SignupForm, SignupReceipt, StoreError, WaitlistStore};

/// Which backend a client ended up using.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    Remote,
    Local,
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupOutcome {
    pub receipt: SignupReceipt,
    /// Authoritative count read back from the store that took the signup.
    pub count: i64,
    pub mode: StoreMode,
}

/// Waitlist signup client.
///
/// The backend is probed once, on first use; every later call sticks with
/// that decision. Entries taken in fallback mode stay local, there is no
/// automatic reconciliation back to the server.
pub struct SignupClient {
    remote: Box<dyn WaitlistStore>,
    fallback: Box<dyn WaitlistStore>,
    mode: OnceCell<StoreMode>,
}

impl SignupClient {
    #[must_use]
    pub fn new(remote: Box<dyn WaitlistStore>, fallback: Box<dyn WaitlistStore>) -> Self {
        Self {
            remote,
            fallback,
            mode: OnceCell::new(),
        }
    }

    /// Client over a backend at `base_url` with a JSON file fallback at
    /// `fallback_path`.
    #[must_use]
    pub fn connect(base_url: impl Into<String>, fallback_path: impl Into<std::path::PathBuf>) -> Self {
        Self::new(
            Box::new(crate::store::RemoteWaitlistStore::new(base_url)),
            Box::new(crate::store::LocalWaitlistStore::new(fallback_path)),
        )
    }

    /// The backend in use, probing on the first call.
    pub async fn mode(&self) -> StoreMode {
        *self
            .mode
            .get_or_init(|| async {
                if self.remote.health_check().await {
                    info!("waitlist backend reachable");

                    StoreMode::Remote
                } else {
                    warn!("waitlist backend unreachable, falling back to local storage");

                    StoreMode::Local
                }
            })
            .await
    }

    /// Validate and submit a signup, then read back the new total.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` before any store traffic when the form fails
    /// validation, otherwise whatever the selected store reports.
    pub async fn submit(&self, form: SignupForm) -> Result<SignupOutcome, StoreError> {
        validate(&form)?;

        let mode = self.mode().await;
        let store = self.store(mode);

        let receipt = store.join(form).await?;
        let count = store.count().await?;

        Ok(SignupOutcome {
            receipt,
            count,
            mode,
        })
    }

    /// Current waitlist size from the selected store.
    pub async fn waitlist_count(&self) -> Result<i64, StoreError> {
        let mode = self.mode().await;

        self.store(mode).count().await
    }

    fn store(&self, mode: StoreMode) -> &dyn WaitlistStore {
        match mode {
            StoreMode::Remote => self.remote.as_ref(),
            StoreMode::Local => self.fallback.as_ref(),
        }
    }
}

fn validate(form: &SignupForm) -> Result<(), StoreError> {
    if !form.consent {
        return Err(StoreError::InvalidInput(
            "consent is required to join the waitlist".to_string(),
        ));
    }

    if !is_valid_email(form.email.trim()) {
        return Err(StoreError::InvalidInput(
            "invalid email address".to_string(),
        ));
    }

    Ok(())
}

/// Same permissive shape check the backend applies, so a form that passes
/// here is not bounced with a round trip.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let domain = domain.as_bytes();
    domain.len() >= 3 && domain[1..domain.len() - 1].contains(&b'.')
}
