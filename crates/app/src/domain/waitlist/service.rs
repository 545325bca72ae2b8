//! Waitlist service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::domain::waitlist::{
    data::NewSignup,
    email,
    errors::WaitlistServiceError,
    records::{ExportRow, SignupRecord, WaitlistStats},
    repository::PgWaitlistRepository,
};

#[derive(Debug, Clone)]
pub struct PgWaitlistService {
    repository: PgWaitlistRepository,
}

impl PgWaitlistService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgWaitlistRepository::new(pool),
        }
    }
}

#[async_trait]
impl WaitlistService for PgWaitlistService {
    async fn join(&self, signup: NewSignup) -> Result<SignupRecord, WaitlistServiceError> {
        let record = prepare_signup(signup)?;

        // Advisory read: gives duplicates a clean rejection without burning
        // an insert. The unique index settles concurrent submissions that
        // slip past it.
        if self
            .repository
            .find_uuid_by_email_hash(&record.email_hash)
            .await?
            .is_some()
        {
            return Err(WaitlistServiceError::AlreadyExists);
        }

        self.repository.create_signup(&record).await?;

        let hash_prefix = record.email_hash.get(..8).unwrap_or(&record.email_hash);
        info!("new waitlist signup: {hash_prefix}…");

        Ok(record)
    }

    async fn count(&self) -> Result<i64, WaitlistServiceError> {
        Ok(self.repository.count_signups().await?)
    }

    async fn stats(&self) -> Result<WaitlistStats, WaitlistServiceError> {
        let total_signups = self.repository.count_signups().await?;
        let signups_today = self.repository.count_signups_today().await?;
        let game_breakdown = self.repository.game_breakdown().await?;
        let referrer_breakdown = self.repository.referrer_breakdown().await?;
        let signups_by_day = self.repository.signups_by_day().await?;

        Ok(WaitlistStats {
            total_signups,
            signups_today,
            game_breakdown,
            referrer_breakdown,
            signups_by_day,
        })
    }

    async fn export(&self) -> Result<Vec<ExportRow>, WaitlistServiceError> {
        Ok(self.repository.export_signups().await?)
    }

    async fn ping(&self) -> Result<(), WaitlistServiceError> {
        Ok(self.repository.ping().await?)
    }
}

/// Validate a submission and build the record to persist.
///
/// Consent and email shape are checked before any storage traffic, so
/// rejected submissions never touch the database.
pub fn prepare_signup(signup: NewSignup) -> Result<SignupRecord, WaitlistServiceError> {
    if !signup.consent {
        return Err(WaitlistServiceError::ConsentRequired);
    }

    let email = signup.email.trim().to_owned();

    if !email::is_valid_email(&email) {
        return Err(WaitlistServiceError::InvalidEmail);
    }

    let now = Timestamp::now();

    Ok(SignupRecord {
        uuid: Uuid::new_v4(),
        email_hash: email::hash_email(&email),
        email,
        gamertag: signup.gamertag.as_deref().and_then(email::sanitize),
        primary_game: signup.primary_game.as_deref().and_then(email::sanitize),
        ip_address: signup.ip_address,
        user_agent: signup.user_agent,
        referrer: signup.referrer.as_deref().and_then(email::sanitize),
        consent_given: true,
        consent_timestamp: now,
        created_at: now,
    })
}

#[automock]
#[async_trait]
pub trait WaitlistService: Send + Sync {
    /// Validate a submission and persist it, rejecting duplicates.
    async fn join(&self, signup: NewSignup) -> Result<SignupRecord, WaitlistServiceError>;

    /// Total number of stored signups.
    async fn count(&self) -> Result<i64, WaitlistServiceError>;

    /// Aggregate statistics for the admin console.
    async fn stats(&self) -> Result<WaitlistStats, WaitlistServiceError>;

    /// All signups for export, newest first.
    async fn export(&self) -> Result<Vec<ExportRow>, WaitlistServiceError>;

    /// Round-trip the storage backend.
    async fn ping(&self) -> Result<(), WaitlistServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn valid_signup() -> NewSignup {
        NewSignup {
            email: "a@b.com".to_string(),
            consent: true,
            ..NewSignup::default()
        }
    }

    #[test]
    fn prepare_rejects_missing_consent() {
        let signup = NewSignup {
            consent: false,
            ..valid_signup()
        };

        assert!(matches!(
            prepare_signup(signup),
            Err(WaitlistServiceError::ConsentRequired)
        ));
    }

    #[test]
    fn prepare_rejects_invalid_email() {
        for email in ["", "not-an-email", "a@bcom", "a b@c.com"] {
            let signup = NewSignup {
                email: email.to_string(),
                ..valid_signup()
            };

            assert!(
                matches!(prepare_signup(signup), Err(WaitlistServiceError::InvalidEmail)),
                "expected InvalidEmail for {email:?}"
            );
        }
    }

    #[test]
    fn prepare_trims_email_and_hashes_lowercased() -> TestResult {
        let signup = NewSignup {
            email: "  User@Example.com  ".to_string(),
            ..valid_signup()
        };

        let record = prepare_signup(signup)?;

        assert_eq!(record.email, "User@Example.com");
        assert_eq!(record.email_hash, email::hash_email("user@example.com"));

        Ok(())
    }

    #[test]
    fn prepare_sanitizes_optional_fields() -> TestResult {
        let signup = NewSignup {
            gamertag: Some("  <PlayerOne>  ".to_string()),
            primary_game: Some(String::new()),
            referrer: Some("https://example.com".to_string()),
            ..valid_signup()
        };

        let record = prepare_signup(signup)?;

        assert_eq!(record.gamertag, Some("PlayerOne".to_string()));
        assert_eq!(record.primary_game, None);
        assert_eq!(record.referrer, Some("https://example.com".to_string()));

        Ok(())
    }

    #[test]
    fn prepare_stamps_consent_and_creation_together() -> TestResult {
        let record = prepare_signup(valid_signup())?;

        assert!(record.consent_given);
        assert_eq!(record.consent_timestamp, record.created_at);
        assert!(!record.uuid.is_nil());

        Ok(())
    }
}
