//! Test helpers.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use waitline_app::{
    context::AppContext,
    domain::waitlist::{
        MockWaitlistService, WaitlistService, WaitlistServiceError,
        data::NewSignup,
        email,
        prepare_signup,
        records::{ExportRow, SignupRecord, WaitlistStats},
    },
    ratelimit::FixedWindowLimiter,
};

use crate::state::State;

pub(crate) const TEST_ADMIN_PASSWORD: &str = "hunter2";

pub(crate) fn state_with_waitlist(waitlist: MockWaitlistService) -> Arc<State> {
    State::new(
        AppContext {
            waitlist: Arc::new(waitlist),
        },
        FixedWindowLimiter::default(),
        TEST_ADMIN_PASSWORD.to_string(),
    )
}

pub(crate) fn state_with_limiter(
    waitlist: MockWaitlistService,
    limiter: FixedWindowLimiter,
) -> Arc<State> {
    State::new(
        AppContext {
            waitlist: Arc::new(waitlist),
        },
        limiter,
        TEST_ADMIN_PASSWORD.to_string(),
    )
}

pub(crate) fn waitlist_service(waitlist: MockWaitlistService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_waitlist(waitlist)))
            .push(route),
    )
}

pub(crate) fn make_record(email: &str) -> SignupRecord {
    let now = Timestamp::now();

    SignupRecord {
        uuid: Uuid::new_v4(),
        email: email.to_string(),
        email_hash: email::hash_email(email),
        gamertag: None,
        primary_game: None,
        ip_address: None,
        user_agent: None,
        referrer: Some("direct".to_string()),
        consent_given: true,
        consent_timestamp: now,
        created_at: now,
    }
}

/// A real `WaitlistService` over a vector, for end-to-end handler tests
/// that need actual validation and duplicate detection.
#[derive(Default)]
pub(crate) struct InMemoryWaitlist {
    entries: Mutex<Vec<SignupRecord>>,
}

impl InMemoryWaitlist {
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<SignupRecord>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl WaitlistService for InMemoryWaitlist {
    async fn join(&self, signup: NewSignup) -> Result<SignupRecord, WaitlistServiceError> {
        let record = prepare_signup(signup)?;

        let mut entries = self.lock();

        if entries.iter().any(|entry| entry.email_hash == record.email_hash) {
            return Err(WaitlistServiceError::AlreadyExists);
        }

        entries.push(record.clone());

        Ok(record)
    }

    async fn count(&self) -> Result<i64, WaitlistServiceError> {
        Ok(self.lock().len() as i64)
    }

    async fn stats(&self) -> Result<WaitlistStats, WaitlistServiceError> {
        Ok(WaitlistStats {
            total_signups: self.lock().len() as i64,
            ..WaitlistStats::default()
        })
    }

    async fn export(&self) -> Result<Vec<ExportRow>, WaitlistServiceError> {
        Ok(self
            .lock()
            .iter()
            .rev()
            .map(|entry| ExportRow {
                uuid: entry.uuid,
                email: entry.email.clone(),
                gamertag: entry.gamertag.clone(),
                primary_game: entry.primary_game.clone(),
                created_at: entry.created_at,
                referrer: entry.referrer.clone(),
            })
            .collect())
    }

    async fn ping(&self) -> Result<(), WaitlistServiceError> {
        Ok(())
    }
}
