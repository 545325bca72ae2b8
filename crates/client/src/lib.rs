//! Signup client for the waitlist backend.
//!
//! Prefers the HTTP backend and falls back to a durable local store when
//! the backend is unreachable, so signups collected at events without
//! connectivity are not lost.

pub mod client;
pub mod store;

pub use client::{SignupClient, SignupOutcome, StoreMode};
pub use store::{SignupForm, SignupReceipt, StoreError, WaitlistStore};
