//! Shared waitlist domain, persistence, and admission-control modules.

pub mod context;
pub mod database;
pub mod domain;
pub mod ratelimit;
