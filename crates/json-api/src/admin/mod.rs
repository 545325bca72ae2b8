//! Admin handlers, gated behind a shared password.

pub(crate) mod export;
pub(crate) mod middleware;
pub(crate) mod stats;
