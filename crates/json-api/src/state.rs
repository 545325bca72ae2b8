//! State

use std::sync::Arc;

use waitline_app::{context::AppContext, ratelimit::FixedWindowLimiter};

pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) limiter: FixedWindowLimiter,
    pub(crate) admin_password: String,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, limiter: FixedWindowLimiter, admin_password: String) -> Arc<Self> {
        Arc::new(Self {
            app,
            limiter,
            admin_password,
        })
    }
}
