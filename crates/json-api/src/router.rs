//! App Router

use salvo::Router;

use crate::{admin, health, ratelimit, waitlist};

pub(crate) fn api_router() -> Router {
    Router::with_path("api")
        .push(Router::with_path("health").get(health::handler))
        .push(
            Router::with_path("waitlist")
                .push(Router::with_path("count").get(waitlist::count::handler))
                .push(
                    Router::with_path("join")
                        .hoop(ratelimit::handler)
                        .post(waitlist::join::handler),
                ),
        )
        .push(
            Router::with_path("admin")
                .hoop(admin::middleware::handler)
                .push(Router::with_path("stats").get(admin::stats::handler))
                .push(Router::with_path("export").get(admin::export::handler)),
        )
}
