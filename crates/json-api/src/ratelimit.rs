//! Signup rate limiting middleware.

use std::sync::Arc;

use salvo::{http::header::RETRY_AFTER, prelude::*};
use serde::Serialize;
use tracing::{error, warn};

use waitline_app::ratelimit::Decision;

use crate::state::State;

/// Body of a 429 response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RateLimitedBody {
    error: String,
    /// Whole seconds until the client may retry.
    retry_after: u64,
}

/// Refuse clients that exceed the signup rate limit.
///
/// The client key is the first address in `X-Forwarded-For` when present,
/// otherwise the peer address, so deployments behind a proxy limit real
/// clients rather than the proxy itself.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state,
        Err(_error) => {
            res.render(StatusError::internal_server_error());

            return;
        }
    };

    let key = client_key(req).unwrap_or_else(|| "unknown".to_string());

    if let Decision::Limited { retry_after_secs } = state.limiter.check(&key) {
        warn!("rate limited signup from {key}");

        res.status_code(StatusCode::TOO_MANY_REQUESTS);
        res.render(Json(RateLimitedBody {
            error: "Too many signup attempts, please try again later".to_string(),
            retry_after: retry_after_secs,
        }));

        if let Err(header_error) = res.add_header(RETRY_AFTER, retry_after_secs.to_string(), true)
        {
            error!("failed to set retry-after header: {header_error}");
        }

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

/// Best-effort client address for rate limiting and signup records.
pub(crate) fn client_key(req: &Request) -> Option<String> {
    forwarded_for(req).or_else(|| remote_ip(req))
}

fn forwarded_for(req: &Request) -> Option<String> {
    let first = req
        .headers()
        .get("x-forwarded-for")?
        .to_str()
        .ok()?
        .split(',')
        .next()?
        .trim();

    if first.is_empty() {
        None
    } else {
        Some(first.to_string())
    }
}

fn remote_ip(req: &Request) -> Option<String> {
    let addr = req.remote_addr();

    addr.as_ipv4()
        .map(|v4| v4.ip().to_string())
        .or_else(|| addr.as_ipv6().map(|v6| v6.ip().to_string()))
}
