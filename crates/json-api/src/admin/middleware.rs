//! Admin password middleware.

use std::sync::Arc;

use salvo::prelude::*;

use crate::state::State;

/// Gate admin routes on an exact match of the `password` query parameter.
///
/// An empty configured password locks the routes rather than opening them.
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

    let supplied = req.query::<String>("password").unwrap_or_default();

    if supplied.is_empty() || supplied != state.admin_password {
        res.render(StatusError::unauthorized().brief("Unauthorized"));

        return;
    }

    ctrl.call_next(req, depot, res).await;
}
