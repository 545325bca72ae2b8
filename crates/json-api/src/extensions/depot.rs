//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use tracing::error;

/// Fallible access to values injected into the depot.
///
/// Every waitlist handler pulls the shared [`State`](crate::state::State)
/// this way; if the affix middleware has not supplied it the request
/// cannot be served, so the failure is logged and becomes a 500.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>().map_err(|_ignored| {
            error!("depot missing {}", std::any::type_name::<T>());

            StatusError::internal_server_error()
        })
    }
}
