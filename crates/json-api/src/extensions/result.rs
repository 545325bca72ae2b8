//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::error;

/// Collapse an infrastructure failure into a generic 500.
///
/// The source error is logged together with `context`; the response body
/// stays generic so storage details never reach signup clients.
pub(crate) trait ResultExt<T> {
    fn or_500(self, context: &str) -> Result<T, StatusError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_500(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|source| {
            error!("{context}: {source}");

            StatusError::internal_server_error()
        })
    }
}
