//! Waitlist Errors

use salvo::http::StatusError;
use tracing::error;

use waitline_app::domain::waitlist::WaitlistServiceError;

pub(crate) fn into_status_error(error: WaitlistServiceError) -> StatusError {
    match error {
        WaitlistServiceError::AlreadyExists => {
            StatusError::conflict().brief("Email already registered")
        }
        WaitlistServiceError::InvalidEmail => {
            StatusError::bad_request().brief("Invalid email format")
        }
        WaitlistServiceError::ConsentRequired => {
            StatusError::bad_request().brief("Consent is required to join the waitlist")
        }
        WaitlistServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("Missing required data")
        }
        WaitlistServiceError::Sql(source) => {
            error!("waitlist storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
