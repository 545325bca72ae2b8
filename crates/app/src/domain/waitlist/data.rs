//! Waitlist Signup Data

/// A signup submission as received from a client, before validation.
///
/// Provenance fields (`ip_address`, `user_agent`, `referrer`) are
/// best-effort and captured at the HTTP boundary; any of them may be
/// absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewSignup {
    pub email: String,
    pub gamertag: Option<String>,
    pub primary_game: Option<String>,
    pub consent: bool,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}
