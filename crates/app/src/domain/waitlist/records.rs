//! Waitlist Records

use jiff::Timestamp;
use uuid::Uuid;

/// A stored waitlist entry. Append-only: no update or delete is defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRecord {
    pub uuid: Uuid,
    pub email: String,
    /// SHA-256 hex digest of the lower-cased email; unique per entry.
    pub email_hash: String,
    pub gamertag: Option<String>,
    pub primary_game: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub consent_given: bool,
    pub consent_timestamp: Timestamp,
    pub created_at: Timestamp,
}

/// One row of the admin export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub uuid: Uuid,
    pub email: String,
    pub gamertag: Option<String>,
    pub primary_game: Option<String>,
    pub created_at: Timestamp,
    pub referrer: Option<String>,
}

/// A single aggregation bucket (label, count).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownRow {
    pub label: String,
    pub count: i64,
}

/// Signups for one calendar day, `day` formatted as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyCount {
    pub day: String,
    pub count: i64,
}

/// Aggregate waitlist statistics for the admin console.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WaitlistStats {
    pub total_signups: i64,
    pub signups_today: i64,
    pub game_breakdown: Vec<BreakdownRow>,
    pub referrer_breakdown: Vec<BreakdownRow>,
    /// Ascending chronological order.
    pub signups_by_day: Vec<DailyCount>,
}
