//! Waitlist Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::waitlist::records::{BreakdownRow, DailyCount, ExportRow, SignupRecord};

const CREATE_SIGNUP_SQL: &str = include_str!("sql/create_signup.sql");
const FIND_BY_EMAIL_HASH_SQL: &str = include_str!("sql/find_by_email_hash.sql");
const COUNT_SIGNUPS_SQL: &str = include_str!("sql/count_signups.sql");
const COUNT_SIGNUPS_TODAY_SQL: &str = include_str!("sql/count_signups_today.sql");
const GAME_BREAKDOWN_SQL: &str = include_str!("sql/game_breakdown.sql");
const REFERRER_BREAKDOWN_SQL: &str = include_str!("sql/referrer_breakdown.sql");
const SIGNUPS_BY_DAY_SQL: &str = include_str!("sql/signups_by_day.sql");
const EXPORT_SIGNUPS_SQL: &str = include_str!("sql/export_signups.sql");
const PING_SQL: &str = "SELECT 1";

#[derive(Debug, Clone)]
pub(crate) struct PgWaitlistRepository {
    pool: PgPool,
}

impl PgWaitlistRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a signup. A single statement, so the unique `email_hash`
    /// constraint decides duplicate races atomically.
    pub(crate) async fn create_signup(&self, record: &SignupRecord) -> Result<(), sqlx::Error> {
        query(CREATE_SIGNUP_SQL)
            .bind(record.uuid)
            .bind(&record.email_hash)
            .bind(&record.email)
            .bind(record.gamertag.as_deref())
            .bind(record.primary_game.as_deref())
            .bind(record.ip_address.as_deref())
            .bind(record.user_agent.as_deref())
            .bind(record.referrer.as_deref())
            .bind(record.consent_given)
            .bind(SqlxTimestamp::from(record.consent_timestamp))
            .bind(SqlxTimestamp::from(record.created_at))
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub(crate) async fn find_uuid_by_email_hash(
        &self,
        email_hash: &str,
    ) -> Result<Option<Uuid>, sqlx::Error> {
        query_scalar::<Postgres, Uuid>(FIND_BY_EMAIL_HASH_SQL)
            .bind(email_hash)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn count_signups(&self) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_SIGNUPS_SQL)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn count_signups_today(&self) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_SIGNUPS_TODAY_SQL)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn game_breakdown(&self) -> Result<Vec<BreakdownRow>, sqlx::Error> {
        query_as::<Postgres, BreakdownRow>(GAME_BREAKDOWN_SQL)
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn referrer_breakdown(&self) -> Result<Vec<BreakdownRow>, sqlx::Error> {
        query_as::<Postgres, BreakdownRow>(REFERRER_BREAKDOWN_SQL)
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn signups_by_day(&self) -> Result<Vec<DailyCount>, sqlx::Error> {
        query_as::<Postgres, DailyCount>(SIGNUPS_BY_DAY_SQL)
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn export_signups(&self) -> Result<Vec<ExportRow>, sqlx::Error> {
        query_as::<Postgres, ExportRow>(EXPORT_SIGNUPS_SQL)
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn ping(&self) -> Result<(), sqlx::Error> {
        query(PING_SQL).execute(&self.pool).await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for BreakdownRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            label: row.try_get("label")?,
            count: row.try_get("count")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for DailyCount {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            day: row.try_get("day")?,
            count: row.try_get("count")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ExportRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            email: row.try_get("email")?,
            gamertag: row.try_get("gamertag")?,
            primary_game: row.try_get("primary_game")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            referrer: row.try_get("referrer")?,
        })
    }
}
