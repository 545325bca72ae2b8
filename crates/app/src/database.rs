//! Database connection management.

use sqlx::{PgPool, query};

const SCHEMA_SQL: &str = include_str!("sql/schema.sql");

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Create the `waitlist` table if it does not exist.
///
/// The table carries a unique constraint on `email_hash`; that constraint,
/// not any application-level read, is what guarantees at-most-one entry per
/// email under concurrent inserts.
///
/// # Errors
///
/// Returns an error when the DDL statement fails.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    query(SCHEMA_SQL).execute(pool).await?;

    Ok(())
}
