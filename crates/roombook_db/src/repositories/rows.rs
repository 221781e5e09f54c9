//! Conversions between stored columns and domain values.
//!
//! The `Any` driver cannot decode `DateTime<Utc>` or booleans from SQLite,
//! reads SQLite integers back as 32-bit values, and refuses to decode a SQL
//! `NULL` into `Option<String>`. So:
//!
//! * instants are stored as fixed-width RFC 3339 UTC text, which sorts and
//!   compares in SQL exactly like the instants themselves;
//! * flags are stored as small integers;
//! * nullable text columns are selected through `COALESCE(col, '')` and an
//!   empty string reads back as `None`.

use crate::error::DbError;
use chrono::{DateTime, Utc};
use sqlx::any::AnyRow;
use sqlx::Row;

const INSTANT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Sorts before every stored instant.
pub(crate) const EARLIEST_INSTANT: &str = "0000-01-01T00:00:00.000Z";
/// Sorts after every stored instant.
pub(crate) const LATEST_INSTANT: &str = "9999-12-31T23:59:59.999Z";

pub(crate) fn to_text(instant: DateTime<Utc>) -> String {
    instant.format(INSTANT_FORMAT).to_string()
}

pub(crate) fn from_text(value: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(value)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|e| DbError::DecodeError(format!("invalid instant '{value}': {e}")))
}

pub(crate) fn instant(row: &AnyRow, column: &str) -> Result<DateTime<Utc>, DbError> {
    let value: String = row.try_get(column)?;
    from_text(&value)
}

/// Reads a column selected as `COALESCE(column, '') AS column`.
pub(crate) fn optional_text(row: &AnyRow, column: &str) -> Result<Option<String>, DbError> {
    let value: String = row.try_get(column)?;
    Ok(Some(value).filter(|v| !v.is_empty()))
}

pub(crate) fn to_flag(value: bool) -> i64 {
    i64::from(value)
}

pub(crate) fn from_flag(value: i64) -> bool {
    value != 0
}

pub(crate) fn query_error(context: &str) -> impl FnOnce(sqlx::Error) -> DbError + '_ {
    move |e| {
        tracing::error!("{}: {}", context, e);
        DbError::QueryError(e.to_string())
    }
}
