//! Post dates.
//!
//! The backend sends `date` as a site-local `YYYY-MM-DDTHH:MM:SS` without
//! offset; it is read as UTC. Both the display string and the ISO timestamp
//! come from one parsed value so they cannot drift apart.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use crate::types::{Result, SiteError};

const MONTHS: [&str; 12] = [
    "gener", "febrer", "març", "abril", "maig", "juny", "juliol", "agost", "setembre", "octubre",
    "novembre", "desembre",
];

/// A post timestamp in both of its rendered forms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDate {
    pub timestamp: DateTime<Utc>,
    /// e.g. `10 de maig del 2024`
    pub display: String,
    /// e.g. `2024-05-10T00:00:00.000Z`
    pub iso: String,
}

impl PostDate {
    /// Parse a backend date string
    pub fn parse(raw: &str) -> Result<Self> {
        let timestamp = parse_backend_date(raw)?;
        Ok(Self::from_timestamp(timestamp))
    }

    pub fn from_timestamp(timestamp: DateTime<Utc>) -> Self {
        Self {
            display: display_date(&timestamp),
            iso: iso_datetime(&timestamp),
            timestamp,
        }
    }
}

/// Parse RFC 3339, offset-less datetime, or bare date
pub fn parse_backend_date(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }

    Err(SiteError::Decode(format!("Unparseable date: {:?}", raw)))
}

/// Catalan long date, as `ca-ES` renders `{ day, month: long, year }`
pub fn display_date(timestamp: &DateTime<Utc>) -> String {
    let month = MONTHS[timestamp.month0() as usize];
    let preposition = if month.starts_with(['a', 'e', 'i', 'o', 'u']) {
        "d’"
    } else {
        "de "
    };
    format!(
        "{} {}{} del {}",
        timestamp.day(),
        preposition,
        month,
        timestamp.year()
    )
}

/// ISO-8601 in UTC with millisecond precision and `Z` suffix
pub fn iso_datetime(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
