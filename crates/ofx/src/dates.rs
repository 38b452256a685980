//! OFX date-string parsing.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use regex::Regex;
use thiserror::Error;

// OFX dates are YYYYMMDD[HHMMSS[.XXX]][[offset:TZNAME]]. Only the calendar
// date and the bracketed GMT offset are significant; the time-of-day part is
// matched so the offset suffix can be located, then discarded.
static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<date>\d{8})(?P<time>\d{4}\d{2}?(?:\.\d{3})?)?(?:\.\d{3})?(?:\[(?P<offset>-?\d+):(?P<tz>\S+)])?",
    )
    .expect("pattern is valid")
});

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("date string can not be parsed")]
    Unparseable,
    #[error("date tz offset can not be parsed")]
    BadOffset,
}

/// Parses an OFX date string to midnight of its calendar date.
///
/// The bracketed offset wins when present (hours east of GMT, negative for
/// west); otherwise `default_offset` applies, with UTC as the final
/// fallback.
pub fn parse_date(
    s: &str,
    default_offset: Option<FixedOffset>,
) -> Result<DateTime<FixedOffset>, DateError> {
    let caps = DATE_PATTERN.captures(s).ok_or(DateError::Unparseable)?;
    let date =
        NaiveDate::parse_from_str(&caps["date"], "%Y%m%d").map_err(|_| DateError::Unparseable)?;
    let offset = match caps.name("offset") {
        Some(m) => {
            let hours: f64 = m.as_str().parse().map_err(|_| DateError::BadOffset)?;
            FixedOffset::east_opt((hours * 3600.0) as i32).ok_or(DateError::BadOffset)?
        }
        None => default_offset.unwrap_or_else(|| Utc.fix()),
    };
    let midnight = date.and_hms_opt(0, 0, 0).ok_or(DateError::Unparseable)?;
    midnight
        .and_local_timezone(offset)
        .single()
        .ok_or(DateError::Unparseable)
}
