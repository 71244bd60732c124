use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Offset used when the config does not name one (JST)
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;

/// Where a date stamp came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSource {
    ActualStart,
    ScheduledStart,
    Published,
    Manual,
}

impl std::fmt::Display for DateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateSource::ActualStart => write!(f, "actual start"),
            DateSource::ScheduledStart => write!(f, "scheduled start"),
            DateSource::Published => write!(f, "published"),
            DateSource::Manual => write!(f, "manual"),
        }
    }
}

/// A calendar date rendered as `yyyymmdd`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateStamp {
    pub yyyymmdd: String,
    pub source: DateSource,
}

/// Raw UTC timestamps a video may carry, as RFC 3339 strings
#[derive(Debug, Clone, Default)]
pub struct VideoTimes<'a> {
    pub actual_start: Option<&'a str>,
    pub scheduled_start: Option<&'a str>,
    pub published: Option<&'a str>,
}

static MANUAL_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})\s*[-/.年]\s*(\d{1,2})\s*[-/.月]\s*(\d{1,2})\s*日?$").unwrap());

static COMPACT_DATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{4})(\d{2})(\d{2})$").unwrap());

/// Accept `2024/5/3`, `2024-05-03`, `2024.5.3`, `20240503` or `2024年5月3日`
pub fn normalize_manual_date(input: &str) -> Option<DateStamp> {
    let input = input.trim();
    let caps = MANUAL_DATE.captures(input).or_else(|| COMPACT_DATE.captures(input))?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let day = caps[3].parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;

    Some(DateStamp {
        yyyymmdd: date.format("%Y%m%d").to_string(),
        source: DateSource::Manual,
    })
}

/// Convert an RFC 3339 UTC timestamp to a local `yyyymmdd`
pub fn to_local_yyyymmdd(timestamp: &str, utc_offset_hours: i32) -> Option<String> {
    let offset = FixedOffset::east_opt(utc_offset_hours.checked_mul(3600)?)?;
    let parsed = DateTime::parse_from_rfc3339(timestamp).ok()?;
    Some(parsed.with_timezone(&offset).format("%Y%m%d").to_string())
}

/// Pick the most meaningful date: live start, then scheduled start, then publish
pub fn best_date(times: &VideoTimes<'_>, utc_offset_hours: i32) -> Option<DateStamp> {
    [
        (times.actual_start, DateSource::ActualStart),
        (times.scheduled_start, DateSource::ScheduledStart),
        (times.published, DateSource::Published),
    ]
    .into_iter()
    .find_map(|(ts, source)| {
        let yyyymmdd = to_local_yyyymmdd(ts?, utc_offset_hours)?;
        Some(DateStamp { yyyymmdd, source })
    })
}
