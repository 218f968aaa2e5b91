//! Local-time helpers: CLI dates → epoch window, epoch → report timestamp

use chrono::{Local, LocalResult, NaiveDate, TimeZone};
use crate::utils::{DigestError, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Inclusive `[from, till]` range in epoch seconds, plus its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: i64,
    pub till: i64,
    pub label: String,
}

impl TimeWindow {
    /// `from` starts at local midnight, `to` ends at local 23:59:59.
    pub fn from_dates(from: &str, to: &str) -> Result<Self> {
        let start_day = parse_date(from)?;
        let end_day = parse_date(to)?;
        if start_day > end_day {
            return Err(DigestError::config(format!(
                "--from {} is after --to {}", from, to
            )));
        }

        Ok(Self {
            from: local_epoch(start_day, 0, 0, 0)?,
            till: local_epoch(end_day, 23, 59, 59)?,
            label: format!("{} → {}", from, to),
        })
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| DigestError::config(format!("invalid date {:?} (expected YYYY-MM-DD): {}", s, e)))
}

fn local_epoch(day: NaiveDate, h: u32, m: u32, s: u32) -> Result<i64> {
    let naive = day
        .and_hms_opt(h, m, s)
        .ok_or_else(|| DigestError::config(format!("invalid time {:02}:{:02}:{:02}", h, m, s)))?;

    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.timestamp()),
        // DST fold: midnight takes the earlier instant, end of day the later one
        LocalResult::Ambiguous(early, late) => {
            let dt = if h == 0 { early } else { late };
            Ok(dt.timestamp())
        }
        LocalResult::None => Err(DigestError::config(format!(
            "{} does not exist in the local timezone", naive
        ))),
    }
}

/// Epoch seconds → local `YYYY-MM-DD HH:MM:SS`; out-of-range values stay numeric.
pub fn format_timestamp(ts: i64) -> String {
    match Local.timestamp_opt(ts, 0) {
        LocalResult::Single(dt) => dt.format(TIMESTAMP_FORMAT).to_string(),
        _ => ts.to_string(),
    }
}
