//! Turning raw stop responses into display-ready departures.
//!
//! Departure times are packed integers (930 = 09:30) interpreted as today's
//! local time. There is no wrap to the next day: a departure that has
//! already passed today is skipped, and packed times that cannot be a time
//! of day (the API writes after-midnight departures as 2405 etc.) are
//! skipped as well.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use super::config::StopConfig;
use super::types::StopInfo;

/// A departure ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    /// Short public line number, e.g. "102T"
    pub line_code: String,
    /// "HH:MM"
    pub display_time: String,
    /// Line name from the stop's line directory, if listed
    pub line_name: Option<String>,
    /// When the departure leaves, today
    pub departs_at: NaiveDateTime,
}

/// Look up the name of `line_code` in the stop's line directory.
///
/// Directory entries look like `"1102T 2:Kamppi, Espoo"`; only the part
/// of the name before the first comma is returned.
pub fn extract_line_name(line_code: &str, stop: &StopInfo) -> Option<String> {
    stop.lines()
        .iter()
        .filter_map(|line| line.split_once(':'))
        .find(|(code, _)| *code == line_code)
        .map(|(_, name)| name.split_once(',').map_or(name, |(first, _)| first).to_string())
}

/// Recover the public line number from the API's padded internal code.
///
/// Takes the four characters after the first, drops a single leading `0`
/// and trims whitespace: "1102T 2" → "102T", "1065A 1" → "65A".
pub fn normalize_line_code(raw: &str) -> String {
    let short: String = raw.chars().skip(1).take(4).collect();
    let short = short.strip_prefix('0').unwrap_or(&short);
    short.trim().to_string()
}

/// Format a packed time as "HH:MM", e.g. 930 → "09:30".
pub fn format_time(raw: u32) -> String {
    let digits = format!("{raw:04}");
    let (hours, minutes) = (&digits[..2], &digits[digits.len() - 2..]);
    format!("{hours}:{minutes}")
}

/// The packed time on `date`, or `None` if it is not a valid time of day.
pub fn departure_time(raw: u32, date: NaiveDate) -> Option<NaiveDateTime> {
    let time = NaiveTime::from_hms_opt(raw / 100, raw % 100, 0)?;
    Some(date.and_time(time))
}

/// Build the upcoming departures for one stop.
///
/// Walks the API's departures in order, skipping those not strictly after
/// `now`, until `stop.max_entries` have been accepted. Skipped departures
/// do not count toward the limit.
pub fn build_departures(stop: &StopConfig, info: &StopInfo, now: NaiveDateTime) -> Vec<Departure> {
    let today = now.date();
    let mut accepted = Vec::new();

    for raw in info.departures() {
        if accepted.len() >= stop.max_entries {
            break;
        }

        let Some(departs_at) = departure_time(raw.time, today) else {
            debug!(stop = %stop.code, time = raw.time, "skipping unrepresentable departure time");
            continue;
        };

        if departs_at <= now {
            debug!(stop = %stop.code, %departs_at, %now, "skipping departed");
            continue;
        }

        accepted.push(Departure {
            line_code: normalize_line_code(&raw.code),
            display_time: format_time(raw.time),
            line_name: extract_line_name(&raw.code, info),
            departs_at,
        });
    }

    accepted
}
