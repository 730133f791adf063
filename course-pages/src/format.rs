use chrono::{DateTime, NaiveDate};

/// `125.0` -> `"2m 5s"`. Minutes are floored, leftover seconds rounded.
pub fn format_duration(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let minutes = (seconds / 60.0).floor();
    let remaining = (seconds % 60.0).round();
    format!("{}m {}s", minutes as u64, remaining as u64)
}

/// ISO date (`2024-03-09`) or RFC 3339 timestamp to `09/03/2024`.
/// Anything else is returned unchanged.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()));
    match date {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => raw.to_string(),
    }
}
