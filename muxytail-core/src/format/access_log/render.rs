use chrono::TimeZone;
use std::fmt::Display;

/// Display format for request timestamps, e.g. `2/Oct 14:05:09`.
pub const TIME_FORMAT: &str = "%-d/%b %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Ok,
    Error,
    Other,
}

/// `[200, 300)` is OK, `400` and above is an error, everything else
/// (redirects, informational, zero) is other.
pub fn classify_status(status: i64) -> StatusClass {
    match status {
        200..=299 => StatusClass::Ok,
        400.. => StatusClass::Error,
        _ => StatusClass::Other,
    }
}

/// The part of a dotted version before the first `.`.
pub fn major(version: &str) -> &str {
    version.split_once('.').map_or(version, |(major, _)| major)
}

/// The longest value; the first one wins a tie.
pub fn longest(values: &[String]) -> &str {
    let mut chosen = "";
    for value in values {
        if value.len() > chosen.len() {
            chosen = value;
        }
    }
    chosen
}

/// Formats epoch seconds in `tz`, truncating fractional seconds.
///
/// Returns an empty string for values chrono cannot represent.
pub fn format_timestamp<Tz>(ts: f64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if !ts.is_finite() {
        return String::new();
    }

    tz.timestamp_opt(ts.trunc() as i64, 0)
        .earliest()
        .map(|dt| dt.format(TIME_FORMAT).to_string())
        .unwrap_or_default()
}

/// Replaces every run of whitespace with a single space.
pub fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_space = false;

    for ch in s.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(ch);
            in_space = false;
        }
    }

    out
}
