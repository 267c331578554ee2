//! Registry timestamp parsing and display formatting

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Display format for `ModRecord::date_updated`
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d, %H:%M:%S";

/// Parse an ISO-8601 timestamp into its wall-clock time.
///
/// Accepts RFC 3339 (`Z` or numeric offsets) and naive forms with `T` or a
/// space separator, with or without fractional seconds. The offset is not
/// applied: the result is the time as written.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    let naive = raw.trim_end_matches(['Z', 'z']);
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(naive, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(naive, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Format a registry timestamp for display, returning it verbatim when it
/// cannot be parsed.
pub fn format_display(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format(DISPLAY_FORMAT).to_string(),
        None => raw.to_string(),
    }
}
