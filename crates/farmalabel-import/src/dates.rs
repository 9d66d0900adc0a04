//! Legacy date bridges.
//!
//! The offer source encodes dates as 6-digit `MMDDYY` strings; upload and
//! API records carry free-form date text. Both are normalized to ISO
//! `YYYY-MM-DD` here, and both fall back to "today" rather than failing the
//! surrounding row.

use chrono::NaiveDate;

/// ISO format used everywhere a date becomes display text.
const ISO_DATE: &str = "%Y-%m-%d";

/// Expands a compact `MMDDYY` date into `"20YY-MM-DD"`.
///
/// The century is "20" unconditionally: the legacy exporter never emits
/// pre-2000 dates, so no windowing is applied. Input that is not exactly six
/// ASCII digits falls back to `today`.
#[must_use]
pub fn expand_compact_date(raw: &str, today: NaiveDate) -> String {
    let trimmed = raw.trim();
    if trimmed.len() != 6 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return today.format(ISO_DATE).to_string();
    }
    format!("20{}-{}-{}", &trimmed[4..6], &trimmed[0..2], &trimmed[2..4])
}

/// Normalizes free-form date input to ISO `YYYY-MM-DD`.
///
/// Accepts the formats the upstream sources have been seen to emit: ISO
/// (optionally with a time suffix), slash-separated ISO, and day-first
/// `DD-MM-YYYY` / `DD/MM/YYYY`. Absent or unparseable input falls back to
/// `today`.
#[must_use]
pub fn normalize_date_input(raw: Option<&str>, today: NaiveDate) -> String {
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        return today.format(ISO_DATE).to_string();
    };

    // A time suffix ("2025-05-26T00:00:00" or "2025-05-26 00:00:00") never
    // changes the calendar date; parse the date prefix alone.
    let date_part = text.get(..10).unwrap_or(text);

    for format in [ISO_DATE, "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(date_part, format) {
            return date.format(ISO_DATE).to_string();
        }
    }
    today.format(ISO_DATE).to_string()
}
