//! Display formatting for sizes and dates.

use serde::Deserialize;

use crate::entry::parse_timestamp;

/// Rendered in place of a missing value.
pub const PLACEHOLDER: &str = "—";

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Human-readable byte count, or `""` when the count is absent or not finite.
///
/// Values below 10 in a scaled unit get one decimal, with a trailing `.0`
/// dropped: `1536` → `"1.5 KB"`, `2097152` → `"2 MB"`.
pub fn format_bytes(bytes: Option<f64>) -> String {
    let Some(mut size) = bytes.filter(|b| b.is_finite()) else {
        return String::new();
    };
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    // Halves round up: 1280 → "1.3 KB", 10752 → "11 KB".
    let number = if size < 10.0 && unit > 0 {
        let one_decimal = format!("{:.1}", (size * 10.0).round() / 10.0);
        match one_decimal.strip_suffix(".0") {
            Some(whole) => whole.to_string(),
            None => one_decimal,
        }
    } else {
        format!("{:.0}", size.round())
    };
    format!("{} {}", number, UNITS[unit])
}

/// Size column for listings: placeholder for absent or zero sizes.
pub fn size_cell(bytes: Option<f64>) -> String {
    match bytes {
        Some(b) if b > 0.0 => {
            let formatted = format_bytes(Some(b));
            if formatted.is_empty() {
                PLACEHOLDER.to_string()
            } else {
                formatted
            }
        }
        _ => PLACEHOLDER.to_string(),
    }
}

/// Date convention used when rendering upload times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateLocale {
    /// `18/10/2025`
    #[default]
    Fr,
    /// `10/18/2025`
    En,
    /// `2025-10-18`
    Iso,
}

impl DateLocale {
    fn pattern(self) -> &'static str {
        match self {
            DateLocale::Fr => "%d/%m/%Y",
            DateLocale::En => "%-m/%-d/%Y",
            DateLocale::Iso => "%Y-%m-%d",
        }
    }
}

/// Calendar date of `timestamp` in the given convention, or the placeholder.
pub fn format_date(timestamp: Option<&str>, locale: DateLocale) -> String {
    timestamp
        .and_then(parse_timestamp)
        .map(|t| t.format(locale.pattern()).to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}
