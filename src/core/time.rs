//! Timespan parsing and formatting.
//!
//! Config files write timespans as `[-][MM:]SS[.fff]`. Internally every
//! clock value is signed milliseconds; a player's remaining time goes
//! negative once they run into overtime.

use super::error::ConfigError;

/// Parse `[-][MM:]SS[.fff]` into milliseconds.
///
/// Fractional digits beyond milliseconds are truncated.
///
/// ```
/// use tile_engine::core::parse_timespan;
///
/// assert_eq!(parse_timespan("1:12").unwrap(), 72_000);
/// assert_eq!(parse_timespan("-5.1234").unwrap(), -5_123);
/// ```
pub fn parse_timespan(input: &str) -> Result<i64, ConfigError> {
    let invalid = || ConfigError::Timespan(input.to_string());
    let text = input.trim();

    let (negative, text) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let (minutes, rest) = match text.split_once(':') {
        Some((m, rest)) => (Some(m), rest),
        None => (None, text),
    };
    let (seconds, fraction) = match rest.split_once('.') {
        Some((s, f)) => (s, Some(f)),
        None => (rest, None),
    };

    let digits = |s: &str| -> Result<i64, ConfigError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        s.parse::<i64>().map_err(|_| invalid())
    };

    let mut millis = digits(seconds)?.checked_mul(1000).ok_or_else(invalid)?;
    if let Some(m) = minutes {
        millis = digits(m)?
            .checked_mul(60_000)
            .and_then(|m| m.checked_add(millis))
            .ok_or_else(invalid)?;
    }
    if let Some(f) = fraction {
        if f.is_empty() || !f.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        // Pad or cut to exactly three digits.
        let ms: String = f.chars().chain("000".chars()).take(3).collect();
        millis = millis.checked_add(digits(&ms)?).ok_or_else(invalid)?;
    }

    Ok(if negative { -millis } else { millis })
}

/// Format milliseconds as `[-]MM:SS.mmm`.
///
/// ```
/// use tile_engine::core::format_timespan;
///
/// assert_eq!(format_timespan(72_005), "01:12.005");
/// assert_eq!(format_timespan(-1_500), "-00:01.500");
/// ```
#[must_use]
pub fn format_timespan(millis: i64) -> String {
    let sign = if millis < 0 { "-" } else { "" };
    let abs = millis.unsigned_abs();
    let ms = abs % 1000;
    let s = (abs / 1000) % 60;
    let m = abs / 60_000;
    format!("{sign}{m:02}:{s:02}.{ms:03}")
}
