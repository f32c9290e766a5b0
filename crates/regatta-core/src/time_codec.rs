//! Conversion between operator-entered race times and elapsed milliseconds.
//!
//! [`parse`] validates and never guesses. [`auto_format`] rewrites shorthand
//! entry into the canonical shape and never validates.
//!
//! # Accepted grammars
//!
//! - `M:SS.cc` with one or more minute digits (`2:05.30`, `12:00.5`)
//! - `S.cc` for races under one minute (`45.10`)
//!
//! A single centisecond digit is read as tenths, so `2:05.3` equals `2:05.30`.

use std::sync::LazyLock;

use regex::Regex;

const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_SECOND: u64 = 1_000;
const MS_PER_CENTISECOND: u64 = 10;

/// `M{1,}:SS.cc`
static CLOCK_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+):([0-9]{2})\.([0-9]{1,2})$").unwrap());

/// `S{1,}.cc`
static SECONDS_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\.([0-9]{1,2})$").unwrap());

/// Already-canonical operator entry (`M{1,2}:SS.cc`).
static CANONICAL_ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,2}:[0-9]{2}\.[0-9]{2}$").unwrap());

/// Legacy `MM:SS:CC` entry with a colon before the centiseconds.
static LEGACY_ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{1,2}:[0-9]{2}):([0-9]{2})$").unwrap());

/// Parses an entered time into elapsed milliseconds.
///
/// Returns `None` for anything that is not a valid time: empty input,
/// unknown shapes, a seconds component of 60 or more, or values too large to
/// represent. `None` means "not yet timed" and is never an error.
pub fn parse(text: &str) -> Option<u64> {
    let text = text.trim();
    if let Some(caps) = CLOCK_TIME_RE.captures(text) {
        return to_millis(&caps[1], &caps[2], &caps[3]);
    }
    let caps = SECONDS_TIME_RE.captures(text)?;
    to_millis("0", &caps[1], &caps[2])
}

fn to_millis(minutes: &str, seconds: &str, centis: &str) -> Option<u64> {
    let minutes: u64 = minutes.parse().ok()?;
    let seconds: u64 = seconds.parse().ok()?;
    if seconds >= 60 {
        return None;
    }
    let centis: u64 = match centis.parse::<u64>().ok()? {
        tenths if centis.len() == 1 => tenths * 10,
        hundredths => hundredths,
    };

    minutes
        .checked_mul(MS_PER_MINUTE)?
        .checked_add(seconds * MS_PER_SECOND + centis * MS_PER_CENTISECOND)
}

/// Formats elapsed milliseconds for display.
///
/// Produces `M:SS.cc` when the time is a minute or longer, `S.cc` otherwise.
/// Sub-centisecond remainders are truncated.
pub fn format(ms: u64) -> String {
    let minutes = ms / MS_PER_MINUTE;
    let seconds = (ms % MS_PER_MINUTE) / MS_PER_SECOND;
    let centis = (ms % MS_PER_SECOND) / MS_PER_CENTISECOND;

    if minutes > 0 {
        format!("{minutes}:{seconds:02}.{centis:02}")
    } else {
        format!("{seconds}.{centis:02}")
    }
}

/// Formats an optional time, rendering `-` when it is absent.
pub fn format_optional(ms: Option<u64>) -> String {
    ms.map_or_else(|| "-".to_string(), format)
}

/// Formats a gap behind the leader.
///
/// Empty for absent or non-positive gaps. The caller adds the leading `+`.
pub fn format_delta(ms: Option<i64>) -> String {
    ms.and_then(|ms| u64::try_from(ms).ok())
        .filter(|&ms| ms > 0)
        .map_or_else(String::new, format)
}

/// Best-effort correction of shorthand time entry, applied when a field
/// loses focus.
///
/// - canonical `M:SS.cc` (one or two minute digits) is returned unchanged
/// - legacy `MM:SS:CC` gets its last colon replaced by a decimal point
/// - digits only are left-padded to six and the last six are read as
///   `MMSSCC`, so `22360` becomes `02:23.60`
/// - anything else is returned as entered, minus surrounding whitespace
///
/// Applying it to its own output is a no-op.
pub fn auto_format(raw: &str) -> String {
    let raw = raw.trim();

    if CANONICAL_ENTRY_RE.is_match(raw) {
        return raw.to_string();
    }

    if let Some(caps) = LEGACY_ENTRY_RE.captures(raw) {
        return format!("{}.{}", &caps[1], &caps[2]);
    }

    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        let padded = format!("{raw:0>6}");
        let digits = &padded[padded.len() - 6..];
        return format!("{}:{}.{}", &digits[0..2], &digits[2..4], &digits[4..6]);
    }

    raw.to_string()
}
