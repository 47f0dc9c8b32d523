//! Conversion between millisecond counts and `HH:MM:SS.mmm` text
//!
//! Every textual report renders durations through this module, and stored
//! reports are read back through it, so `decode_millis` must be the exact
//! inverse of `encode_millis` for all values the pattern can represent.
//! The hours field is two digits minimum but unbounded above, so encoded
//! durations past 99 hours still round-trip.

use crate::error::{Error, Result};
use regex::Regex;

const MILLIS_PER_SECOND: u64 = 1_000;
const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;

/// Format a millisecond count as zero-padded `HH:MM:SS.mmm`.
///
/// The hours field has no upper bound; values past 99 hours simply widen the
/// field rather than being truncated.
pub fn encode_millis(ms: u64) -> String {
    let hours = ms / MILLIS_PER_HOUR;
    let minutes = (ms % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE;
    let seconds = (ms % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND;
    let millis = ms % MILLIS_PER_SECOND;
    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}

/// Parse a `HH:MM:SS.mmm` string back into milliseconds.
///
/// The hours field is two or more digits, matching what `encode_millis`
/// emits past 99 hours; minutes, seconds and milliseconds are fixed-width.
/// Anything else (missing padding, wrong separators, stray text) is a
/// format error, as is an hours field too large for `u64` milliseconds.
pub fn decode_millis(text: &str) -> Result<u64> {
    let re = Regex::new(r"^(\d{2,}):(\d{2}):(\d{2})\.(\d{3})$")
        .map_err(|e| Error::Other(format!("invalid duration pattern: {}", e)))?;

    let captures = re
        .captures(text)
        .ok_or_else(|| Error::Format(format!("invalid duration '{}'", text)))?;

    let field = |i: usize| -> Result<u64> {
        captures[i]
            .parse()
            .map_err(|_| Error::Format(format!("duration field out of range in '{}'", text)))
    };

    let hours = field(1)?;
    let rest =
        field(2)? * MILLIS_PER_MINUTE + field(3)? * MILLIS_PER_SECOND + field(4)?;
    hours
        .checked_mul(MILLIS_PER_HOUR)
        .and_then(|ms| ms.checked_add(rest))
        .ok_or_else(|| Error::Format(format!("duration out of range '{}'", text)))
}
