use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const MINUTES_PER_DAY: i32 = 24 * 60;
const MIN_OFFSET_MINUTES: i32 = -12 * 60;
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeZoneParseError {
    #[error("malformed time zone label: {0:?}")]
    Malformed(String),

    #[error("time zone offset out of range (-12h..+14h): {0:?}")]
    OutOfRange(String),
}

/// Offset from UTC in whole minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UtcOffset {
    minutes: i32,
}

impl UtcOffset {
    pub const UTC: UtcOffset = UtcOffset { minutes: 0 };

    pub fn from_minutes(minutes: i32) -> Self {
        Self { minutes }
    }

    pub fn minutes(self) -> i32 {
        self.minutes
    }

    /// Hours between two offsets, measured the short way round the 24-hour clock
    pub fn hours_between(self, other: UtcOffset) -> f64 {
        let diff = (self.minutes - other.minutes).rem_euclid(MINUTES_PER_DAY);
        diff.min(MINUTES_PER_DAY - diff) as f64 / 60.0
    }

    /// Hours to the closest offset in `candidates`, `None` when empty
    pub fn nearest_hours(self, candidates: &[UtcOffset]) -> Option<f64> {
        candidates
            .iter()
            .map(|candidate| self.hours_between(*candidate))
            .min_by(|a, b| a.total_cmp(b))
    }
}

/// Parse labels such as `GMT+0`, `gmt0`, `gmt+5.5`, `UTC-03:30` or `+9`
pub fn parse_offset(label: &str) -> Result<UtcOffset, TimeZoneParseError> {
    let normalized = label.trim().to_ascii_lowercase();
    let body = normalized
        .strip_prefix("gmt")
        .or_else(|| normalized.strip_prefix("utc"))
        .unwrap_or(&normalized)
        .trim();

    if body.is_empty() {
        if normalized.is_empty() {
            return Err(TimeZoneParseError::Malformed(label.to_string()));
        }
        return Ok(UtcOffset::UTC);
    }

    let (sign, magnitude) = match body.as_bytes()[0] {
        b'+' => (1, &body[1..]),
        b'-' => (-1, &body[1..]),
        _ => (1, body),
    };

    let minutes = magnitude_minutes(magnitude, label)?;

    let signed = sign * minutes;
    if !(MIN_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&signed) {
        return Err(TimeZoneParseError::OutOfRange(label.to_string()));
    }

    Ok(UtcOffset::from_minutes(signed))
}

/// Unsigned `H`, `H.F` or `H:MM` in minutes. Only ASCII digits are accepted.
fn magnitude_minutes(magnitude: &str, label: &str) -> Result<i32, TimeZoneParseError> {
    let malformed = || TimeZoneParseError::Malformed(label.to_string());

    let (hours, fraction_minutes) = match magnitude.split_once(':') {
        Some((hours, minutes)) => {
            if minutes.len() > 2 {
                return Err(malformed());
            }
            let minutes = digits(minutes).ok_or_else(malformed)?;
            if minutes >= 60 {
                return Err(malformed());
            }
            (hours, minutes)
        }
        None => match magnitude.split_once('.') {
            Some((hours, fraction)) => {
                if !all_digits(fraction) {
                    return Err(malformed());
                }
                let fraction: f64 = format!("0.{}", fraction).parse().map_err(|_| malformed())?;
                (hours, (fraction * 60.0).round() as u32)
            }
            None => (magnitude, 0),
        },
    };

    if !all_digits(hours) {
        return Err(malformed());
    }
    // digit strings too long for u32 are out of range as well
    let hours = match hours.parse::<u32>() {
        Ok(hours) if hours <= MAX_OFFSET_MINUTES as u32 / 60 => hours,
        _ => return Err(TimeZoneParseError::OutOfRange(label.to_string())),
    };

    Ok((hours * 60 + fraction_minutes) as i32)
}

#[inline]
fn all_digits(raw: &str) -> bool {
    !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit())
}

/// Non-empty run of ASCII digits as a number
fn digits(raw: &str) -> Option<u32> {
    if !all_digits(raw) {
        return None;
    }
    raw.parse().ok()
}

impl FromStr for UtcOffset {
    type Err = TimeZoneParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_offset(s)
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.minutes < 0 { '-' } else { '+' };
        let abs = self.minutes.abs();
        if abs % 60 == 0 {
            write!(f, "GMT{}{}", sign, abs / 60)
        } else {
            write!(f, "GMT{}{}:{:02}", sign, abs / 60, abs % 60)
        }
    }
}
