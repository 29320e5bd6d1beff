//! Wall-clock time and UTC offset parsing.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};

use crate::error::{ProvisionError, Result};
use crate::schema::OffsetValue;

/// A time-of-day on a 24-hour clock, no date and no timezone attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTime(NaiveTime);

impl LocalTime {
    /// Parse a 24-hour `HH:MM` value.
    pub fn parse(value: &str) -> Result<Self> {
        NaiveTime::parse_from_str(value.trim(), "%H:%M")
            .map(Self)
            .map_err(|_| ProvisionError::InvalidTime {
                value: value.to_string(),
                reason: "expected 24-hour HH:MM".to_string(),
            })
    }

    pub fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        NaiveTime::from_hms_opt(u32::from(hour), u32::from(minute), 0).map(Self)
    }

    pub fn hour(&self) -> u8 {
        self.0.hour() as u8
    }

    pub fn minute(&self) -> u8 {
        self.0.minute() as u8
    }
}

impl fmt::Display for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for LocalTime {
    type Err = ProvisionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Offset range accepted by the resolver, in whole hours.
const MIN_OFFSET_HOURS: i32 = -12;
const MAX_OFFSET_HOURS: i32 = 14;

/// A parsed UTC offset, stored in minutes so that fractional-hour zones can
/// be detected and rejected rather than silently truncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtcOffset {
    minutes: i32,
    /// The value as written, kept for error reporting.
    raw: String,
}

impl UtcOffset {
    /// Parse an offset as it appears in a spec document.
    pub fn parse(value: &OffsetValue) -> Result<Self> {
        match value {
            OffsetValue::Hours(h) => Self::from_minutes(h * 60, value.to_string()),
            OffsetValue::Text(s) => Self::parse_text(s),
        }
    }

    /// Parse text forms: `-3`, `+5`, `UTC-3`, `-03:00`.
    fn parse_text(text: &str) -> Result<Self> {
        let unsupported = |reason: &str| ProvisionError::UnsupportedOffset {
            value: text.to_string(),
            reason: reason.to_string(),
        };

        let mut rest = text.trim();
        for prefix in ["UTC", "GMT"] {
            if let Some(stripped) = rest.strip_prefix(prefix) {
                rest = stripped;
                break;
            }
        }

        let (sign, rest) = match rest.strip_prefix('-') {
            Some(r) => (-1, r),
            None => (1, rest.strip_prefix('+').unwrap_or(rest)),
        };

        if rest.is_empty() {
            return Err(unsupported("missing hour value"));
        }

        // The sign is already consumed, so both parts must be bare digits.
        let minutes = match rest.split_once(':') {
            Some((h, m)) => {
                let hours: u32 = h
                    .parse()
                    .map_err(|_| unsupported("hours must be numeric"))?;
                let mins: u32 = m
                    .parse()
                    .map_err(|_| unsupported("minutes must be numeric"))?;
                if mins > 59 {
                    return Err(unsupported("minutes must be 00-59"));
                }
                (hours * 60 + mins) as i32
            }
            None => {
                let hours: u32 = rest
                    .parse()
                    .map_err(|_| unsupported("expected integer hours or HH:MM"))?;
                (hours * 60) as i32
            }
        };

        Self::from_minutes(sign * minutes, text.to_string())
    }

    fn from_minutes(minutes: i32, raw: String) -> Result<Self> {
        if minutes < MIN_OFFSET_HOURS * 60 || minutes > MAX_OFFSET_HOURS * 60 {
            return Err(ProvisionError::UnsupportedOffset {
                value: raw,
                reason: format!(
                    "outside the valid range [{:+}, {:+}] hours",
                    MIN_OFFSET_HOURS, MAX_OFFSET_HOURS
                ),
            });
        }
        Ok(Self { minutes, raw })
    }

    /// The offset as whole hours.
    ///
    /// Fractional-hour zones are a documented limitation of this model and
    /// are rejected, never truncated.
    pub fn whole_hours(&self) -> Result<i32> {
        if self.minutes % 60 != 0 {
            return Err(ProvisionError::UnsupportedOffset {
                value: self.raw.clone(),
                reason: "fractional-hour offsets are not supported".to_string(),
            });
        }
        Ok(self.minutes / 60)
    }

    pub fn minutes(&self) -> i32 {
        self.minutes
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
