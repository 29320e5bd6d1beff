//! UTC cron expression construction and cross-checking.

use std::fmt;
use std::str::FromStr;

use cron::Schedule;
use serde::{Serialize, Serializer};

/// A daily-trigger cron specification in UTC.
///
/// Rendered in the scheduling service's form `cron(minute hour * * ? *)`;
/// the `?` in the day-of-week field avoids ambiguity with the `*`
/// day-of-month field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtcCron {
    minute: u8,
    hour: u8,
}

impl UtcCron {
    pub(crate) fn new(minute: u8, hour: u8) -> Self {
        debug_assert!(minute < 60 && hour < 24);
        Self { minute, hour }
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// The scheduling-service expression, e.g. `cron(50 11 * * ? *)`.
    pub fn expression(&self) -> String {
        format!("cron({} {} * * ? *)", self.minute, self.hour)
    }

    /// Plain five-field form for consumers that don't speak the AWS syntax.
    pub fn standard_fields(&self) -> String {
        format!("{} {} * * *", self.minute, self.hour)
    }

    /// Cross-check the expression with the `cron` crate.
    ///
    /// That crate's layout is `sec min hour dom month dow`, and it has no
    /// `?` wildcard (it treats `*` the same way), so the fields are
    /// re-arranged accordingly before parsing.
    pub fn to_schedule(&self) -> std::result::Result<Schedule, cron::error::Error> {
        Schedule::from_str(&format!("0 {} {} * * *", self.minute, self.hour))
    }
}

impl fmt::Display for UtcCron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression())
    }
}

impl Serialize for UtcCron {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.expression())
    }
}
