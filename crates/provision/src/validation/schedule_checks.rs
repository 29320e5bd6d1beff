//! Schedule validation: local time, UTC offset, and the derived cron.

use super::ValidationResult;
use crate::error::ProvisionError;
use crate::resolver::{self, LocalTime, UtcOffset};
use crate::schema::ScheduleSpec;

pub(super) fn validate_schedule(spec: &ScheduleSpec, result: &mut ValidationResult) {
    let sched = &spec.schedule;

    if let Err(ProvisionError::InvalidTime { value, reason }) = LocalTime::parse(&sched.local_time)
    {
        result.error_with_suggestion(
            "schedule.localTime",
            format!("Invalid local time '{}': {}", value, reason),
            "use 24-hour HH:MM, e.g. \"08:50\"",
        );
    }

    match UtcOffset::parse(&sched.utc_offset) {
        Err(ProvisionError::UnsupportedOffset { value, reason }) => {
            result.error_with_suggestion(
                "schedule.utcOffset",
                format!("Unsupported UTC offset '{}': {}", value, reason),
                "use whole hours, e.g. -3 or \"-03:00\"",
            );
        }
        Err(_) => {}
        Ok(offset) => {
            if let Err(ProvisionError::UnsupportedOffset { value, reason }) = offset.whole_hours() {
                result.error_with_suggestion(
                    "schedule.utcOffset",
                    format!("Unsupported UTC offset '{}': {}", value, reason),
                    "use whole hours, e.g. -3 or \"-03:00\"",
                );
            }
        }
    }

    // The remaining checks need a fully-resolved schedule.
    let cron = match resolver::resolve(&sched.local_time, &sched.utc_offset) {
        Ok(cron) => cron,
        Err(_) => return,
    };

    // Cross-check the emitted expression with the cron crate.
    if let Err(e) = cron.to_schedule() {
        result.error(
            "schedule",
            format!("Derived expression '{}' does not parse: {}", cron.expression(), e),
        );
    }

    if let Ok(true) = resolver::crosses_midnight(&sched.local_time, &sched.utc_offset) {
        result.warn(
            "schedule",
            format!(
                "Conversion to UTC crosses midnight ({} local is {} UTC); the date of the nearest occurrence shifts",
                sched.local_time.trim(),
                cron.expression()
            ),
        );
    }
}
