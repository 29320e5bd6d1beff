//! TimeRule resolver: local trigger time + timezone offset → UTC cron.

mod cron;
mod time;

pub use cron::UtcCron;
pub use time::{LocalTime, UtcOffset};

use crate::error::Result;
use crate::schema::OffsetValue;

/// Resolve a local wall-clock time and UTC offset into a daily UTC cron.
///
/// Subtracts the offset from the local time and normalizes the hour into
/// [0, 24). Fails with `InvalidTime` for malformed times and
/// `UnsupportedOffset` for fractional-hour or out-of-range offsets.
pub fn resolve(local_time: &str, offset: &OffsetValue) -> Result<UtcCron> {
    let time = LocalTime::parse(local_time)?;
    let hours = UtcOffset::parse(offset)?.whole_hours()?;
    let utc_hour = (i32::from(time.hour()) - hours).rem_euclid(24) as u8;
    Ok(UtcCron::new(time.minute(), utc_hour))
}

/// Whether the conversion wraps past midnight: the UTC date of the nearest
/// occurrence then differs from the local date. Cron itself has no day
/// concept here, so the wrap is transparent, but callers scheduling
/// date-sensitive work need to know.
pub fn crosses_midnight(local_time: &str, offset: &OffsetValue) -> Result<bool> {
    let time = LocalTime::parse(local_time)?;
    let hours = UtcOffset::parse(offset)?.whole_hours()?;
    let raw = i32::from(time.hour()) - hours;
    Ok(raw < 0 || raw > 23)
}

/// Invert a resolved cron back into local time under the same offset.
///
/// Round-trip law: `to_local(resolve(t, off), off) == t` for every valid
/// `(t, off)` pair.
pub fn to_local(cron: UtcCron, offset: &OffsetValue) -> Result<LocalTime> {
    let hours = UtcOffset::parse(offset)?.whole_hours()?;
    let local_hour = (i32::from(cron.hour()) + hours).rem_euclid(24) as u8;
    Ok(LocalTime::from_hm(local_hour, cron.minute()).expect("hour and minute are range-checked"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProvisionError;

    fn hours(h: i32) -> OffsetValue {
        OffsetValue::Hours(h)
    }

    // -- documented literal scenarios --------------------------------------

    #[test]
    fn brt_morning_triggers() {
        assert_eq!(
            resolve("08:50", &hours(-3)).unwrap().expression(),
            "cron(50 11 * * ? *)"
        );
        assert_eq!(
            resolve("09:00", &hours(-3)).unwrap().expression(),
            "cron(0 12 * * ? *)"
        );
    }

    #[test]
    fn text_offset_matches_integer_offset() {
        let from_int = resolve("08:50", &hours(-3)).unwrap();
        let from_text = resolve("08:50", &OffsetValue::Text("-03:00".into())).unwrap();
        assert_eq!(from_int, from_text);
    }

    // -- round-trip law ----------------------------------------------------

    #[test]
    fn round_trip_recovers_local_time() {
        for offset_hours in -12..=14 {
            let offset = hours(offset_hours);
            for hour in 0..24 {
                for minute in [0, 1, 30, 50, 59] {
                    let local = format!("{:02}:{:02}", hour, minute);
                    let cron = resolve(&local, &offset).unwrap();
                    let back = to_local(cron, &offset).unwrap();
                    assert_eq!(back.to_string(), local, "offset {:+}", offset_hours);
                }
            }
        }
    }

    // -- idempotence -------------------------------------------------------

    #[test]
    fn resolution_is_deterministic() {
        let a = resolve("08:50", &hours(-3)).unwrap();
        let b = resolve("08:50", &hours(-3)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.expression(), b.expression());
    }

    // -- midnight wrap -----------------------------------------------------

    #[test]
    fn wraps_backward_past_midnight() {
        // 00:30 local at +3 is 21:30 UTC the previous day.
        let cron = resolve("00:30", &hours(3)).unwrap();
        assert_eq!(cron.expression(), "cron(30 21 * * ? *)");
        assert!(crosses_midnight("00:30", &hours(3)).unwrap());
    }

    #[test]
    fn wraps_forward_past_midnight() {
        // 23:00 local at -3 is 02:00 UTC the next day.
        let cron = resolve("23:00", &hours(-3)).unwrap();
        assert_eq!(cron.expression(), "cron(0 2 * * ? *)");
        assert!(crosses_midnight("23:00", &hours(-3)).unwrap());
    }

    #[test]
    fn no_wrap_within_same_day() {
        assert!(!crosses_midnight("08:50", &hours(-3)).unwrap());
        assert!(!crosses_midnight("12:00", &hours(0)).unwrap());
    }

    // -- failures ----------------------------------------------------------

    #[test]
    fn invalid_time_is_reported_with_value() {
        let err = resolve("25:00", &hours(-3)).unwrap_err();
        assert!(matches!(err, ProvisionError::InvalidTime { ref value, .. } if value == "25:00"));
    }

    #[test]
    fn fractional_offset_is_unsupported() {
        let err = resolve("08:50", &OffsetValue::Text("-03:30".into())).unwrap_err();
        assert!(matches!(err, ProvisionError::UnsupportedOffset { .. }));
    }
}
