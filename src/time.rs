use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use hifitime::Epoch;

use crate::constants::{SLOT_LABEL_FORMAT, TIMESTAMP_FORMAT};

/// Parse a raw record timestamp in the format `YYYY-MM-DD HH:MM:SS`
///
/// Argument
/// --------
/// * `date`: the timestamp string, without surrounding whitespace
///
/// Return
/// ------
/// * the civil date-time, or `None` if the string does not follow the pattern
pub fn parse_timestamp(date: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(date, TIMESTAMP_FORMAT).ok()
}

/// Midnight at the start of a calendar day
pub fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Number of whole calendar days from `anchor` to the date of `time`
///
/// Argument
/// --------
/// * `anchor`: the reference date (day 0)
/// * `time`: the timestamp to locate
///
/// Return
/// ------
/// * the signed day offset; negative when `time` is before `anchor`
pub fn day_offset(anchor: NaiveDate, time: &NaiveDateTime) -> i64 {
    (time.date() - anchor).num_days()
}

/// Slot column of a timestamp within its own day
///
/// Argument
/// --------
/// * `time`: the timestamp
/// * `interval_seconds`: width of one slot in seconds (must be > 0)
///
/// Return
/// ------
/// * `floor(seconds since midnight / interval_seconds)`
///
/// Note
/// ----
/// * Sub-second precision is truncated, a leap second stays in the last slot.
pub fn slot_index(time: &NaiveDateTime, interval_seconds: u32) -> usize {
    (time.num_seconds_from_midnight() / interval_seconds) as usize
}

/// Start time of slot `slot` on day `day` counted from `anchor`
///
/// Argument
/// --------
/// * `anchor`: the calendar date of day 0
/// * `day`: day offset from the anchor
/// * `slot`: slot column within the day
/// * `interval_seconds`: width of one slot in seconds
///
/// Return
/// ------
/// * the slot start, or `None` if it falls outside the representable date range
pub fn slot_start(
    anchor: NaiveDate,
    day: usize,
    slot: usize,
    interval_seconds: u32,
) -> Option<NaiveDateTime> {
    let days = TimeDelta::try_days(i64::try_from(day).ok()?)?;
    let seconds = TimeDelta::try_seconds(i64::try_from(slot).ok()? * interval_seconds as i64)?;
    midnight(anchor)
        .checked_add_signed(days)?
        .checked_add_signed(seconds)
}

/// Caption `HH:MM:SS` of the start of a slot, as shown on rendered frames
///
/// Return
/// ------
/// * the label, or `None` if the slot starts at or after the end of the day
pub fn slot_label(slot: usize, interval_seconds: u32) -> Option<String> {
    let seconds = u32::try_from(slot).ok()?.checked_mul(interval_seconds)?;
    NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
        .map(|t| t.format(SLOT_LABEL_FORMAT).to_string())
}

/// Transformation from a civil timestamp (read as UTC) to modified julian date (MJD)
///
/// Argument
/// --------
/// * `time`: the civil timestamp
///
/// Return
/// ------
/// * a float representing the timestamp in modified julian date (MJD, UTC)
pub fn to_mjd_utc(time: &NaiveDateTime) -> Option<f64> {
    let nanos = time.nanosecond().min(999_999_999);
    Epoch::maybe_from_gregorian_utc(
        time.year(),
        time.month() as u8,
        time.day() as u8,
        time.hour() as u8,
        time.minute() as u8,
        time.second() as u8,
        nanos,
    )
    .ok()
    .map(|epoch| epoch.to_mjd_utc_days())
}

#[cfg(test)]
mod time_test {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        parse_timestamp(s).unwrap()
    }

    #[test]
    fn test_parse_timestamp() {
        let t = ts("2023-04-01 06:15:30");
        assert_eq!(t.date(), NaiveDate::from_ymd_opt(2023, 4, 1).unwrap());
        assert_eq!(t.num_seconds_from_midnight(), 6 * 3600 + 15 * 60 + 30);

        assert!(parse_timestamp("2023-04-01T06:15:30").is_none());
        assert!(parse_timestamp("2023-13-01 06:15:30").is_none());
        assert!(parse_timestamp("not a date").is_none());
    }

    #[test]
    fn test_day_offset() {
        let anchor = NaiveDate::from_ymd_opt(2023, 3, 31).unwrap();
        assert_eq!(day_offset(anchor, &ts("2023-03-31 23:59:59")), 0);
        assert_eq!(day_offset(anchor, &ts("2023-04-01 00:00:00")), 1);
        assert_eq!(day_offset(anchor, &ts("2023-04-02 12:00:00")), 2);
        assert_eq!(day_offset(anchor, &ts("2023-03-30 12:00:00")), -1);
    }

    #[test]
    fn test_slot_index() {
        assert_eq!(slot_index(&ts("2023-04-01 00:00:00"), 900), 0);
        assert_eq!(slot_index(&ts("2023-04-01 00:14:59"), 900), 0);
        assert_eq!(slot_index(&ts("2023-04-01 06:00:00"), 900), 24);
        assert_eq!(slot_index(&ts("2023-04-01 23:59:59"), 900), 95);
        assert_eq!(slot_index(&ts("2023-04-01 23:59:59"), 3600), 23);
    }

    #[test]
    fn test_slot_start() {
        let anchor = NaiveDate::from_ymd_opt(2023, 4, 1).unwrap();
        assert_eq!(slot_start(anchor, 0, 0, 900), Some(ts("2023-04-01 00:00:00")));
        assert_eq!(slot_start(anchor, 0, 24, 900), Some(ts("2023-04-01 06:00:00")));
        assert_eq!(slot_start(anchor, 2, 95, 900), Some(ts("2023-04-03 23:45:00")));
    }

    #[test]
    fn test_slot_label() {
        assert_eq!(slot_label(0, 900).as_deref(), Some("00:00:00"));
        assert_eq!(slot_label(37, 900).as_deref(), Some("09:15:00"));
        assert_eq!(slot_label(96, 900), None);
    }

    #[test]
    fn test_to_mjd_utc() {
        let mjd = to_mjd_utc(&ts("2021-01-01 00:00:00")).unwrap();
        assert!((mjd - 59215.0).abs() < 1e-9);

        let mjd = to_mjd_utc(&ts("2021-01-02 12:00:00")).unwrap();
        assert!((mjd - 59216.5).abs() < 1e-9);
    }
}
