//! Lateness, overtime, and worked-minute classification.
//!
//! Clock events are classified against the configured working window
//! for the day. All derived quantities are whole minutes, floored, and
//! never negative.
//!
//! ## Lateness
//!
//! The tolerance only decides whether someone is flagged late; once the
//! threshold has passed, minutes are counted from the nominal work
//! start. With an 08:00 start and 10 minutes tolerance, 08:10 is on
//! time but 08:11 counts 11 late minutes, not 1.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::config::PayrollConfig;

/// Worked durations above this many minutes have the unpaid break
/// subtracted; shorter days keep their full duration.
pub const UNPAID_BREAK_THRESHOLD_MINUTES: u32 = 240;

/// The per-day classification of a completed attendance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkdayBreakdown {
    /// Payable minutes after any unpaid break subtraction.
    pub worked_minutes: u32,
    /// Minutes late past the nominal work start, zero when on time.
    pub late_minutes: u32,
    /// Minutes worked past the nominal work end.
    pub overtime_minutes: u32,
}

/// Computes late minutes for a clock-in on the given workday.
///
/// Returns zero when the clock-in is at or before `work_start` plus the
/// tolerance. Past that threshold, returns the floored minutes between
/// the nominal work start and the clock-in.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, NaiveDateTime};
/// use hadirpay::calculation::late_minutes;
/// use hadirpay::config::PayrollConfig;
///
/// let config = PayrollConfig::default(); // starts 08:00, 10 min tolerance
/// let date = NaiveDate::from_ymd_opt(2025, 7, 14).unwrap();
/// let clock_in = NaiveDateTime::parse_from_str("2025-07-14 08:15:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// assert_eq!(late_minutes(date, clock_in, &config), 15);
/// ```
pub fn late_minutes(date: NaiveDate, clock_in: NaiveDateTime, config: &PayrollConfig) -> u32 {
    let work_start = date.and_time(config.work_start);
    let threshold = work_start + Duration::minutes(i64::from(config.late_tolerance_minutes));
    if clock_in > threshold {
        (clock_in - work_start).num_minutes() as u32
    } else {
        0
    }
}

/// Computes overtime minutes for a clock-out on the given workday.
///
/// Returns the floored minutes past the nominal work end, or zero for a
/// clock-out at or before it.
pub fn overtime_minutes(date: NaiveDate, clock_out: NaiveDateTime, config: &PayrollConfig) -> u32 {
    let work_end = date.and_time(config.work_end);
    if clock_out > work_end {
        (clock_out - work_end).num_minutes() as u32
    } else {
        0
    }
}

/// Computes payable worked minutes between a clock-in and clock-out.
///
/// The raw duration is floored to whole minutes. Durations above
/// [`UNPAID_BREAK_THRESHOLD_MINUTES`] have the configured unpaid break
/// subtracted. The result never goes below zero, including for a
/// clock-out before the clock-in.
pub fn worked_minutes(
    clock_in: NaiveDateTime,
    clock_out: NaiveDateTime,
    config: &PayrollConfig,
) -> u32 {
    let raw = (clock_out - clock_in).num_minutes();
    if raw <= 0 {
        return 0;
    }
    let minutes = raw as u32;
    if minutes > UNPAID_BREAK_THRESHOLD_MINUTES {
        minutes.saturating_sub(config.break_minutes)
    } else {
        minutes
    }
}

/// Classifies a completed day: worked, late, and overtime minutes.
pub fn classify(
    date: NaiveDate,
    clock_in: NaiveDateTime,
    clock_out: NaiveDateTime,
    config: &PayrollConfig,
) -> WorkdayBreakdown {
    WorkdayBreakdown {
        worked_minutes: worked_minutes(clock_in, clock_out, config),
        late_minutes: late_minutes(date, clock_in, config),
        overtime_minutes: overtime_minutes(date, clock_out, config),
    }
}
