//! Configuration types for the attendance and payroll engine.
//!
//! This module defines [`PayrollConfig`], the immutable snapshot of
//! organization settings every calculation runs against. A snapshot is
//! taken once at the start of an operation and threaded through
//! explicitly, so a mid-run settings change can never produce a payroll
//! computed under two different rule sets.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::GeoPoint;

const DEFAULT_WORK_START: NaiveTime = match NaiveTime::from_hms_opt(8, 0, 0) {
    Some(time) => time,
    None => NaiveTime::MIN,
};

const DEFAULT_WORK_END: NaiveTime = match NaiveTime::from_hms_opt(16, 0, 0) {
    Some(time) => time,
    None => NaiveTime::MIN,
};

/// Organization settings governing attendance and payroll math.
///
/// Defaults mirror the seeded settings of a freshly installed system;
/// see [`PayrollConfig::from_entries`] for how stored entries override
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollConfig {
    /// Office location anchoring the clock-in geofence.
    pub office: GeoPoint,
    /// Geofence radius in meters around the office.
    pub geofence_radius_m: f64,
    /// Nominal start of the working day.
    pub work_start: NaiveTime,
    /// Nominal end of the working day.
    pub work_end: NaiveTime,
    /// Minutes past `work_start` before a clock-in is flagged late.
    pub late_tolerance_minutes: u32,
    /// Unpaid break minutes subtracted from long workdays.
    pub break_minutes: u32,
    /// Multiplier for the first overtime hour of a period.
    pub overtime_rate_first_hour: Decimal,
    /// Multiplier for overtime beyond the first hour.
    pub overtime_rate_next_hours: Decimal,
    /// Penalty per late minute in whole currency units.
    pub late_penalty_per_minute: i64,
    /// BPJS Kesehatan contribution rate on basic salary.
    pub bpjs_kesehatan_rate: Decimal,
    /// BPJS Ketenagakerjaan contribution rate on basic salary.
    pub bpjs_ketenagakerjaan_rate: Decimal,
    /// PPh21 withholding rate on basic salary.
    pub pph21_rate: Decimal,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            office: GeoPoint {
                lat: -2.9795731113284303,
                lng: 104.73111003716011,
            },
            geofence_radius_m: 100.0,
            work_start: DEFAULT_WORK_START,
            work_end: DEFAULT_WORK_END,
            late_tolerance_minutes: 10,
            break_minutes: 60,
            overtime_rate_first_hour: Decimal::new(15, 1), // 1.5
            overtime_rate_next_hours: Decimal::new(2, 0),
            late_penalty_per_minute: 2_000,
            bpjs_kesehatan_rate: Decimal::new(1, 2),       // 0.01
            bpjs_ketenagakerjaan_rate: Decimal::new(2, 2), // 0.02
            pph21_rate: Decimal::new(5, 2),                // 0.05
        }
    }
}
