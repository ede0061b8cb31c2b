//! Monthly aggregation of attendance records.
//!
//! Aggregation walks an employee's attendance rows and produces the
//! period totals payroll is computed from. Only approved records with
//! both clock timestamps inside the period count.
//!
//! Worked minutes are always recomputed from the stored timestamps (the
//! record keeps no duration). Late and overtime minutes stored on the
//! record take precedence; they are recomputed only when absent, so
//! manual corrections made after clock-in survive aggregation.

use serde::{Deserialize, Serialize};

use crate::config::PayrollConfig;
use crate::models::{ApprovalStatus, AttendanceRecord, Period};

use super::time_window::{late_minutes, overtime_minutes, worked_minutes};

/// Per-employee totals for one payroll period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// Total payable minutes across the period.
    pub worked_minutes: u32,
    /// Total late minutes across the period.
    pub late_minutes: u32,
    /// Total overtime minutes across the period.
    pub overtime_minutes: u32,
}

/// Aggregates attendance records into period totals.
///
/// Records outside the period, records not approved, and records
/// missing either clock timestamp contribute nothing. An empty or
/// fully-filtered input yields all-zero totals.
pub fn aggregate_attendance(
    records: &[AttendanceRecord],
    period: Period,
    config: &PayrollConfig,
) -> PeriodTotals {
    let mut totals = PeriodTotals::default();

    for record in records {
        if !period.contains(record.date) || record.approval != ApprovalStatus::Approved {
            continue;
        }
        let (clock_in, clock_out) = match (record.clock_in, record.clock_out) {
            (Some(clock_in), Some(clock_out)) => (clock_in, clock_out),
            _ => continue,
        };

        totals.worked_minutes += worked_minutes(clock_in, clock_out, config);
        totals.late_minutes += record
            .late_minutes
            .unwrap_or_else(|| late_minutes(record.date, clock_in, config));
        totals.overtime_minutes += record
            .overtime_minutes
            .unwrap_or_else(|| overtime_minutes(record.date, clock_out, config));
    }

    totals
}
