//! Calculation logic for the attendance and payroll engine.
//!
//! This module contains the pure calculation functions: geofence
//! distance checks for clock events, lateness and overtime
//! classification against the working window, monthly aggregation of
//! attendance records, and the payroll component math including tiered
//! overtime and deductions. Nothing here touches storage or the clock;
//! every function takes its inputs and configuration explicitly.

mod aggregate;
mod geofence;
mod pay;
mod time_window;

pub use aggregate::{PeriodTotals, aggregate_attendance};
pub use geofence::{EARTH_RADIUS_METERS, distance_meters, is_within_geofence};
pub use pay::{PayComponents, basic_salary, calculate_pay, deductions, overtime_pay};
pub use time_window::{
    UNPAID_BREAK_THRESHOLD_MINUTES, WorkdayBreakdown, classify, late_minutes, overtime_minutes,
    worked_minutes,
};
