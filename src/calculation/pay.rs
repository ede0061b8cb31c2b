//! Payroll component calculation.
//!
//! This module turns period totals into the monetary components of a
//! payroll record. Stored amounts are whole currency units in `i64`;
//! fractional rate multiplication happens in [`Decimal`] and each
//! component is floored to `i64` exactly once.
//!
//! ## Overtime tiers
//!
//! Overtime is tiered over the period total, not per day: the first
//! overtime hour of the month is paid at the first-hour rate, everything
//! beyond it at the next-hours rate. An employee with 30 overtime
//! minutes on each of four days has two overtime hours, one at each
//! tier.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PayrollConfig;
use crate::models::DeductionSet;

use super::aggregate::PeriodTotals;

/// Minutes per hour as a decimal, for overtime rate math.
const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// The monetary components of one payroll record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayComponents {
    /// Pay for worked minutes at the hourly rate.
    pub basic_salary: i64,
    /// Tiered overtime pay for the period.
    pub overtime_pay: i64,
    /// Manual bonus passed through unchanged.
    pub bonus: i64,
    /// Deductions withheld.
    pub deductions: DeductionSet,
    /// Net amount: basic + overtime + bonus - deductions. May be
    /// negative; it is never clamped.
    pub total_net: i64,
}

/// Computes basic salary: `floor(worked_minutes / 60 * hourly_rate)`.
///
/// The product of minutes and rate stays in integer math, so the floor
/// is exact with no decimal round-trip.
///
/// # Example
///
/// ```
/// use hadirpay::calculation::basic_salary;
///
/// assert_eq!(basic_salary(600, 60_000), 600_000);
/// assert_eq!(basic_salary(631, 10_000), 105_166);
/// ```
pub fn basic_salary(worked_minutes: u32, hourly_rate: i64) -> i64 {
    (i64::from(worked_minutes) * hourly_rate).div_euclid(60)
}

/// Computes tiered overtime pay over the period-total overtime minutes.
///
/// The first overtime hour is paid at `overtime_rate_first_hour`, any
/// remainder at `overtime_rate_next_hours`, and the combined amount is
/// floored once.
///
/// # Example
///
/// ```
/// use hadirpay::calculation::overtime_pay;
/// use hadirpay::config::PayrollConfig;
///
/// let config = PayrollConfig::default(); // 1.5x first hour, 2.0x after
/// // Two hours at 60000/h: 1h * 1.5 * 60000 + 1h * 2.0 * 60000
/// assert_eq!(overtime_pay(120, 60_000, &config), 210_000);
/// ```
pub fn overtime_pay(overtime_minutes: u32, hourly_rate: i64, config: &PayrollConfig) -> i64 {
    if overtime_minutes == 0 {
        return 0;
    }

    let hours = Decimal::from(overtime_minutes) / MINUTES_PER_HOUR;
    let first_hour = hours.min(Decimal::ONE);
    let beyond_first = (hours - Decimal::ONE).max(Decimal::ZERO);
    let rate = Decimal::from(hourly_rate);

    let amount = first_hour * config.overtime_rate_first_hour * rate
        + beyond_first * config.overtime_rate_next_hours * rate;
    floor_amount(amount)
}

/// Computes the deduction set for a period.
///
/// The late penalty is integer math; the BPJS and PPh21 contributions
/// are rates applied to the basic salary and floored independently.
pub fn deductions(late_minutes: u32, basic_salary: i64, config: &PayrollConfig) -> DeductionSet {
    let basic = Decimal::from(basic_salary);
    let bpjs_rate = config.bpjs_kesehatan_rate + config.bpjs_ketenagakerjaan_rate;

    DeductionSet {
        late: i64::from(late_minutes) * config.late_penalty_per_minute,
        bpjs: floor_amount(basic * bpjs_rate),
        pph21: floor_amount(basic * config.pph21_rate),
        other: 0,
    }
}

/// Computes the full pay breakdown for one employee and period.
pub fn calculate_pay(
    totals: &PeriodTotals,
    hourly_rate: i64,
    bonus: i64,
    config: &PayrollConfig,
) -> PayComponents {
    let basic = basic_salary(totals.worked_minutes, hourly_rate);
    let overtime = overtime_pay(totals.overtime_minutes, hourly_rate, config);
    let deductions = deductions(totals.late_minutes, basic, config);
    let total_net = basic + overtime + bonus - deductions.total();

    PayComponents {
        basic_salary: basic,
        overtime_pay: overtime,
        bonus,
        deductions,
        total_net,
    }
}

/// Floors a decimal amount to whole currency units. Saturates at
/// `i64::MAX` if a pathological configuration overflows.
fn floor_amount(amount: Decimal) -> i64 {
    amount.floor().to_i64().unwrap_or(i64::MAX)
}
