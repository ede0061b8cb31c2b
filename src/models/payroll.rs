//! Payroll record models.
//!
//! Monetary amounts on payroll records are whole currency units held in
//! `i64`. Fractional rate math happens in the calculation layer and is
//! floored before it lands here, so stored totals always satisfy
//! `total_net = basic_salary + overtime_pay + bonus - deductions.total()`
//! exactly.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Period;

/// Lifecycle state of a payroll record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    /// Regenerable draft. Re-running generation replaces drafts.
    Draft,
    /// Finalized record. Never deleted or overwritten by regeneration.
    Final,
}

/// The deduction components withheld from a payroll record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionSet {
    /// Lateness penalty: late minutes times the per-minute penalty.
    pub late: i64,
    /// Combined BPJS health and employment insurance contribution.
    pub bpjs: i64,
    /// PPh21 income tax withholding.
    pub pph21: i64,
    /// Manual adjustments outside the calculated components.
    pub other: i64,
}

impl DeductionSet {
    /// Sum of all deduction components.
    pub fn total(&self) -> i64 {
        self.late + self.bpjs + self.pph21 + self.other
    }
}

/// A stored payroll record for one employee and one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Unique identifier for the record.
    pub id: u32,
    /// The employee this record pays.
    pub employee_id: u32,
    /// The period this record covers.
    pub period: Period,
    /// Pay for worked minutes at the hourly rate.
    pub basic_salary: i64,
    /// Tiered overtime pay for the period.
    pub overtime_pay: i64,
    /// Manual bonus supplied at generation time.
    pub bonus: i64,
    /// Deductions withheld from this record.
    pub deductions: DeductionSet,
    /// Net amount payable. May be negative when deductions exceed pay.
    pub total_net: i64,
    /// Current lifecycle state.
    pub status: PayrollStatus,
    /// When this record was generated.
    pub generated_at: NaiveDateTime,
    /// When this record was finalized, if it has been.
    pub finalized_at: Option<NaiveDateTime>,
}

/// The insert shape for a freshly generated draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPayroll {
    /// The employee this record pays.
    pub employee_id: u32,
    /// The period this record covers.
    pub period: Period,
    /// Pay for worked minutes at the hourly rate.
    pub basic_salary: i64,
    /// Tiered overtime pay for the period.
    pub overtime_pay: i64,
    /// Manual bonus supplied at generation time.
    pub bonus: i64,
    /// Deductions withheld from this record.
    pub deductions: DeductionSet,
    /// Net amount payable.
    pub total_net: i64,
    /// When this record was generated.
    pub generated_at: NaiveDateTime,
}

impl NewPayroll {
    /// Materializes the stored draft record under the given id.
    pub fn into_record(self, id: u32) -> PayrollRecord {
        PayrollRecord {
            id,
            employee_id: self.employee_id,
            period: self.period,
            basic_salary: self.basic_salary,
            overtime_pay: self.overtime_pay,
            bonus: self.bonus,
            deductions: self.deductions,
            total_net: self.total_net,
            status: PayrollStatus::Draft,
            generated_at: self.generated_at,
            finalized_at: None,
        }
    }
}
