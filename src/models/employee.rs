//! Employee and position models.
//!
//! This module defines the slice of the HR directory the engine reads:
//! who an employee is for payroll purposes and which position supplies
//! their hourly rate. Other directory fields never reach the engine.

use serde::{Deserialize, Serialize};

/// The role an employee holds in the organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeRole {
    /// Administrative account. Admins operate the system and are
    /// excluded from payroll generation.
    Admin,
    /// Regular employee subject to attendance tracking and payroll.
    Employee,
}

/// Whether an employee is currently employed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    /// Active employees are included in payroll generation.
    Active,
    /// Inactive employees keep their history but are skipped.
    Inactive,
}

/// An employee as seen by the payroll engine.
///
/// # Example
///
/// ```
/// use hadirpay::models::{Employee, EmployeeRole, EmploymentStatus};
///
/// let employee = Employee {
///     id: 7,
///     role: EmployeeRole::Employee,
///     status: EmploymentStatus::Active,
///     position_id: Some(2),
/// };
/// assert!(employee.is_payroll_eligible());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: u32,
    /// The role this employee holds.
    pub role: EmployeeRole,
    /// Current employment status.
    pub status: EmploymentStatus,
    /// The position supplying the hourly rate, if assigned.
    #[serde(default)]
    pub position_id: Option<u32>,
}

impl Employee {
    /// Returns true if payroll generation should produce a record for
    /// this employee: active and not an admin.
    pub fn is_payroll_eligible(&self) -> bool {
        self.status == EmploymentStatus::Active && self.role != EmployeeRole::Admin
    }
}

/// A position in the organization, carrying the hourly pay rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Unique identifier for the position.
    pub id: u32,
    /// Display name of the position.
    pub name: String,
    /// Hourly rate in whole currency units.
    pub hourly_rate: i64,
}
