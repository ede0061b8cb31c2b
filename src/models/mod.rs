//! Core data models for the attendance and payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod employee;
mod payroll;
mod period;

pub use attendance::{ApprovalStatus, AttendanceRecord, AttendanceStatus, GeoPoint, NewAttendance};
pub use employee::{Employee, EmployeeRole, EmploymentStatus, Position};
pub use payroll::{DeductionSet, NewPayroll, PayrollRecord, PayrollStatus};
pub use period::Period;
