//! Storage ports and adapters.
//!
//! The engine reaches persistence through small async traits so the
//! recorder and batch runner stay independent of any one backend. The
//! adapters in this module's [`memory`] submodule keep everything in
//! process behind tokio mutexes, which is enough for tests and for a
//! standalone server.
//!
//! The attendance store owns the one-row-per-employee-per-day
//! constraint: [`AttendanceStore::insert`] must reject a second row for
//! the same employee and date even under concurrent callers.

mod memory;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::PayrollConfig;
use crate::error::EngineError;
use crate::models::{
    ApprovalStatus, AttendanceRecord, Employee, NewAttendance, NewPayroll, PayrollRecord, Period,
    Position,
};

pub use memory::{
    MemoryActivityLog, MemoryAttendanceStore, MemoryConfigStore, MemoryDirectoryStore,
    MemoryPayrollStore,
};

/// Convenience alias for storage operation results.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors surfaced by storage adapters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    /// An attendance row already exists for this employee and date.
    #[error("Attendance for employee {employee_id} on {date} already exists")]
    DuplicateAttendance {
        /// Employee owning the conflicting row.
        employee_id: u32,
        /// Date of the conflicting row.
        date: NaiveDate,
    },

    /// A row addressed by id does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity name, for example `"attendance"`.
        entity: &'static str,
        /// Identifier that matched nothing.
        id: u32,
    },

    /// The backend failed for a reason outside the engine's control.
    #[error("Storage backend error: {message}")]
    Backend {
        /// Backend-supplied failure description.
        message: String,
    },
}

impl From<StorageError> for EngineError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::DuplicateAttendance { employee_id, date } => {
                EngineError::DuplicateClockIn { employee_id, date }
            }
            StorageError::NotFound { .. } | StorageError::Backend { .. } => EngineError::Storage {
                message: error.to_string(),
            },
        }
    }
}

/// Kind of employee activity being journaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// A clock-in was recorded.
    ClockIn,
    /// A clock-out was recorded.
    ClockOut,
}

/// One row for the employee activity journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// Employee the activity belongs to.
    pub employee_id: u32,
    /// What happened.
    pub kind: ActivityKind,
    /// Human-readable description.
    pub description: String,
    /// Structured details such as coordinates and timestamps.
    pub metadata: serde_json::Value,
}

/// Persistence for attendance rows.
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Returns the row for an employee on a date, if one exists.
    async fn find_by_employee_date(
        &self,
        employee_id: u32,
        date: NaiveDate,
    ) -> StorageResult<Option<AttendanceRecord>>;

    /// Inserts a new clock-in row, assigning its id.
    ///
    /// Fails with [`StorageError::DuplicateAttendance`] when a row for
    /// the same employee and date already exists.
    async fn insert(&self, attendance: NewAttendance) -> StorageResult<AttendanceRecord>;

    /// Overwrites an existing row, addressed by its id.
    async fn update(&self, record: AttendanceRecord) -> StorageResult<AttendanceRecord>;

    /// Sets the approval status of a row. Idempotent.
    async fn set_approval(
        &self,
        id: u32,
        approval: ApprovalStatus,
    ) -> StorageResult<AttendanceRecord>;

    /// Returns all rows for an employee whose date falls in the period.
    async fn list_for_period(
        &self,
        employee_id: u32,
        period: Period,
    ) -> StorageResult<Vec<AttendanceRecord>>;
}

/// Persistence for payroll rows.
#[async_trait]
pub trait PayrollStore: Send + Sync {
    /// Returns a payroll row by id, if present.
    async fn get(&self, id: u32) -> StorageResult<Option<PayrollRecord>>;

    /// Returns all payroll rows for a period, drafts and finals alike.
    async fn list_for_period(&self, period: Period) -> StorageResult<Vec<PayrollRecord>>;

    /// Atomically deletes the period's draft rows and inserts `records`.
    ///
    /// Final rows are never touched. Callers observe either the old
    /// draft set or the new one, never a mix.
    async fn replace_drafts(
        &self,
        period: Period,
        records: Vec<NewPayroll>,
    ) -> StorageResult<Vec<PayrollRecord>>;

    /// Transitions a row to final, stamping `finalized_at`.
    ///
    /// Returns `None` for an unknown id. Finalizing an already-final
    /// row is a no-op that returns the row unchanged.
    async fn finalize(&self, id: u32, at: NaiveDateTime) -> StorageResult<Option<PayrollRecord>>;
}

/// Read-only access to the employee directory.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Returns every employee on file.
    async fn employees(&self) -> StorageResult<Vec<Employee>>;

    /// Returns a position by id, if present.
    async fn position(&self, id: u32) -> StorageResult<Option<Position>>;
}

/// Append-only journal of employee activity.
#[async_trait]
pub trait ActivitySink: Send + Sync {
    /// Appends one event. Callers treat failures as non-fatal.
    async fn append(&self, event: ActivityEvent) -> StorageResult<()>;
}

/// Source of payroll configuration snapshots.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Returns the current configuration.
    ///
    /// Implementations fall back to defaults for entries they cannot
    /// read, so a snapshot is always available.
    async fn snapshot(&self) -> PayrollConfig;
}
