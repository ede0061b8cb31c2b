//! Application state for the attendance and payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::engine::{AttendanceRecorder, PayrollBatchRunner};
use crate::storage::{ActivitySink, AttendanceStore, ConfigSource, DirectoryStore, PayrollStore};

/// Shared application state.
///
/// Wires the storage ports into the recorder and batch runner once at
/// startup; request handlers receive cheap clones.
#[derive(Clone)]
pub struct AppState {
    /// The clock event recorder.
    recorder: Arc<AttendanceRecorder>,
    /// The payroll generation and finalization runner.
    batch: Arc<PayrollBatchRunner>,
    /// Direct attendance access for the approval endpoint.
    attendance: Arc<dyn AttendanceStore>,
}

impl AppState {
    /// Creates application state over the given stores.
    pub fn new(
        attendance: Arc<dyn AttendanceStore>,
        payroll: Arc<dyn PayrollStore>,
        directory: Arc<dyn DirectoryStore>,
        activity: Arc<dyn ActivitySink>,
        config: Arc<dyn ConfigSource>,
    ) -> Self {
        let recorder = Arc::new(AttendanceRecorder::new(
            attendance.clone(),
            config.clone(),
            activity,
        ));
        let batch = Arc::new(PayrollBatchRunner::new(
            attendance.clone(),
            payroll,
            directory,
            config,
        ));
        Self {
            recorder,
            batch,
            attendance,
        }
    }

    /// Returns the attendance recorder.
    pub fn recorder(&self) -> &AttendanceRecorder {
        &self.recorder
    }

    /// Returns the payroll batch runner.
    pub fn batch(&self) -> &PayrollBatchRunner {
        &self.batch
    }

    /// Returns the attendance store.
    pub fn attendance(&self) -> &dyn AttendanceStore {
        self.attendance.as_ref()
    }
}
