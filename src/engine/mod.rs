//! Orchestration services over the storage ports.
//!
//! The recorder turns raw clock events into classified attendance
//! records; the batch runner turns a period of approved attendance into
//! payroll drafts and drives finalization. Both read one configuration
//! snapshot per operation and push all persistence through the traits
//! in [`crate::storage`].

mod batch;
mod recorder;

pub use batch::{BatchWarning, GenerateOutcome, PayrollBatchRunner};
pub use recorder::{AttendanceRecorder, ClockEvent};
