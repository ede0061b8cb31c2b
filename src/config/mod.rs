//! Payroll configuration snapshot and its loader.
//!
//! Attendance and payroll settings (office location, work window,
//! tolerance, rates) are stored as string key/value entries and parsed
//! into an immutable [`PayrollConfig`]. Callers take one snapshot per
//! operation and thread it through the calculation functions, so a
//! concurrent settings change can never split a single run across two
//! configurations.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use hadirpay::config::PayrollConfig;
//!
//! let mut entries = HashMap::new();
//! entries.insert("late_tolerance_minutes".to_string(), "15".to_string());
//!
//! let config = PayrollConfig::from_entries(&entries);
//! assert_eq!(config.late_tolerance_minutes, 15);
//! ```

mod loader;
mod types;

pub use types::PayrollConfig;
