//! Attendance-to-payroll calculation engine.
//!
//! This crate records geofenced clock-in and clock-out events, classifies
//! them against a configured work window, and turns a month of approved
//! attendance into draft payroll records with tiered overtime pay and
//! statutory deductions.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod storage;
