//! Request types for the attendance and payroll API.
//!
//! This module defines the JSON request structures for the clock,
//! approval, and payroll endpoints.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::engine::ClockEvent;
use crate::models::{ApprovalStatus, GeoPoint};

/// Request body for the clock-in and clock-out endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockRequest {
    /// The employee clocking in or out.
    pub employee_id: u32,
    /// Latitude reported by the device, in decimal degrees.
    pub lat: f64,
    /// Longitude reported by the device, in decimal degrees.
    pub lng: f64,
    /// Optional photo reference captured with the event.
    #[serde(default)]
    pub photo: Option<String>,
}

impl ClockRequest {
    /// Turns the request into a clock event stamped at the given time.
    pub fn into_event(self, at: NaiveDateTime) -> ClockEvent {
        ClockEvent {
            employee_id: self.employee_id,
            at,
            point: GeoPoint {
                lat: self.lat,
                lng: self.lng,
            },
            photo: self.photo,
        }
    }
}

/// Request body for the attendance approval endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalRequest {
    /// The approval state to set.
    pub status: ApprovalStatus,
}

/// Request body for the payroll generation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// The payroll period to generate, as `YYYY-MM`.
    pub period: String,
    /// Manual bonus per employee id, in whole currency units.
    #[serde(default)]
    pub bonuses: HashMap<u32, i64>,
}

/// Query parameters for the payroll list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollQuery {
    /// The payroll period to list, as `YYYY-MM`.
    pub period: String,
}
