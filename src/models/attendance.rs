//! Attendance record models.
//!
//! This module defines the daily attendance row and the supporting
//! types for geographic points, day statuses, and approval states.
//! One record exists per employee per calendar day; it is created at
//! clock-in and completed at clock-out.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A geographic coordinate in decimal degrees.
///
/// GPS fixes arrive as floating point and stay that way; coordinates
/// are never used for monetary math.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees, positive north.
    pub lat: f64,
    /// Longitude in decimal degrees, positive east.
    pub lng: f64,
}

/// The attendance status recorded for a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Clocked in on time.
    Present,
    /// Clocked in after the lateness tolerance.
    Late,
    /// No attendance for the day.
    Absent,
    /// On approved leave.
    Leave,
    /// On sick leave.
    Sick,
}

/// Approval state of an attendance record.
///
/// Approval is granted by HR outside the engine; records start pending
/// and only approved records count toward payroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    /// Awaiting review.
    Pending,
    /// Counted toward payroll aggregation.
    Approved,
    /// Excluded from payroll aggregation.
    Rejected,
}

/// A stored attendance record for one employee on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Unique identifier for the record.
    pub id: u32,
    /// The employee this record belongs to.
    pub employee_id: u32,
    /// The workday this record covers.
    pub date: NaiveDate,
    /// Clock-in timestamp, if the employee has clocked in.
    pub clock_in: Option<NaiveDateTime>,
    /// Clock-out timestamp, if the employee has clocked out.
    pub clock_out: Option<NaiveDateTime>,
    /// Location reported at clock-in.
    pub clock_in_point: Option<GeoPoint>,
    /// Location reported at clock-out.
    pub clock_out_point: Option<GeoPoint>,
    /// Reference to the photo captured at clock-in.
    pub clock_in_photo: Option<String>,
    /// Reference to the photo captured at clock-out.
    pub clock_out_photo: Option<String>,
    /// Day status derived at clock-in.
    pub status: AttendanceStatus,
    /// HR approval state.
    pub approval: ApprovalStatus,
    /// Whether the clock-in location fell inside the office geofence.
    pub within_geofence_in: bool,
    /// Whether the clock-out location fell inside the office geofence.
    pub within_geofence_out: bool,
    /// Lateness in minutes derived at clock-in, when available.
    pub late_minutes: Option<u32>,
    /// Overtime in minutes derived at clock-out, when available.
    pub overtime_minutes: Option<u32>,
}

/// The insert shape for a fresh clock-in.
///
/// Clock-out fields are absent by construction; they are filled in by a
/// later update to the stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAttendance {
    /// The employee clocking in.
    pub employee_id: u32,
    /// The workday being recorded.
    pub date: NaiveDate,
    /// Clock-in timestamp.
    pub clock_in: NaiveDateTime,
    /// Location reported at clock-in.
    pub clock_in_point: GeoPoint,
    /// Reference to the photo captured at clock-in.
    #[serde(default)]
    pub clock_in_photo: Option<String>,
    /// Day status derived from the clock-in time.
    pub status: AttendanceStatus,
    /// Whether the clock-in location fell inside the office geofence.
    pub within_geofence_in: bool,
    /// Lateness in minutes derived from the clock-in time.
    pub late_minutes: u32,
}

impl NewAttendance {
    /// Materializes the stored record for this clock-in under the given
    /// id. Approval always starts pending.
    pub fn into_record(self, id: u32) -> AttendanceRecord {
        AttendanceRecord {
            id,
            employee_id: self.employee_id,
            date: self.date,
            clock_in: Some(self.clock_in),
            clock_out: None,
            clock_in_point: Some(self.clock_in_point),
            clock_out_point: None,
            clock_in_photo: self.clock_in_photo,
            clock_out_photo: None,
            status: self.status,
            approval: ApprovalStatus::Pending,
            within_geofence_in: self.within_geofence_in,
            within_geofence_out: false,
            late_minutes: Some(self.late_minutes),
            overtime_minutes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    #[test]
    fn test_into_record_starts_pending_without_clock_out() {
        let new = NewAttendance {
            employee_id: 7,
            date: make_date("2025-07-14"),
            clock_in: make_datetime("2025-07-14", "08:02:00"),
            clock_in_point: GeoPoint {
                lat: -2.9796,
                lng: 104.7311,
            },
            clock_in_photo: Some("photos/7/2025-07-14-in.jpg".to_string()),
            status: AttendanceStatus::Present,
            within_geofence_in: true,
            late_minutes: 0,
        };

        let record = new.into_record(42);

        assert_eq!(record.id, 42);
        assert_eq!(record.employee_id, 7);
        assert_eq!(record.approval, ApprovalStatus::Pending);
        assert!(record.clock_in.is_some());
        assert!(record.clock_out.is_none());
        assert!(record.clock_out_point.is_none());
        assert!(!record.within_geofence_out);
        assert_eq!(record.late_minutes, Some(0));
        assert_eq!(record.overtime_minutes, None);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::Late).unwrap(),
            "\"late\""
        );
        assert_eq!(
            serde_json::to_string(&ApprovalStatus::Approved).unwrap(),
            "\"approved\""
        );
    }

    #[test]
    fn test_record_serialization_round_trip() {
        let record = NewAttendance {
            employee_id: 3,
            date: make_date("2025-07-15"),
            clock_in: make_datetime("2025-07-15", "08:20:00"),
            clock_in_point: GeoPoint {
                lat: -2.98,
                lng: 104.73,
            },
            clock_in_photo: None,
            status: AttendanceStatus::Late,
            within_geofence_in: false,
            late_minutes: 20,
        }
        .into_record(1);

        let json = serde_json::to_string(&record).unwrap();
        let back: AttendanceRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
