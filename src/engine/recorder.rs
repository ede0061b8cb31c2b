//! Clock-in and clock-out recording.
//!
//! The recorder drives the per-day attendance state machine: no record,
//! then clocked in, then clocked out. Each operation takes one
//! configuration snapshot up front and derives everything from it, so a
//! settings change mid-request cannot split one event across two
//! configurations.

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde_json::json;
use tracing::warn;

use crate::calculation::{is_within_geofence, late_minutes, overtime_minutes};
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, AttendanceStatus, GeoPoint, NewAttendance};
use crate::storage::{ActivityEvent, ActivityKind, ActivitySink, AttendanceStore, ConfigSource};

/// One clock event as received from the outside world.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockEvent {
    /// The employee the event belongs to.
    pub employee_id: u32,
    /// When the event happened, in local time.
    pub at: NaiveDateTime,
    /// The location the event was reported from.
    pub point: GeoPoint,
    /// Optional photo reference captured with the event.
    pub photo: Option<String>,
}

/// Records clock events against the attendance store.
pub struct AttendanceRecorder {
    attendance: Arc<dyn AttendanceStore>,
    config: Arc<dyn ConfigSource>,
    activity: Arc<dyn ActivitySink>,
}

impl AttendanceRecorder {
    /// Creates a recorder over the given stores.
    pub fn new(
        attendance: Arc<dyn AttendanceStore>,
        config: Arc<dyn ConfigSource>,
        activity: Arc<dyn ActivitySink>,
    ) -> Self {
        Self {
            attendance,
            config,
            activity,
        }
    }

    /// Records a clock-in, creating the day's attendance record.
    ///
    /// The event is classified against the configured work window and
    /// office geofence: a clock-in past the lateness tolerance is
    /// flagged late, and a location outside the geofence is recorded
    /// with `within_geofence_in` false rather than rejected. Fails with
    /// [`EngineError::DuplicateClockIn`] when the day already has a
    /// record.
    pub async fn clock_in(&self, event: ClockEvent) -> EngineResult<AttendanceRecord> {
        let date = event.at.date();
        let existing = self
            .attendance
            .find_by_employee_date(event.employee_id, date)
            .await?;
        if existing.is_some() {
            return Err(EngineError::DuplicateClockIn {
                employee_id: event.employee_id,
                date,
            });
        }

        let config = self.config.snapshot().await;
        let within = is_within_geofence(event.point, config.office, config.geofence_radius_m);
        let late = late_minutes(date, event.at, &config);
        let status = if late > 0 {
            AttendanceStatus::Late
        } else {
            AttendanceStatus::Present
        };

        // The store enforces one row per employee per day, so a race
        // between the check above and this insert still surfaces as a
        // duplicate clock-in.
        let record = self
            .attendance
            .insert(NewAttendance {
                employee_id: event.employee_id,
                date,
                clock_in: event.at,
                clock_in_point: event.point,
                clock_in_photo: event.photo,
                status,
                within_geofence_in: within,
                late_minutes: late,
            })
            .await?;

        self.log_activity(
            &record,
            ActivityKind::ClockIn,
            format!("Clock in at {}", event.at.format("%H:%M")),
            json!({
                "lat": event.point.lat,
                "lng": event.point.lng,
                "within_geofence": within,
                "late_minutes": late,
            }),
        )
        .await;

        Ok(record)
    }

    /// Records a clock-out, completing the day's attendance record.
    ///
    /// Fails with [`EngineError::NoOpenClockIn`] when the day has no
    /// record and [`EngineError::AlreadyClockedOut`] when the record is
    /// already complete.
    pub async fn clock_out(&self, event: ClockEvent) -> EngineResult<AttendanceRecord> {
        let date = event.at.date();
        let mut record = match self
            .attendance
            .find_by_employee_date(event.employee_id, date)
            .await?
        {
            Some(record) => record,
            None => {
                return Err(EngineError::NoOpenClockIn {
                    employee_id: event.employee_id,
                    date,
                });
            }
        };
        if record.clock_out.is_some() {
            return Err(EngineError::AlreadyClockedOut {
                employee_id: event.employee_id,
                date,
            });
        }

        let config = self.config.snapshot().await;
        let within = is_within_geofence(event.point, config.office, config.geofence_radius_m);
        let overtime = overtime_minutes(date, event.at, &config);

        record.clock_out = Some(event.at);
        record.clock_out_point = Some(event.point);
        record.clock_out_photo = event.photo;
        record.within_geofence_out = within;
        record.overtime_minutes = Some(overtime);

        let record = self.attendance.update(record).await?;

        self.log_activity(
            &record,
            ActivityKind::ClockOut,
            format!("Clock out at {}", event.at.format("%H:%M")),
            json!({
                "lat": event.point.lat,
                "lng": event.point.lng,
                "within_geofence": within,
                "overtime_minutes": overtime,
            }),
        )
        .await;

        Ok(record)
    }

    /// Appends to the activity journal. The journal is advisory, so a
    /// failed append is logged and never fails the clock operation.
    async fn log_activity(
        &self,
        record: &AttendanceRecord,
        kind: ActivityKind,
        description: String,
        metadata: serde_json::Value,
    ) {
        let event = ActivityEvent {
            employee_id: record.employee_id,
            kind,
            description,
            metadata,
        };
        if let Err(error) = self.activity.append(event).await {
            warn!(
                %error,
                employee_id = record.employee_id,
                "Failed to append activity event"
            );
        }
    }
}
