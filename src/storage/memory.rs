//! In-memory storage adapters.
//!
//! Each adapter keeps its rows in a `tokio::sync::Mutex`, which gives
//! the same whole-operation atomicity a transactional backend would:
//! `insert` checks and writes under one lock hold, `replace_drafts`
//! deletes and inserts under one lock hold.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use tokio::sync::Mutex;

use crate::config::PayrollConfig;
use crate::models::{
    ApprovalStatus, AttendanceRecord, Employee, NewAttendance, NewPayroll, PayrollRecord,
    PayrollStatus, Period, Position,
};

use super::{
    ActivityEvent, ActivitySink, AttendanceStore, ConfigSource, DirectoryStore, PayrollStore,
    StorageError, StorageResult,
};

#[derive(Debug, Default)]
struct AttendanceRows {
    rows: Vec<AttendanceRecord>,
    last_id: u32,
}

/// Attendance storage backed by a mutex-guarded vector.
#[derive(Debug, Default)]
pub struct MemoryAttendanceStore {
    inner: Mutex<AttendanceRows>,
}

#[async_trait]
impl AttendanceStore for MemoryAttendanceStore {
    async fn find_by_employee_date(
        &self,
        employee_id: u32,
        date: NaiveDate,
    ) -> StorageResult<Option<AttendanceRecord>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .rows
            .iter()
            .find(|row| row.employee_id == employee_id && row.date == date)
            .cloned())
    }

    async fn insert(&self, attendance: NewAttendance) -> StorageResult<AttendanceRecord> {
        let mut inner = self.inner.lock().await;
        let conflict = inner
            .rows
            .iter()
            .any(|row| row.employee_id == attendance.employee_id && row.date == attendance.date);
        if conflict {
            return Err(StorageError::DuplicateAttendance {
                employee_id: attendance.employee_id,
                date: attendance.date,
            });
        }

        inner.last_id += 1;
        let record = attendance.into_record(inner.last_id);
        inner.rows.push(record.clone());
        Ok(record)
    }

    async fn update(&self, record: AttendanceRecord) -> StorageResult<AttendanceRecord> {
        let mut inner = self.inner.lock().await;
        match inner.rows.iter_mut().find(|row| row.id == record.id) {
            Some(row) => {
                *row = record.clone();
                Ok(record)
            }
            None => Err(StorageError::NotFound {
                entity: "attendance",
                id: record.id,
            }),
        }
    }

    async fn set_approval(
        &self,
        id: u32,
        approval: ApprovalStatus,
    ) -> StorageResult<AttendanceRecord> {
        let mut inner = self.inner.lock().await;
        match inner.rows.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                row.approval = approval;
                Ok(row.clone())
            }
            None => Err(StorageError::NotFound {
                entity: "attendance",
                id,
            }),
        }
    }

    async fn list_for_period(
        &self,
        employee_id: u32,
        period: Period,
    ) -> StorageResult<Vec<AttendanceRecord>> {
        let inner = self.inner.lock().await;
        let mut rows: Vec<AttendanceRecord> = inner
            .rows
            .iter()
            .filter(|row| row.employee_id == employee_id && period.contains(row.date))
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.date);
        Ok(rows)
    }
}

#[derive(Debug, Default)]
struct PayrollRows {
    rows: Vec<PayrollRecord>,
    last_id: u32,
}

/// Payroll storage backed by a mutex-guarded vector.
#[derive(Debug, Default)]
pub struct MemoryPayrollStore {
    inner: Mutex<PayrollRows>,
}

#[async_trait]
impl PayrollStore for MemoryPayrollStore {
    async fn get(&self, id: u32) -> StorageResult<Option<PayrollRecord>> {
        let inner = self.inner.lock().await;
        Ok(inner.rows.iter().find(|row| row.id == id).cloned())
    }

    async fn list_for_period(&self, period: Period) -> StorageResult<Vec<PayrollRecord>> {
        let inner = self.inner.lock().await;
        let mut rows: Vec<PayrollRecord> = inner
            .rows
            .iter()
            .filter(|row| row.period == period)
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.employee_id);
        Ok(rows)
    }

    async fn replace_drafts(
        &self,
        period: Period,
        records: Vec<NewPayroll>,
    ) -> StorageResult<Vec<PayrollRecord>> {
        let mut inner = self.inner.lock().await;
        inner
            .rows
            .retain(|row| row.period != period || row.status != PayrollStatus::Draft);

        let mut inserted = Vec::with_capacity(records.len());
        for record in records {
            inner.last_id += 1;
            let row = record.into_record(inner.last_id);
            inner.rows.push(row.clone());
            inserted.push(row);
        }
        Ok(inserted)
    }

    async fn finalize(&self, id: u32, at: NaiveDateTime) -> StorageResult<Option<PayrollRecord>> {
        let mut inner = self.inner.lock().await;
        match inner.rows.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                if row.status != PayrollStatus::Final {
                    row.status = PayrollStatus::Final;
                    row.finalized_at = Some(at);
                }
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }
}

/// Employee directory held as plain vectors, fixed at construction.
#[derive(Debug, Default)]
pub struct MemoryDirectoryStore {
    employees: Vec<Employee>,
    positions: Vec<Position>,
}

impl MemoryDirectoryStore {
    /// Creates a directory over the given employees and positions.
    pub fn new(employees: Vec<Employee>, positions: Vec<Position>) -> Self {
        Self {
            employees,
            positions,
        }
    }
}

#[async_trait]
impl DirectoryStore for MemoryDirectoryStore {
    async fn employees(&self) -> StorageResult<Vec<Employee>> {
        Ok(self.employees.clone())
    }

    async fn position(&self, id: u32) -> StorageResult<Option<Position>> {
        Ok(self.positions.iter().find(|p| p.id == id).cloned())
    }
}

/// Activity journal held in memory, inspectable from tests.
#[derive(Debug, Default)]
pub struct MemoryActivityLog {
    events: Mutex<Vec<ActivityEvent>>,
}

impl MemoryActivityLog {
    /// Returns a copy of every event appended so far, oldest first.
    pub async fn events(&self) -> Vec<ActivityEvent> {
        self.events.lock().await.clone()
    }
}

#[async_trait]
impl ActivitySink for MemoryActivityLog {
    async fn append(&self, event: ActivityEvent) -> StorageResult<()> {
        self.events.lock().await.push(event);
        Ok(())
    }
}

/// Configuration entries held as an in-memory key/value map.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryConfigStore {
    /// Creates a store seeded with the given entries.
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// Inserts or overwrites one entry.
    pub async fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl ConfigSource for MemoryConfigStore {
    async fn snapshot(&self) -> PayrollConfig {
        PayrollConfig::from_entries(&*self.entries.lock().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceStatus, DeductionSet, GeoPoint};
    use crate::storage::ActivityKind;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn new_attendance(employee_id: u32, date_str: &str) -> NewAttendance {
        NewAttendance {
            employee_id,
            date: make_date(date_str),
            clock_in: make_datetime(date_str, "08:00:00"),
            clock_in_point: GeoPoint {
                lat: -2.9796,
                lng: 104.7311,
            },
            clock_in_photo: None,
            status: AttendanceStatus::Present,
            within_geofence_in: true,
            late_minutes: 0,
        }
    }

    fn new_payroll(employee_id: u32, period: &str, total_net: i64) -> NewPayroll {
        NewPayroll {
            employee_id,
            period: period.parse().unwrap(),
            basic_salary: total_net,
            overtime_pay: 0,
            bonus: 0,
            deductions: DeductionSet::default(),
            total_net,
            generated_at: make_datetime("2025-08-01", "09:00:00"),
        }
    }

    // === Attendance store ===

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let store = MemoryAttendanceStore::default();
        let first = store.insert(new_attendance(1, "2025-07-14")).await.unwrap();
        let second = store.insert(new_attendance(2, "2025-07-14")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_insert_rejects_same_employee_same_date() {
        let store = MemoryAttendanceStore::default();
        store.insert(new_attendance(1, "2025-07-14")).await.unwrap();

        let error = store
            .insert(new_attendance(1, "2025-07-14"))
            .await
            .unwrap_err();
        assert_eq!(
            error,
            StorageError::DuplicateAttendance {
                employee_id: 1,
                date: make_date("2025-07-14"),
            }
        );
    }

    #[tokio::test]
    async fn test_insert_allows_same_employee_other_date() {
        let store = MemoryAttendanceStore::default();
        store.insert(new_attendance(1, "2025-07-14")).await.unwrap();
        assert!(store.insert(new_attendance(1, "2025-07-15")).await.is_ok());
    }

    #[tokio::test]
    async fn test_find_by_employee_date() {
        let store = MemoryAttendanceStore::default();
        store.insert(new_attendance(1, "2025-07-14")).await.unwrap();

        let found = store
            .find_by_employee_date(1, make_date("2025-07-14"))
            .await
            .unwrap();
        assert!(found.is_some());

        let missing = store
            .find_by_employee_date(1, make_date("2025-07-15"))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_update_overwrites_row() {
        let store = MemoryAttendanceStore::default();
        let mut record = store.insert(new_attendance(1, "2025-07-14")).await.unwrap();

        record.clock_out = Some(make_datetime("2025-07-14", "17:00:00"));
        record.overtime_minutes = Some(60);
        store.update(record.clone()).await.unwrap();

        let stored = store
            .find_by_employee_date(1, make_date("2025-07-14"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, record);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let store = MemoryAttendanceStore::default();
        let record = new_attendance(1, "2025-07-14").into_record(99);

        let error = store.update(record).await.unwrap_err();
        assert_eq!(
            error,
            StorageError::NotFound {
                entity: "attendance",
                id: 99,
            }
        );
    }

    #[tokio::test]
    async fn test_set_approval_is_idempotent() {
        let store = MemoryAttendanceStore::default();
        let record = store.insert(new_attendance(1, "2025-07-14")).await.unwrap();
        assert_eq!(record.approval, ApprovalStatus::Pending);

        let approved = store
            .set_approval(record.id, ApprovalStatus::Approved)
            .await
            .unwrap();
        assert_eq!(approved.approval, ApprovalStatus::Approved);

        let again = store
            .set_approval(record.id, ApprovalStatus::Approved)
            .await
            .unwrap();
        assert_eq!(again, approved);
    }

    #[tokio::test]
    async fn test_list_for_period_filters_and_sorts_by_date() {
        let store = MemoryAttendanceStore::default();
        store.insert(new_attendance(1, "2025-07-16")).await.unwrap();
        store.insert(new_attendance(1, "2025-07-14")).await.unwrap();
        store.insert(new_attendance(1, "2025-08-01")).await.unwrap();
        store.insert(new_attendance(2, "2025-07-15")).await.unwrap();

        let rows = store.list_for_period(1, "2025-07".parse().unwrap()).await.unwrap();
        let dates: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![make_date("2025-07-14"), make_date("2025-07-16")]);
    }

    // === Payroll store ===

    #[tokio::test]
    async fn test_replace_drafts_inserts_rows_as_drafts() {
        let store = MemoryPayrollStore::default();
        let period: Period = "2025-07".parse().unwrap();

        let inserted = store
            .replace_drafts(period, vec![new_payroll(1, "2025-07", 100), new_payroll(2, "2025-07", 200)])
            .await
            .unwrap();

        assert_eq!(inserted.len(), 2);
        assert!(inserted.iter().all(|r| r.status == PayrollStatus::Draft));
        assert_eq!(store.list_for_period(period).await.unwrap(), inserted);
    }

    #[tokio::test]
    async fn test_replace_drafts_spares_finals_and_other_periods() {
        let store = MemoryPayrollStore::default();
        let july: Period = "2025-07".parse().unwrap();
        let august: Period = "2025-08".parse().unwrap();

        let first = store
            .replace_drafts(july, vec![new_payroll(1, "2025-07", 100), new_payroll(2, "2025-07", 200)])
            .await
            .unwrap();
        store
            .replace_drafts(august, vec![new_payroll(1, "2025-08", 300)])
            .await
            .unwrap();
        store
            .finalize(first[0].id, make_datetime("2025-08-02", "10:00:00"))
            .await
            .unwrap();

        store
            .replace_drafts(july, vec![new_payroll(2, "2025-07", 250)])
            .await
            .unwrap();

        let july_rows = store.list_for_period(july).await.unwrap();
        assert_eq!(july_rows.len(), 2);
        assert_eq!(july_rows[0].employee_id, 1);
        assert_eq!(july_rows[0].status, PayrollStatus::Final);
        assert_eq!(july_rows[0].total_net, 100);
        assert_eq!(july_rows[1].employee_id, 2);
        assert_eq!(july_rows[1].status, PayrollStatus::Draft);
        assert_eq!(july_rows[1].total_net, 250);

        let august_rows = store.list_for_period(august).await.unwrap();
        assert_eq!(august_rows.len(), 1);
        assert_eq!(august_rows[0].total_net, 300);
    }

    #[tokio::test]
    async fn test_replace_drafts_with_empty_set_clears_drafts() {
        let store = MemoryPayrollStore::default();
        let period: Period = "2025-07".parse().unwrap();
        store
            .replace_drafts(period, vec![new_payroll(1, "2025-07", 100)])
            .await
            .unwrap();

        store.replace_drafts(period, Vec::new()).await.unwrap();
        assert!(store.list_for_period(period).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_finalize_stamps_timestamp_once() {
        let store = MemoryPayrollStore::default();
        let period: Period = "2025-07".parse().unwrap();
        let inserted = store
            .replace_drafts(period, vec![new_payroll(1, "2025-07", 100)])
            .await
            .unwrap();

        let first_stamp = make_datetime("2025-08-02", "10:00:00");
        let finalized = store
            .finalize(inserted[0].id, first_stamp)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(finalized.status, PayrollStatus::Final);
        assert_eq!(finalized.finalized_at, Some(first_stamp));

        // A second finalize keeps the original stamp.
        let again = store
            .finalize(inserted[0].id, make_datetime("2025-08-03", "11:00:00"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(again.finalized_at, Some(first_stamp));
    }

    #[tokio::test]
    async fn test_finalize_unknown_id_returns_none() {
        let store = MemoryPayrollStore::default();
        let result = store
            .finalize(404, make_datetime("2025-08-02", "10:00:00"))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    // === Directory, activity, config ===

    #[tokio::test]
    async fn test_directory_position_lookup() {
        let directory = MemoryDirectoryStore::new(
            Vec::new(),
            vec![Position {
                id: 5,
                name: "Staff".to_string(),
                hourly_rate: 24_000,
            }],
        );

        let position = directory.position(5).await.unwrap().unwrap();
        assert_eq!(position.hourly_rate, 24_000);
        assert!(directory.position(6).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_activity_log_appends_in_order() {
        let log = MemoryActivityLog::default();
        log.append(ActivityEvent {
            employee_id: 1,
            kind: ActivityKind::ClockIn,
            description: "Clock in".to_string(),
            metadata: serde_json::json!({"within_geofence": true}),
        })
        .await
        .unwrap();
        log.append(ActivityEvent {
            employee_id: 1,
            kind: ActivityKind::ClockOut,
            description: "Clock out".to_string(),
            metadata: serde_json::Value::Null,
        })
        .await
        .unwrap();

        let events = log.events().await;
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, ActivityKind::ClockIn);
        assert_eq!(events[1].kind, ActivityKind::ClockOut);
    }

    #[tokio::test]
    async fn test_config_store_snapshot_reflects_entries() {
        let store = MemoryConfigStore::default();
        assert_eq!(store.snapshot().await, PayrollConfig::default());

        store.set("late_tolerance_minutes", "5").await;
        assert_eq!(store.snapshot().await.late_tolerance_minutes, 5);
    }
}
