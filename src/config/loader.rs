//! Parsing of stored configuration entries.
//!
//! Settings live in storage as string key/value rows. This module turns
//! a raw entry map into a [`PayrollConfig`] snapshot, with per-key
//! fallback to the defaults: a missing row or an unparsable value takes
//! the default for that key, so one corrupt entry cannot poison
//! attendance or payroll math.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveTime;
use tracing::warn;

use crate::models::GeoPoint;

use super::types::PayrollConfig;

impl PayrollConfig {
    /// Builds a config snapshot from stored key/value entries.
    ///
    /// Recognized keys:
    /// `office_lat`, `office_lng`, `geofence_radius_m`,
    /// `work_start_time`, `work_end_time` (both `HH:MM`),
    /// `late_tolerance_minutes`, `break_minutes`,
    /// `overtime_rate_first_hour`, `overtime_rate_next_hours`,
    /// `late_penalty_per_minute`, `bpjs_kesehatan_rate`,
    /// `bpjs_ketenagakerjaan_rate`, `pph21_rate`.
    ///
    /// Every key is optional. Unparsable values log a warning and fall
    /// back to the default for that key.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use hadirpay::config::PayrollConfig;
    ///
    /// let mut entries = HashMap::new();
    /// entries.insert("geofence_radius_m".to_string(), "250".to_string());
    ///
    /// let config = PayrollConfig::from_entries(&entries);
    /// assert_eq!(config.geofence_radius_m, 250.0);
    /// assert_eq!(config.late_tolerance_minutes, 10); // default
    /// ```
    pub fn from_entries(entries: &HashMap<String, String>) -> Self {
        let defaults = Self::default();

        Self {
            office: GeoPoint {
                lat: parse_entry(entries, "office_lat", defaults.office.lat),
                lng: parse_entry(entries, "office_lng", defaults.office.lng),
            },
            geofence_radius_m: parse_entry(
                entries,
                "geofence_radius_m",
                defaults.geofence_radius_m,
            ),
            work_start: parse_time_entry(entries, "work_start_time", defaults.work_start),
            work_end: parse_time_entry(entries, "work_end_time", defaults.work_end),
            late_tolerance_minutes: parse_entry(
                entries,
                "late_tolerance_minutes",
                defaults.late_tolerance_minutes,
            ),
            break_minutes: parse_entry(entries, "break_minutes", defaults.break_minutes),
            overtime_rate_first_hour: parse_entry(
                entries,
                "overtime_rate_first_hour",
                defaults.overtime_rate_first_hour,
            ),
            overtime_rate_next_hours: parse_entry(
                entries,
                "overtime_rate_next_hours",
                defaults.overtime_rate_next_hours,
            ),
            late_penalty_per_minute: parse_entry(
                entries,
                "late_penalty_per_minute",
                defaults.late_penalty_per_minute,
            ),
            bpjs_kesehatan_rate: parse_entry(
                entries,
                "bpjs_kesehatan_rate",
                defaults.bpjs_kesehatan_rate,
            ),
            bpjs_ketenagakerjaan_rate: parse_entry(
                entries,
                "bpjs_ketenagakerjaan_rate",
                defaults.bpjs_ketenagakerjaan_rate,
            ),
            pph21_rate: parse_entry(entries, "pph21_rate", defaults.pph21_rate),
        }
    }
}

/// Parses one entry with fallback to the key's default.
fn parse_entry<T: FromStr>(entries: &HashMap<String, String>, key: &str, default: T) -> T {
    match entries.get(key) {
        None => default,
        Some(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                warn!(key, value = %raw, "Unreadable config entry, using default");
                default
            }
        },
    }
}

/// Times are stored as `HH:MM`; `HH:MM:SS` is accepted as well.
fn parse_time_entry(
    entries: &HashMap<String, String>,
    key: &str,
    default: NaiveTime,
) -> NaiveTime {
    match entries.get(key) {
        None => default,
        Some(raw) => {
            let parsed = NaiveTime::parse_from_str(raw, "%H:%M")
                .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"));
            match parsed {
                Ok(time) => time,
                Err(_) => {
                    warn!(key, value = %raw, "Unreadable config entry, using default");
                    default
                }
            }
        }
    }
}
