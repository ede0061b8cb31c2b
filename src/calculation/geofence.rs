//! Geofence validation for clock events.
//!
//! Clock-in and clock-out locations are checked against a circular
//! geofence around the office using great-circle distance on a sphere.
//! Distance is advisory only: an outside fix flags the record but never
//! rejects the clock event.

use crate::models::GeoPoint;

/// Mean Earth radius in meters used for great-circle distance.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Computes the great-circle distance between two points in meters
/// using the haversine formula.
///
/// If either point carries a NaN coordinate the result is NaN, which
/// every geofence comparison treats as outside.
///
/// # Example
///
/// ```
/// use hadirpay::calculation::distance_meters;
/// use hadirpay::models::GeoPoint;
///
/// let office = GeoPoint { lat: -2.9795731113284303, lng: 104.73111003716011 };
/// assert_eq!(distance_meters(office, office), 0.0);
/// ```
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let half_chord = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lng / 2.0).sin().powi(2);
    let angular_distance = 2.0 * half_chord.sqrt().atan2((1.0 - half_chord).sqrt());

    EARTH_RADIUS_METERS * angular_distance
}

/// Returns true when `point` lies within `radius_m` meters of `center`.
///
/// The boundary is inclusive: a point exactly on the radius is inside.
/// A NaN distance compares false, so an unreadable GPS fix always lands
/// outside the fence.
///
/// # Example
///
/// ```
/// use hadirpay::calculation::is_within_geofence;
/// use hadirpay::models::GeoPoint;
///
/// let office = GeoPoint { lat: -2.9795731113284303, lng: 104.73111003716011 };
/// assert!(is_within_geofence(office, office, 100.0));
/// ```
pub fn is_within_geofence(point: GeoPoint, center: GeoPoint, radius_m: f64) -> bool {
    distance_meters(point, center) <= radius_m
}
