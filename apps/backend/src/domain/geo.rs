//! Great-circle distance and distance-based scoring.

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
pub const MAX_SCORE: u32 = 5000;
/// Width of the scoring curve; a guess this far off earns ~61% of `MAX_SCORE`.
pub const SIGMA_KM: f64 = 22.5;

/// Haversine distance in meters between two points given in degrees.
///
/// Inputs are not validated.
pub fn distance_meters(a_lat: f64, a_lon: f64, b_lat: f64, b_lon: f64) -> f64 {
    let lat1 = a_lat.to_radians();
    let lat2 = b_lat.to_radians();
    let d_lat = (b_lat - a_lat).to_radians();
    let d_lon = (b_lon - a_lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h just past 1 near antipodes.
    let h = h.min(1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Gaussian falloff: `round(5000 · exp(-½ · (km / 22.5)²))`.
pub fn score_from_distance(distance_meters: f64) -> u32 {
    let km = distance_meters.max(0.0) / 1000.0;
    let raw = f64::from(MAX_SCORE) * (-0.5 * (km / SIGMA_KM).powi(2)).exp();
    // raw is within [0, MAX_SCORE]
    raw.round() as u32
}

/// A point on the globe in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Latitude in [-90, 90], longitude in [-180, 180]. NaN fails both.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(DomainError::validation(
                ValidationKind::InvalidLatitude,
                format!(
                    "invalid latitude: {} (must be between -90 and 90)",
                    self.latitude
                ),
            ));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(DomainError::validation(
                ValidationKind::InvalidLongitude,
                format!(
                    "invalid longitude: {} (must be between -180 and 180)",
                    self.longitude
                ),
            ));
        }
        Ok(())
    }

    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        distance_meters(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}
