use uuid::Uuid;

use super::geo::Coordinates;
use crate::errors::domain::DomainError;

/// A panorama from the map catalog. Read-only to the game engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: Uuid,
    pub map_id: Uuid,
    pub pano_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub heading: f64,
    pub pitch: f64,
}

impl Location {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        self.coordinates().validate()
    }
}
