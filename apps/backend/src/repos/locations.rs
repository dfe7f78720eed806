//! Read side of the location catalog.

use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::adapters::locations_sea as locations_adapter;
pub use crate::domain::Location;
use crate::entities::locations;
use crate::errors::domain::DomainError;

impl From<locations::Model> for Location {
    fn from(m: locations::Model) -> Self {
        Location {
            id: m.id,
            map_id: m.map_id,
            pano_id: m.pano_id,
            latitude: m.latitude,
            longitude: m.longitude,
            heading: m.heading,
            pitch: m.pitch,
        }
    }
}

/// Up to `n` random locations from the map; fewer if the map is small.
pub async fn sample_by_map<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    map_id: Uuid,
    n: u8,
) -> Result<Vec<Location>, DomainError> {
    let rows = locations_adapter::sample_by_map(conn, map_id, u64::from(n)).await?;
    Ok(rows.into_iter().map(Location::from).collect())
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    location_id: Uuid,
) -> Result<Option<Location>, DomainError> {
    let row = locations_adapter::find_by_id(conn, location_id).await?;
    Ok(row.map(Location::from))
}
