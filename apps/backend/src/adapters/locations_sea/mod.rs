//! SeaORM adapter for the map/location catalog.
//!
//! The game engine only reads locations. The insert helpers exist for seeding
//! and tests; catalog management lives in another service.

use sea_orm::sea_query::{Expr, Order};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::{locations, maps};

#[derive(Debug, Clone)]
pub struct MapCreate {
    pub name: String,
    pub description: String,
    pub owner_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct LocationCreate {
    pub pano_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub heading: f64,
    pub pitch: f64,
}

/// Up to `limit` random locations of a map.
pub async fn sample_by_map<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    map_id: Uuid,
    limit: u64,
) -> Result<Vec<locations::Model>, DbErr> {
    // RANDOM() is spelled the same in Postgres and SQLite.
    locations::Entity::find()
        .filter(locations::Column::MapId.eq(map_id))
        .order_by(Expr::cust("RANDOM()"), Order::Asc)
        .limit(limit)
        .all(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    location_id: Uuid,
) -> Result<Option<locations::Model>, DbErr> {
    locations::Entity::find_by_id(location_id).one(conn).await
}

pub async fn create_map<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MapCreate,
) -> Result<Uuid, DbErr> {
    let id = Uuid::new_v4();
    let now = OffsetDateTime::now_utc();
    let map = maps::ActiveModel {
        id: Set(id),
        name: Set(dto.name),
        description: Set(dto.description),
        owner_id: Set(dto.owner_id),
        created_at: Set(now),
        updated_at: Set(now),
    };
    maps::Entity::insert(map).exec_without_returning(conn).await?;
    Ok(id)
}

/// Insert locations for a map, returning their ids in input order.
pub async fn create_locations<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    map_id: Uuid,
    items: Vec<LocationCreate>,
) -> Result<Vec<Uuid>, DbErr> {
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let now = OffsetDateTime::now_utc();
    let ids: Vec<Uuid> = items.iter().map(|_| Uuid::new_v4()).collect();
    let rows = ids.iter().zip(items).map(|(id, item)| locations::ActiveModel {
        id: Set(*id),
        map_id: Set(map_id),
        pano_id: Set(item.pano_id),
        latitude: Set(item.latitude),
        longitude: Set(item.longitude),
        heading: Set(item.heading),
        pitch: Set(item.pitch),
        created_at: Set(now),
        updated_at: Set(now),
    });

    locations::Entity::insert_many(rows)
        .exec_without_returning(conn)
        .await?;
    Ok(ids)
}
