//! SeaORM adapters. Free functions generic over `ConnectionTrait` returning raw `DbErr`;
//! the repos layer maps errors and converts rows into domain types.

pub mod games_sea;
pub mod locations_sea;
pub mod rounds_sea;
