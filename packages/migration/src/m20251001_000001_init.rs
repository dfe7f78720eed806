use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Name of the partial unique index that allows one unfinished game per player.
pub const ACTIVE_GAME_INDEX: &str = "ux_single_player_games_active_player";

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Maps {
    Table,
    Id,
    Name,
    Description,
    OwnerId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Locations {
    Table,
    Id,
    MapId,
    PanoId,
    Latitude,
    Longitude,
    Heading,
    Pitch,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum SinglePlayerGames {
    Table,
    Id,
    PlayerId,
    MapId,
    Mode,
    Status,
    Score,
    CurrentRound,
    TotalRounds,
    RoundSeconds,
    StartedAt,
    EndedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum SinglePlayerRounds {
    Table,
    Id,
    GameId,
    LocationId,
    RoundNumber,
    Status,
    GuessLatitude,
    GuessLongitude,
    DistanceMeters,
    Score,
    RoundSeconds,
    StartedAt,
    EndedAt,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // maps
        manager
            .create_table(
                Table::create()
                    .table(Maps::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Maps::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Maps::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Maps::Description).text().not_null())
                    .col(ColumnDef::new(Maps::OwnerId).uuid().not_null())
                    .col(
                        ColumnDef::new(Maps::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Maps::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // locations
        manager
            .create_table(
                Table::create()
                    .table(Locations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Locations::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Locations::MapId).uuid().not_null())
                    .col(ColumnDef::new(Locations::PanoId).string().not_null())
                    .col(ColumnDef::new(Locations::Latitude).double().not_null())
                    .col(ColumnDef::new(Locations::Longitude).double().not_null())
                    .col(
                        ColumnDef::new(Locations::Heading)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Locations::Pitch)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Locations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Locations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_locations_map_id")
                            .from(Locations::Table, Locations::MapId)
                            .to(Maps::Table, Maps::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // one panorama per map
        manager
            .create_index(
                Index::create()
                    .name("ux_locations_map_pano")
                    .table(Locations::Table)
                    .col(Locations::MapId)
                    .col(Locations::PanoId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // single_player_games
        manager
            .create_table(
                Table::create()
                    .table(SinglePlayerGames::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SinglePlayerGames::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SinglePlayerGames::PlayerId).uuid().not_null())
                    .col(ColumnDef::new(SinglePlayerGames::MapId).uuid().not_null())
                    .col(
                        ColumnDef::new(SinglePlayerGames::Mode)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SinglePlayerGames::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(SinglePlayerGames::Score)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SinglePlayerGames::CurrentRound)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SinglePlayerGames::TotalRounds)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SinglePlayerGames::RoundSeconds)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SinglePlayerGames::StartedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(SinglePlayerGames::EndedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(SinglePlayerGames::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SinglePlayerGames::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_single_player_games_map_id")
                            .from(SinglePlayerGames::Table, SinglePlayerGames::MapId)
                            .to(Maps::Table, Maps::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_single_player_games_player_id")
                    .table(SinglePlayerGames::Table)
                    .col(SinglePlayerGames::PlayerId)
                    .to_owned(),
            )
            .await?;

        // Partial unique index: Postgres and SQLite share the syntax.
        manager
            .get_connection()
            .execute_unprepared(&format!(
                "CREATE UNIQUE INDEX IF NOT EXISTS {ACTIVE_GAME_INDEX} \
                 ON single_player_games (player_id) \
                 WHERE status IN ('pending', 'in_progress')"
            ))
            .await?;

        // single_player_rounds
        manager
            .create_table(
                Table::create()
                    .table(SinglePlayerRounds::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SinglePlayerRounds::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SinglePlayerRounds::GameId).uuid().not_null())
                    .col(
                        ColumnDef::new(SinglePlayerRounds::LocationId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SinglePlayerRounds::RoundNumber)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SinglePlayerRounds::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(SinglePlayerRounds::GuessLatitude)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(SinglePlayerRounds::GuessLongitude)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(SinglePlayerRounds::DistanceMeters)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(SinglePlayerRounds::Score)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SinglePlayerRounds::RoundSeconds)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SinglePlayerRounds::StartedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(SinglePlayerRounds::EndedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(SinglePlayerRounds::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SinglePlayerRounds::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_single_player_rounds_game_id")
                            .from(SinglePlayerRounds::Table, SinglePlayerRounds::GameId)
                            .to(SinglePlayerGames::Table, SinglePlayerGames::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_single_player_rounds_location_id")
                            .from(SinglePlayerRounds::Table, SinglePlayerRounds::LocationId)
                            .to(Locations::Table, Locations::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_single_player_rounds_game_number")
                    .table(SinglePlayerRounds::Table)
                    .col(SinglePlayerRounds::GameId)
                    .col(SinglePlayerRounds::RoundNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(SinglePlayerRounds::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(SinglePlayerGames::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Locations::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Maps::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
