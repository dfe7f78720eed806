//! Client-facing projections of games and rounds.
//!
//! A round's panorama is visible once it has started; the true coordinates
//! only once it is completed.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::{Coordinates, Game, GameMode, GameStatus, Location, Round, RoundStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanoramaView {
    pub pano_id: String,
    pub heading: f64,
    pub pitch: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundView {
    pub id: Uuid,
    pub round_number: u8,
    pub status: RoundStatus,
    pub round_seconds: u16,
    pub panorama: Option<PanoramaView>,
    pub answer: Option<Coordinates>,
    pub guess: Option<Coordinates>,
    pub distance_meters: f64,
    pub score: u32,
    #[serde(with = "time::serde::rfc3339::option")]
    pub started_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub ended_at: Option<OffsetDateTime>,
}

impl RoundView {
    /// `location` is ignored for pending rounds.
    pub fn build(round: &Round, location: Option<&Location>) -> Self {
        let location = match round.status {
            RoundStatus::Pending => None,
            RoundStatus::InProgress | RoundStatus::Completed => location,
        };

        let panorama = location.map(|l| PanoramaView {
            pano_id: l.pano_id.clone(),
            heading: l.heading,
            pitch: l.pitch,
        });
        let answer = location
            .filter(|_| round.status == RoundStatus::Completed)
            .map(Location::coordinates);
        let guess = match (round.guess_latitude, round.guess_longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        };

        Self {
            id: round.id,
            round_number: round.round_number,
            status: round.status,
            round_seconds: round.round_seconds,
            panorama,
            answer,
            guess,
            distance_meters: round.distance_meters,
            score: round.score,
            started_at: round.started_at,
            ended_at: round.ended_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameView {
    pub id: Uuid,
    pub map_id: Uuid,
    pub mode: GameMode,
    pub status: GameStatus,
    pub current_round: u8,
    pub total_rounds: u8,
    pub round_seconds: u16,
    pub score: u32,
    #[serde(with = "time::serde::rfc3339::option")]
    pub started_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub ended_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub rounds: Vec<RoundView>,
}

impl GameView {
    pub fn build(game: &Game, rounds: Vec<RoundView>) -> Self {
        Self {
            id: game.id,
            map_id: game.map_id,
            mode: game.mode,
            status: game.status,
            current_round: game.current_round,
            total_rounds: game.total_rounds,
            round_seconds: game.round_seconds,
            score: game.score,
            started_at: game.started_at,
            ended_at: game.ended_at,
            created_at: game.created_at,
            rounds,
        }
    }
}
