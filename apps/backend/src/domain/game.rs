//! Single-player game aggregate and its state machine.
//!
//! `pending -> in_progress -> completed`, never back. `current_round` counts
//! started rounds and stays within `0..=total_rounds`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::location::Location;
use super::round::Round;
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};

pub const TOTAL_ROUNDS: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    Move,
    NoMove,
    /// No move, pan or zoom
    Nmpz,
}

impl GameMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            GameMode::Move => "move",
            GameMode::NoMove => "no_move",
            GameMode::Nmpz => "nmpz",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "move" => Ok(GameMode::Move),
            "no_move" => Ok(GameMode::NoMove),
            "nmpz" => Ok(GameMode::Nmpz),
            other => Err(DomainError::validation(
                ValidationKind::InvalidGameMode,
                format!("invalid game mode: '{other}' (expected move, no_move or nmpz)"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Pending,
    InProgress,
    Completed,
}

impl GameStatus {
    /// Statuses covered by the one-active-game-per-player rule.
    pub fn is_active(&self) -> bool {
        matches!(self, GameStatus::Pending | GameStatus::InProgress)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: Uuid,
    pub player_id: Uuid,
    pub map_id: Uuid,
    pub mode: GameMode,
    pub status: GameStatus,
    pub current_round: u8,
    pub total_rounds: u8,
    pub round_seconds: u16,
    pub score: u32,
    pub started_at: Option<OffsetDateTime>,
    pub ended_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    /// Populated at creation. Loaded games carry none; use the round repo.
    pub rounds: Vec<Round>,
}

impl Game {
    pub fn new(player_id: Uuid, map_id: Uuid, mode: GameMode, round_seconds: u16) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: Uuid::new_v4(),
            player_id,
            map_id,
            mode,
            status: GameStatus::Pending,
            current_round: 0,
            total_rounds: TOTAL_ROUNDS,
            round_seconds,
            score: 0,
            started_at: None,
            ended_at: None,
            created_at: now,
            updated_at: now,
            rounds: Vec::new(),
        }
    }

    pub fn start(&mut self) -> Result<(), DomainError> {
        if self.status != GameStatus::Pending {
            return Err(DomainError::validation(
                ValidationKind::GameNotPending,
                "game is not pending",
            ));
        }
        let now = OffsetDateTime::now_utc();
        self.status = GameStatus::InProgress;
        self.started_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Append one pending round per location, numbered after the existing ones.
    pub fn add_rounds_from_locations(&mut self, locations: &[Location]) {
        debug_assert!(
            self.rounds.len() + locations.len() <= usize::from(self.total_rounds),
            "a game holds at most total_rounds rounds"
        );
        let first = self.rounds.len();
        for (offset, location) in locations.iter().enumerate() {
            let Ok(number) = u8::try_from(first + offset + 1) else {
                break;
            };
            self.rounds
                .push(Round::new(self.id, location.id, number, self.round_seconds));
        }
    }

    /// Start round `current_round + 1` and return it.
    pub fn start_next_round(&mut self) -> Result<&Round, DomainError> {
        self.ensure_can_advance()?;

        let next = self.current_round + 1;
        let idx = self
            .rounds
            .iter()
            .position(|r| r.round_number == next)
            .ok_or_else(|| DomainError::infra(InfraErrorKind::DataCorruption, "round not found"))?;

        self.rounds[idx].start()?;
        self.current_round = next;
        self.updated_at = OffsetDateTime::now_utc();
        Ok(&self.rounds[idx])
    }

    /// Move the round counter forward without touching `rounds`.
    ///
    /// Used when the next round was loaded and started separately.
    pub fn advance_round(&mut self) -> Result<(), DomainError> {
        self.ensure_can_advance()?;
        self.current_round += 1;
        self.updated_at = OffsetDateTime::now_utc();
        Ok(())
    }

    /// Negative deltas are ignored.
    pub fn add_score(&mut self, delta: i64) {
        if delta <= 0 {
            return;
        }
        let delta = u32::try_from(delta).unwrap_or(u32::MAX);
        self.score = self.score.saturating_add(delta);
        self.updated_at = OffsetDateTime::now_utc();
    }

    pub fn complete(&mut self) -> Result<(), DomainError> {
        if self.status != GameStatus::InProgress {
            return Err(DomainError::validation(
                ValidationKind::GameNotInProgress,
                "game is not in progress",
            ));
        }
        let now = OffsetDateTime::now_utc();
        self.status = GameStatus::Completed;
        self.ended_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    pub fn has_next_round(&self) -> bool {
        self.current_round < self.total_rounds
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == GameStatus::InProgress
    }

    fn ensure_can_advance(&self) -> Result<(), DomainError> {
        if !self.is_in_progress() {
            return Err(DomainError::validation(
                ValidationKind::GameNotInProgress,
                "game is not in progress",
            ));
        }
        if !self.has_next_round() {
            return Err(DomainError::validation(
                ValidationKind::GameAlreadyCompleted,
                "game is already completed",
            ));
        }
        Ok(())
    }
}
