use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    Pending,
    InProgress,
    Completed,
}

/// One panorama to guess. Belongs to a game through `game_id` only.
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub id: Uuid,
    pub game_id: Uuid,
    pub location_id: Uuid,
    /// 1-based position within the game
    pub round_number: u8,
    pub status: RoundStatus,
    pub guess_latitude: Option<f64>,
    pub guess_longitude: Option<f64>,
    pub distance_meters: f64,
    pub score: u32,
    pub round_seconds: u16,
    pub started_at: Option<OffsetDateTime>,
    pub ended_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Round {
    pub fn new(game_id: Uuid, location_id: Uuid, round_number: u8, round_seconds: u16) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: Uuid::new_v4(),
            game_id,
            location_id,
            round_number,
            status: RoundStatus::Pending,
            guess_latitude: None,
            guess_longitude: None,
            distance_meters: 0.0,
            score: 0,
            round_seconds,
            started_at: None,
            ended_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn start(&mut self) -> Result<(), DomainError> {
        if self.status != RoundStatus::Pending {
            return Err(DomainError::validation(
                ValidationKind::RoundNotPending,
                "round is not pending",
            ));
        }
        let now = OffsetDateTime::now_utc();
        self.status = RoundStatus::InProgress;
        self.started_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Record a guess and its result. Callers check `is_in_progress` first.
    pub fn apply_guess(&mut self, latitude: f64, longitude: f64, distance_meters: f64, score: u32) {
        self.guess_latitude = Some(latitude);
        self.guess_longitude = Some(longitude);
        self.distance_meters = distance_meters;
        self.score = score;
        self.updated_at = OffsetDateTime::now_utc();
    }

    pub fn finish(&mut self) -> Result<(), DomainError> {
        if self.status != RoundStatus::InProgress {
            return Err(DomainError::validation(
                ValidationKind::RoundNotInProgress,
                "round is not in progress",
            ));
        }
        let now = OffsetDateTime::now_utc();
        self.status = RoundStatus::Completed;
        self.ended_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == RoundStatus::InProgress
    }
}
