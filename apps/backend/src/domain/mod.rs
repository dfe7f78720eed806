//! Domain layer: pure game logic, no I/O.

pub mod game;
pub mod geo;
pub mod location;
pub mod round;

pub use game::{Game, GameMode, GameStatus, TOTAL_ROUNDS};
pub use geo::{distance_meters, score_from_distance, Coordinates};
pub use location::Location;
pub use round::{Round, RoundStatus};
