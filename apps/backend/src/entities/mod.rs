pub mod locations;
pub mod maps;
pub mod single_player_games;
pub mod single_player_rounds;

pub use locations::Entity as Locations;
pub use locations::Model as LocationRow;
pub use maps::Entity as Maps;
pub use maps::Model as Map;
pub use single_player_games::Entity as SinglePlayerGames;
pub use single_player_games::Model as SinglePlayerGame;
pub use single_player_rounds::Entity as SinglePlayerRounds;
pub use single_player_rounds::Model as SinglePlayerRound;
