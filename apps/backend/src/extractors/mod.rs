pub mod auth_token;
pub mod current_player;
pub mod validated_json;

pub use auth_token::AuthToken;
pub use current_player::CurrentPlayer;
pub use validated_json::ValidatedJson;
