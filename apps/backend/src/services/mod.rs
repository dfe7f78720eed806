pub mod single_player;
