//! Infrastructure layer: connections, state assembly and DB error translation.

pub mod db;
pub mod db_errors;
pub mod schema_guard;
pub mod state;
