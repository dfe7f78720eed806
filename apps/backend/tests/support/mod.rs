pub mod test_state;

pub use factory::{seed_map, SeededMap};
pub use test_state::{build_pg_test_state, build_test_state, test_security};
