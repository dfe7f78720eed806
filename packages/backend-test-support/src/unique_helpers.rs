//! Unique test data so suites sharing a database never collide.

use uuid::Uuid;

/// `{prefix}-{uuid}`
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("map");
/// let b = unique_str("map");
/// assert_ne!(a, b);
/// assert!(a.starts_with("map-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}
