use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Compiled redaction patterns.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    /// JWT-shaped values: three base64url segments separated by dots
    pub fn jwt() -> &'static Regex {
        static JWT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\beyJ[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+").unwrap()
        });
        &JWT_REGEX
    }

    /// Hyphenated UUIDs, e.g. player ids echoed back by Postgres constraint errors
    pub fn uuid() -> &'static Regex {
        static UUID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(
                r"\b[0-9A-Fa-f]{8}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{12}\b",
            )
            .unwrap()
        });
        &UUID_REGEX
    }

    /// Long hex runs (≥16 chars)
    pub fn hex_token() -> &'static Regex {
        static HEX_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Fa-f0-9]{16,}\b").unwrap()
        });
        &HEX_TOKEN_REGEX
    }
}

/// Masks tokens and identifiers before a string reaches the logs.
///
/// UUIDs keep their first group so log lines stay correlatable.
pub fn redact(input: &str) -> String {
    let jwt_redacted = PiiRegexRegistry::jwt().replace_all(input, "[REDACTED_TOKEN]");

    let uuid_redacted =
        PiiRegexRegistry::uuid().replace_all(&jwt_redacted, |caps: &regex::Captures| {
            let full = &caps[0];
            format!("{}-****", &full[..8])
        });

    PiiRegexRegistry::hex_token()
        .replace_all(&uuid_redacted, "[REDACTED_TOKEN]")
        .to_string()
}

/// Display wrapper that applies [`redact`] when formatted.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}
