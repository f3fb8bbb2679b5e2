use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

/// A table or column name that is safe to interpolate into SQL text.
///
/// Only lowercase ASCII letters, digits and `_` survive [`sanitize`], so an
/// `Identifier` never needs escaping. It can be empty when every character of
/// the raw text was stripped.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(Arc<str>);

impl Identifier {
    pub fn sanitize(raw: &str) -> Self {
        Self(Arc::from(sanitize(raw)))
    }

    /// Positional fallback name for a column whose header sanitized to nothing.
    pub fn positional(ordinal: usize) -> Self {
        Self(Arc::from(format!("col_{}", ordinal + 1)))
    }

    pub fn with_suffix(&self, n: usize) -> Self {
        Self(Arc::from(format!("{}_{n}", self.0)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalizes arbitrary header or file-name text into an identifier.
///
/// Lower-cases the input, turns `-` into `_`, then drops everything that is
/// not `[a-z0-9_]`. Total and idempotent; uniqueness is not enforced here.
pub fn sanitize(raw: &str) -> String {
    raw.to_lowercase()
        .replace('-', "_")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_basic() {
        assert_eq!(sanitize("Customer-ID"), "customer_id");
        assert_eq!(sanitize("first name"), "firstname");
        assert_eq!(sanitize("Score (%)"), "score");
        assert_eq!(sanitize("already_ok_42"), "already_ok_42");
    }

    #[test]
    fn test_sanitize_strips_sql_metacharacters() {
        assert_eq!(sanitize("x`; DROP TABLE t; --"), "xdroptablet__");
        assert_eq!(sanitize("\"quoted\""), "quoted");
    }

    #[test]
    fn test_sanitize_can_produce_empty() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("%%%"), "");
        assert_eq!(sanitize("日本"), "");
        assert!(Identifier::sanitize("!!").is_empty());
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let samples = [
            "A-1",
            "A_1",
            "  Mixed Case-Header ",
            "ÄÖÜ-ß",
            "İstanbul",
            "tab\there",
            "--",
            "",
            "already_clean",
        ];
        for raw in samples {
            let once = sanitize(raw);
            assert_eq!(sanitize(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_distinct_headers_can_collide() {
        assert_eq!(Identifier::sanitize("A-1"), Identifier::sanitize("A_1"));
    }

    #[test]
    fn test_positional_and_suffix() {
        assert_eq!(Identifier::positional(0).as_str(), "col_1");
        assert_eq!(Identifier::sanitize("a_1").with_suffix(2).as_str(), "a_1_2");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&Identifier::sanitize("Name")).unwrap();
        assert_eq!(json, "\"name\"");
    }
}
