use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between account path segments (`Expenses:Auto:Fuel`).
pub const SEPARATOR: char = ':';

/// A hierarchical ledger account name split into its segments.
///
/// Empty segments (`A::B`, leading or trailing separators) are dropped, so
/// `":Expenses:Auto:"` and `"Expenses:Auto"` parse to the same path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct AccountPath {
    segments: Vec<String>,
}

impl AccountPath {
    pub fn parse(raw: &str) -> Self {
        let segments = raw
            .split(SEPARATOR)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect();
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The last segment, i.e. the account's own short name.
    pub fn leaf(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Full path of the first `depth` segments, e.g. `prefix(2)` of
    /// `Expenses:Auto:Fuel` is `Expenses:Auto`.
    pub fn prefix(&self, depth: usize) -> String {
        let depth = depth.min(self.segments.len());
        self.segments[..depth].join(&SEPARATOR.to_string())
    }
}

impl fmt::Display for AccountPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix(self.segments.len()))
    }
}

impl From<String> for AccountPath {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for AccountPath {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<AccountPath> for String {
    fn from(value: AccountPath) -> Self {
        value.to_string()
    }
}
