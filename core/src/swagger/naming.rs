//! # Naming Utilities
//!
//! The identifier grammar of the description hierarchy:
//!
//! - Operation: declared `operationId`, else `<path>.<lowercased-method>`
//! - Scenario: `<operation>.default` or `<operation>.<statusCode>`
//! - Request: `<scenario>.<ordinal>`

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Token naming the unstatused (default) response of an operation.
pub const DEFAULT_TOKEN: &str = "default";

/// Derives an operation identifier from the HTTP Method and URL path when `operationId` is missing.
///
/// e.g. `GET /pets/{id}` -> `/pets/{id}.get`
pub fn derive_operation_id(method: &str, path: &str) -> String {
    format!("{}.{}", path, method.to_lowercase())
}

/// Picks the declared identifier verbatim; an empty `operationId` counts as absent.
pub fn operation_id(declared: Option<&str>, method: &str, path: &str) -> String {
    match declared {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => derive_operation_id(method, path),
    }
}

/// The response outcome a scenario stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScenarioKey {
    /// The `default` response.
    Default,
    /// An explicit numeric status code.
    Status(u16),
}

impl ScenarioKey {
    /// Parses a response key from the `responses` map.
    ///
    /// Returns `None` for keys that are neither `default` nor a `1xx`-`5xx` status code
    /// (e.g. `x-` extensions or ranges such as `2XX`).
    pub fn parse(key: &str) -> Option<Self> {
        if key == DEFAULT_TOKEN {
            return Some(ScenarioKey::Default);
        }
        static STATUS_RE: OnceLock<Regex> = OnceLock::new();
        let status_re =
            STATUS_RE.get_or_init(|| Regex::new(r"^[1-5][0-9]{2}$").expect("Invalid regex"));
        if !status_re.is_match(key) {
            return None;
        }
        key.parse().ok().map(ScenarioKey::Status)
    }

    /// The numeric status, `None` for the default response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ScenarioKey::Default => None,
            ScenarioKey::Status(code) => Some(*code),
        }
    }
}

impl fmt::Display for ScenarioKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioKey::Default => write!(f, "{}", DEFAULT_TOKEN),
            ScenarioKey::Status(code) => write!(f, "{}", code),
        }
    }
}

/// Builds `<operation>.<key>`.
pub fn scenario_id(operation_id: &str, key: ScenarioKey) -> String {
    format!("{}.{}", operation_id, key)
}

/// Builds `<scenario>.<ordinal>`.
pub fn request_id(scenario_id: &str, ordinal: usize) -> String {
    format!("{}.{}", scenario_id, ordinal)
}
