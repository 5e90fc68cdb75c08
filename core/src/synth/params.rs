//! # Parameter Grammar
//!
//! Synthesis parameters arrive as a flat `[key1, value1, key2, value2, ...]` list.
//! The first character of each key routes the pair:
//!
//! - `:` header, string value
//! - `&` URL query parameter, string value
//! - `=` raw literal substituted for `{key}` in the path and body templates.
//!   Quotes are not added: pass `"\"rex\""` to get a JSON string.

use crate::error::{AppError, AppResult};
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Where a parameter pair is routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamTarget {
    /// `:` prefix.
    Header,
    /// `&` prefix.
    Query,
    /// `=` prefix.
    Template,
}

impl ParamTarget {
    fn from_prefix(prefix: char) -> Option<Self> {
        match prefix {
            ':' => Some(ParamTarget::Header),
            '&' => Some(ParamTarget::Query),
            '=' => Some(ParamTarget::Template),
            _ => None,
        }
    }
}

/// Parameters split by target, each list in caller order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamSet<'a> {
    /// Header name / value pairs.
    pub headers: Vec<(&'a str, &'a str)>,
    /// Query name / value pairs.
    pub query: Vec<(&'a str, &'a str)>,
    /// Placeholder name / raw literal pairs.
    pub substitutions: Vec<(&'a str, &'a str)>,
}

impl<'a> ParamSet<'a> {
    /// Parses the alternating key/value list.
    ///
    /// Fails on an odd number of entries, a key without a recognized prefix, or a key
    /// that is only a prefix.
    pub fn parse(params: &[&'a str]) -> AppResult<Self> {
        if params.len() % 2 != 0 {
            return Err(AppError::ParamFormat(format!(
                "expected key/value pairs, got {} entries (last key `{}` has no value)",
                params.len(),
                params[params.len() - 1]
            )));
        }

        let mut set = ParamSet::default();
        for pair in params.chunks(2) {
            let (key, value) = (pair[0], pair[1]);
            let mut chars = key.chars();
            let target = chars.next().and_then(ParamTarget::from_prefix).ok_or_else(|| {
                AppError::ParamFormat(format!(
                    "key `{}` must start with one of ':' (header), '&' (query) or '=' (template)",
                    key
                ))
            })?;
            let name = chars.as_str();
            if name.is_empty() {
                return Err(AppError::ParamFormat(format!(
                    "key `{}` has a prefix but no name",
                    key
                )));
            }

            match target {
                ParamTarget::Header => set.headers.push((name, value)),
                ParamTarget::Query => set.query.push((name, value)),
                ParamTarget::Template => set.substitutions.push((name, value)),
            }
        }
        Ok(set)
    }

    /// Replaces every `{name}` placeholder that has a substitution, in one pass over
    /// `template`. Substituted values are never rescanned.
    pub fn apply(&self, template: &str) -> String {
        placeholder_re()
            .replace_all(template, |caps: &Captures<'_>| {
                match self.substitution(&caps[1]) {
                    Some(value) => value.to_string(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    /// Names of the `{placeholder}` segments of `template` without a substitution.
    pub fn unresolved<'t>(&self, template: &'t str) -> Vec<&'t str> {
        placeholders(template)
            .into_iter()
            .filter(|name| self.substitution(name).is_none())
            .collect()
    }

    /// Whether a header was supplied under `name` (case-insensitive).
    pub fn has_header(&self, name: &str) -> bool {
        self.headers
            .iter()
            .any(|(h, _)| h.eq_ignore_ascii_case(name))
    }

    fn substitution(&self, name: &str) -> Option<&'a str> {
        self.substitutions
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, value)| *value)
    }
}

/// Matches `{name}`; names never contain braces, so JSON bodies scan cleanly.
fn placeholder_re() -> &'static Regex {
    static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER_RE.get_or_init(|| Regex::new(r"\{([^{}]+)\}").expect("Invalid regex"))
}

/// Names of the `{placeholder}` segments in `template`, in order of appearance.
pub fn placeholders(template: &str) -> Vec<&str> {
    placeholder_re()
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes_by_prefix() {
        let set = ParamSet::parse(&[
            ":Authorization", "Bearer t",
            "&limit", "10",
            "=id", "42",
            "&tags", "a",
        ])
        .unwrap();
        assert_eq!(set.headers, vec![("Authorization", "Bearer t")]);
        assert_eq!(set.query, vec![("limit", "10"), ("tags", "a")]);
        assert_eq!(set.substitutions, vec![("id", "42")]);
    }

    #[test]
    fn test_empty_params() {
        assert_eq!(ParamSet::parse(&[]).unwrap(), ParamSet::default());
    }

    #[test]
    fn test_odd_length_fails() {
        let err = ParamSet::parse(&[":Accept", "text/plain", "&limit"]).unwrap_err();
        assert!(matches!(err, AppError::ParamFormat(_)));
        assert!(err.to_string().contains("&limit"));
    }

    #[test]
    fn test_unknown_prefix_fails() {
        let err = ParamSet::parse(&["limit", "10"]).unwrap_err();
        assert!(matches!(err, AppError::ParamFormat(_)));
        assert!(err.to_string().contains("`limit`"));

        assert!(ParamSet::parse(&["#id", "1"]).is_err());
        assert!(ParamSet::parse(&["", "1"]).is_err());
    }

    #[test]
    fn test_prefix_only_key_fails() {
        let err = ParamSet::parse(&["=", "1"]).unwrap_err();
        assert!(err.to_string().contains("no name"));
    }

    #[test]
    fn test_apply_is_raw() {
        let set = ParamSet::parse(&["=id", "7", "=name", "\"rex\""]).unwrap();
        assert_eq!(set.apply("/pets/{id}"), "/pets/7");
        assert_eq!(set.apply(r#"{"name": {name}}"#), r#"{"name": "rex"}"#);
        assert_eq!(set.apply("/owners/{owner}"), "/owners/{owner}");
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders("/owners/{owner}/pets/{id}"), vec!["owner", "id"]);
        assert_eq!(placeholders(r#"{"note": {note}}"#), vec!["note"]);
        assert!(placeholders("/pets").is_empty());
    }

    #[test]
    fn test_unresolved_checks_template_names() {
        let set = ParamSet::parse(&["=id", "{x}"]).unwrap();
        assert!(set.unresolved("/pets/{id}").is_empty());
        assert_eq!(set.unresolved("/owners/{owner}/pets/{id}"), vec!["owner"]);
    }

    #[test]
    fn test_apply_does_not_rescan_values() {
        let template = r#"{"note": {note}, "id": {id}}"#;
        let forward = ParamSet::parse(&["=note", "\"see {id}\"", "=id", "5"]).unwrap();
        let reverse = ParamSet::parse(&["=id", "5", "=note", "\"see {id}\""]).unwrap();
        assert_eq!(forward.apply(template), r#"{"note": "see {id}", "id": 5}"#);
        assert_eq!(forward.apply(template), reverse.apply(template));
    }

    #[test]
    fn test_has_header_ignores_case() {
        let set = ParamSet::parse(&[":content-type", "text/plain"]).unwrap();
        assert!(set.has_header("Content-Type"));
        assert!(!set.has_header("Accept"));
    }
}
