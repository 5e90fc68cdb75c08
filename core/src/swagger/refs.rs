//! # Reference Expansion
//!
//! Replaces every local `$ref` in a Swagger document with a copy of its target so the
//! index never deals with indirection. No external documents are fetched: a reference
//! with a document part is an error.
//!
//! Recursive definitions are expanded until the cycle closes; the innermost reference
//! is left in place as a `{"$ref": ...}` object.

use crate::error::{AppError, AppResult};
use percent_encoding::percent_decode_str;
use serde_json::{Map, Value};
use tracing::debug;

/// Returns a copy of `root` with every resolvable `$ref` expanded in place.
pub(crate) fn expand_refs(root: &Value) -> AppResult<Value> {
    let mut stack = Vec::new();
    expand_node(root, root, &mut stack)
}

fn expand_node(node: &Value, root: &Value, stack: &mut Vec<String>) -> AppResult<Value> {
    match node {
        Value::Object(map) => {
            if let Some(Value::String(reference)) = map.get("$ref") {
                return expand_reference(reference, root, stack);
            }
            let mut out = Map::with_capacity(map.len());
            for (key, value) in map {
                out.insert(key.clone(), expand_node(value, root, stack)?);
            }
            Ok(Value::Object(out))
        }
        Value::Array(items) => items
            .iter()
            .map(|item| expand_node(item, root, stack))
            .collect::<AppResult<Vec<_>>>()
            .map(Value::Array),
        other => Ok(other.clone()),
    }
}

fn expand_reference(reference: &str, root: &Value, stack: &mut Vec<String>) -> AppResult<Value> {
    if stack.iter().any(|seen| seen == reference) {
        debug!(reference, "recursive reference left unexpanded");
        let mut map = Map::new();
        map.insert("$ref".into(), Value::String(reference.to_string()));
        return Ok(Value::Object(map));
    }

    let target = resolve_pointer(reference, root)?;
    stack.push(reference.to_string());
    let expanded = expand_node(target, root, stack);
    stack.pop();
    expanded
}

/// Resolves a local reference (`#/definitions/Pet`) against the document root.
pub(crate) fn resolve_pointer<'a>(reference: &str, root: &'a Value) -> AppResult<&'a Value> {
    let pointer = reference.strip_prefix('#').ok_or_else(|| {
        AppError::UnresolvedRef(format!(
            "'{}' is not a local reference (external documents are not fetched)",
            reference
        ))
    })?;

    let mut current = root;
    for segment in pointer.split('/').skip(1) {
        let key = decode_pointer_segment(segment);
        current = match current {
            Value::Object(map) => map.get(&key),
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
        .ok_or_else(|| AppError::UnresolvedRef(format!("'{}' points to nothing", reference)))?;
    }
    Ok(current)
}

/// Decodes a JSON Pointer segment (handles `~1` and `~0`).
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}
