//! # Description Loader
//!
//! Reads a Swagger document (YAML or JSON), checks the declared version and expands
//! references before handing typed shims to the index.

use crate::error::{AppError, AppResult};
use crate::swagger::refs::expand_refs;
use crate::swagger::shims::ShimSwagger;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// The only accepted `swagger` version.
pub const SUPPORTED_VERSION: &str = "2.0";

/// Reads and loads a description file.
pub fn load_file(path: &Path) -> AppResult<ShimSwagger> {
    info!(path = %path.display(), "loading API description");
    let content = fs::read_to_string(path)?;
    load_str(&content)
}

/// Loads a description from a YAML or JSON string.
pub fn load_str(content: &str) -> AppResult<ShimSwagger> {
    let raw: Value = serde_yaml::from_str(content)
        .map_err(|e| AppError::Parse(format!("Failed to parse Swagger YAML: {}", e)))?;
    check_version(&raw)?;

    let expanded = expand_refs(&raw)?;
    let shim: ShimSwagger = serde_json::from_value(expanded)
        .map_err(|e| AppError::Parse(format!("Failed to parse Swagger document: {}", e)))?;
    debug!(
        paths = shim.paths.items.len(),
        definitions = shim.definitions.len(),
        "description expanded"
    );
    Ok(shim)
}

fn check_version(raw: &Value) -> AppResult<()> {
    if !raw.is_object() {
        return Err(AppError::Parse(
            "Swagger document must be a mapping at the top level".into(),
        ));
    }
    match raw.get("swagger") {
        Some(Value::String(v)) if v == SUPPORTED_VERSION => Ok(()),
        Some(Value::String(v)) => Err(AppError::SpecVersion(v.clone())),
        // YAML reads an unquoted `2.0` as a float.
        Some(Value::Number(n)) if n.to_string() == SUPPORTED_VERSION => Ok(()),
        Some(other) => Err(AppError::SpecVersion(other.to_string())),
        None => {
            let declared = raw
                .get("openapi")
                .and_then(Value::as_str)
                .map(|v| format!("openapi {}", v))
                .unwrap_or_default();
            Err(AppError::SpecVersion(declared))
        }
    }
}
