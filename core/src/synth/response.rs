//! # Response Synthesis
//!
//! Turns a documented response outcome into the response a caller should expect.
//! Only the status (and documented metadata) is synthesized; bodies are not checked.

use crate::error::{AppError, AppResult};
use crate::schema::{describe_schema, SchemaDescription};
use http::StatusCode;
use serde_json::Value;

/// A documented response, independent of the description format.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseTemplate {
    /// Numeric status, `None` for the default response.
    pub status: Option<u16>,
    /// The response description.
    pub description: String,
    /// Documented header names.
    pub headers: Vec<String>,
    /// Expanded body schema, if any.
    pub schema: Option<Value>,
}

/// The response a scenario promises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedResponse {
    /// The promised status, `None` for a default scenario (any status).
    pub status: Option<StatusCode>,
    /// Standard reason phrase, empty for default or non-standard codes.
    pub status_text: String,
    /// The documented description.
    pub description: String,
    /// Documented response header names, sorted.
    pub headers: Vec<String>,
    /// Shape of the documented body.
    pub schema: Option<SchemaDescription>,
}

impl ExpectedResponse {
    /// The numeric status; 0 for a default scenario.
    pub fn status_code(&self) -> u16 {
        self.status.map(|s| s.as_u16()).unwrap_or(0)
    }

    /// Whether `actual` satisfies the promised status.
    pub fn accepts(&self, actual: StatusCode) -> bool {
        self.status.map_or(true, |expected| expected == actual)
    }
}

/// Builds the expected response for a documented outcome.
pub fn build_expected_response(template: &ResponseTemplate) -> AppResult<ExpectedResponse> {
    let status = template
        .status
        .map(|code| {
            StatusCode::from_u16(code)
                .map_err(|e| AppError::General(format!("Invalid status code {}: {}", code, e)))
        })
        .transpose()?;

    let mut headers = template.headers.clone();
    headers.sort();

    Ok(ExpectedResponse {
        status,
        status_text: status
            .and_then(|s| s.canonical_reason())
            .unwrap_or_default()
            .to_string(),
        description: template.description.clone(),
        headers,
        schema: template.schema.as_ref().map(describe_schema),
    })
}
