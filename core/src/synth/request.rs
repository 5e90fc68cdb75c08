//! # Request Synthesis
//!
//! Applies a parsed [`ParamSet`] to an operation's request template and assembles an
//! `http::Request`.
//!
//! Every `{name}` placeholder of the path template must have a `=` parameter.
//! Substituted values are raw and never rescanned for further placeholders.

use crate::error::{AppError, AppResult};
use crate::synth::params::ParamSet;
use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::{Method, Request};
use tracing::debug;
use url::Url;

/// What an operation contributes to a request, independent of the description format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTemplate {
    /// HTTP method (any case).
    pub method: String,
    /// Path template, e.g. `/pets/{id}`.
    pub path: String,
    /// Body used when the caller passes an empty body; `=` substitutions apply to it.
    pub body_template: Option<String>,
    /// Media type sent as `Content-Type` when a body is present and none was given.
    pub content_type: Option<String>,
}

/// Builds the request for `template` against `base_url`.
///
/// A non-empty `body` is attached verbatim.
pub fn build_request(
    base_url: &str,
    template: &RequestTemplate,
    body: &str,
    params: &ParamSet<'_>,
) -> AppResult<Request<String>> {
    let unresolved = params.unresolved(&template.path);
    if !unresolved.is_empty() {
        return Err(AppError::ParamFormat(format!(
            "path `{}` has unresolved parameters [{}]; supply them as `={{name}}` params",
            template.path,
            unresolved.join(", ")
        )));
    }

    let path = params.apply(&template.path);
    let url = build_url(base_url, &path, params)?;

    let method = Method::from_bytes(template.method.to_uppercase().as_bytes()).map_err(|e| {
        AppError::RequestBuild(format!("invalid method `{}`: {}", template.method, e))
    })?;

    let body = if !body.is_empty() {
        body.to_string()
    } else {
        template
            .body_template
            .as_deref()
            .map(|t| params.apply(t))
            .unwrap_or_default()
    };

    let mut builder = Request::builder().method(method).uri(url.as_str());
    for (name, value) in &params.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| AppError::RequestBuild(format!("invalid header name `{}`: {}", name, e)))?;
        let value = HeaderValue::from_str(value).map_err(|e| {
            AppError::RequestBuild(format!("invalid value for header `{}`: {}", name, e))
        })?;
        builder = builder.header(name, value);
    }
    if !body.is_empty() && !params.has_header(CONTENT_TYPE.as_str()) {
        if let Some(content_type) = &template.content_type {
            builder = builder.header(CONTENT_TYPE, content_type.as_str());
        }
    }

    debug!(url = %url, method = %template.method, body_len = body.len(), "synthesized request");
    builder
        .body(body)
        .map_err(|e| AppError::RequestBuild(format!("failed to build request for {}: {}", url, e)))
}

fn build_url(base_url: &str, path: &str, params: &ParamSet<'_>) -> AppResult<Url> {
    let raw = format!("{}{}", base_url.trim_end_matches('/'), path);
    let mut url = Url::parse(&raw)
        .map_err(|e| AppError::RequestBuild(format!("invalid URL `{}`: {}", raw, e)))?;
    if !params.query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in &params.query {
            pairs.append_pair(name, value);
        }
    }
    Ok(url)
}
