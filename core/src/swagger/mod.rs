#![deny(missing_docs)]

//! # Swagger 2.0 Describer
//!
//! - **loader**: reading, version check and `$ref` expansion.
//! - **shims**: serde structures for the expanded document.
//! - **naming**: the identifier grammar.
//! - **index**: the Topic → Operation → Scenario → Request hierarchy.

pub mod index;
pub mod loader;
pub mod naming;
pub(crate) mod refs;
pub mod shims;

use crate::config::DescriberConfig;
use crate::describer::Describer;
use crate::error::{AppError, AppResult, IdLevel};
use crate::schema::{describe_schema, SchemaDescription};
use crate::swagger::index::{DescriptionIndex, OperationEntry, ScenarioEntry};
use crate::swagger::shims::ShimSwagger;
use crate::synth::{
    build_expected_response, build_request, ExpectedResponse, ParamSet, RequestTemplate,
    ResponseTemplate,
};
use http::Request;
use indexmap::IndexMap;
use serde_json::Value;
use std::path::Path;
use tracing::warn;

/// Provides request scenarios from a Swagger 2.0 document.
///
/// Construction either yields a fully populated, immutable describer or an error.
#[derive(Debug)]
pub struct SwaggerDescriber {
    title: String,
    base_url: String,
    consumes: Vec<String>,
    definitions: IndexMap<String, Value>,
    index: DescriptionIndex,
}

impl SwaggerDescriber {
    /// Loads a YAML or JSON description file with default settings.
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        Self::load_with_config(path, &DescriberConfig::default())
    }

    /// Loads a YAML or JSON description file.
    pub fn load_with_config(path: impl AsRef<Path>, config: &DescriberConfig) -> AppResult<Self> {
        let shim = loader::load_file(path.as_ref())?;
        Self::from_shim(shim, config)
    }

    /// Loads a description from a YAML or JSON string with default settings.
    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        Self::from_yaml_str_with_config(content, &DescriberConfig::default())
    }

    /// Loads a description from a YAML or JSON string.
    pub fn from_yaml_str_with_config(content: &str, config: &DescriberConfig) -> AppResult<Self> {
        let shim = loader::load_str(content)?;
        Self::from_shim(shim, config)
    }

    fn from_shim(shim: ShimSwagger, config: &DescriberConfig) -> AppResult<Self> {
        let index = DescriptionIndex::populate(&shim.paths)?;
        let base_url = config.resolve_base_url(
            &shim.schemes,
            shim.host.as_deref(),
            shim.base_path.as_deref(),
        );

        Ok(Self {
            title: shim.info.map(|i| i.title).unwrap_or_default(),
            base_url,
            consumes: shim.consumes,
            definitions: shim.definitions,
            index,
        })
    }

    /// The API title from `info`.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The base URL requests are built against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_template(&self, entry: &OperationEntry) -> RequestTemplate {
        let content_type = entry
            .operation
            .consumes
            .as_ref()
            .unwrap_or(&self.consumes)
            .first()
            .cloned();

        RequestTemplate {
            method: entry.method.clone(),
            path: entry.path.clone(),
            body_template: body_template(entry),
            content_type,
        }
    }
}

/// The example of the operation's body parameter, serialized as JSON unless it is a
/// plain string.
fn body_template(entry: &OperationEntry) -> Option<String> {
    let param = entry.parameters.iter().find(|p| p.location == "body")?;
    let example = param
        .example
        .as_ref()
        .or_else(|| param.schema.as_ref().and_then(|s| s.get("example")))?;
    Some(match example {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// Logs required header and query parameters the caller did not supply. Missing path
/// parameters are caught later as unresolved placeholders.
fn warn_missing_required(request_id: &str, entry: &OperationEntry, params: &ParamSet<'_>) {
    for param in entry.parameters.iter().filter(|p| p.required) {
        let supplied = match param.location.as_str() {
            "query" => params.query.iter().any(|(name, _)| *name == param.name),
            "header" => params.has_header(&param.name),
            _ => true,
        };
        if !supplied {
            warn!(
                request_id,
                parameter = %param.name,
                location = %param.location,
                "required parameter not supplied"
            );
        }
    }
}

fn response_template(entry: &ScenarioEntry) -> ResponseTemplate {
    ResponseTemplate {
        status: entry.key.status(),
        description: entry.response.description.clone(),
        headers: entry.response.headers.keys().cloned().collect(),
        schema: entry.response.schema.clone(),
    }
}

impl Describer for SwaggerDescriber {
    fn topics(&self) -> Vec<String> {
        self.index.topics()
    }

    fn operations(&self, topic_id: &str) -> Vec<String> {
        self.index.operations(topic_id)
    }

    fn scenarios(&self, operation_id: &str) -> Vec<String> {
        self.index.scenarios(operation_id)
    }

    fn requests(&self, scenario_id: &str) -> Vec<String> {
        self.index.requests(scenario_id)
    }

    fn types(&self) -> Vec<String> {
        let mut names: Vec<String> = self.definitions.keys().cloned().collect();
        names.sort();
        names
    }

    fn get_request(
        &self,
        request_id: &str,
        body: &str,
        params: &[&str],
    ) -> AppResult<(Request<String>, ExpectedResponse)> {
        let (operation, scenario) = self.index.resolve_request(request_id)?;
        let params = ParamSet::parse(params)?;
        warn_missing_required(request_id, operation, &params);
        let request = build_request(
            &self.base_url,
            &self.request_template(operation),
            body,
            &params,
        )?;
        let expected = build_expected_response(&response_template(scenario))?;
        Ok((request, expected))
    }

    fn get_expected_response(&self, request_id: &str) -> AppResult<ExpectedResponse> {
        let (_, scenario) = self.index.resolve_request(request_id)?;
        build_expected_response(&response_template(scenario))
    }

    fn get_schema(&self, type_id: &str) -> AppResult<SchemaDescription> {
        self.definitions
            .get(type_id)
            .map(describe_schema)
            .ok_or_else(|| AppError::UnknownId {
                level: IdLevel::Type,
                id: type_id.to_string(),
            })
    }
}
