#![deny(missing_docs)]

//! # Describer
//!
//! A description of an API as a hierarchy:
//!
//! - Topics: broad groupings, usually path templates
//! - Operations: one method + path each
//! - Scenarios: the documented outcomes of an operation
//! - Requests: request / expected-response pairs of a scenario
//!
//! Every filter treats `""` as "all". Results are sorted and stable for the lifetime of
//! the describer. The trait names no description format; Swagger 2.0 is one
//! implementation.

use crate::error::AppResult;
use crate::schema::SchemaDescription;
use crate::synth::ExpectedResponse;
use http::Request;

/// Read-only access to an indexed API description.
pub trait Describer: Send + Sync {
    /// Topic identifiers.
    fn topics(&self) -> Vec<String>;

    /// Operation identifiers under `topic_id`.
    fn operations(&self, topic_id: &str) -> Vec<String>;

    /// Scenario identifiers of `operation_id`.
    fn scenarios(&self, operation_id: &str) -> Vec<String>;

    /// Request identifiers of `scenario_id`.
    fn requests(&self, scenario_id: &str) -> Vec<String>;

    /// Names of the types defined by the description.
    fn types(&self) -> Vec<String>;

    /// Applies `params` to the path, query and body template of the request, returning
    /// the request and the expected response.
    ///
    /// `params` is `[name1, value1, name2, value2, ...]`; names are prefixed with
    /// `:` (header), `&` (query) or `=` (raw template substitution, add quotes yourself).
    /// A non-empty `body` is sent verbatim.
    fn get_request(
        &self,
        request_id: &str,
        body: &str,
        params: &[&str],
    ) -> AppResult<(Request<String>, ExpectedResponse)>;

    /// The response the scenario behind `request_id` promises.
    fn get_expected_response(&self, request_id: &str) -> AppResult<ExpectedResponse>;

    /// Structural description of a named type.
    fn get_schema(&self, type_id: &str) -> AppResult<SchemaDescription>;
}
