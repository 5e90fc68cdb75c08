#![deny(missing_docs)]

//! # API Description Core
//!
//! Indexes a Swagger 2.0 description as a Topic → Operation → Scenario → Request
//! hierarchy and synthesizes request / expected-response pairs for conformance tests.

/// Shared error types.
pub mod error;

/// Load-time settings.
pub mod config;

/// The format-independent hierarchy contract.
pub mod describer;

/// Swagger 2.0 loading and indexing.
pub mod swagger;

/// Request and response synthesis.
pub mod synth;

/// Structural schema descriptions.
pub mod schema;

/// Running synthesized requests through a requester.
pub mod harness;

pub use config::DescriberConfig;
pub use describer::Describer;
pub use error::{AppError, AppResult, IdLevel};
pub use harness::{match_status, Exchange, Harness, Requester};
pub use schema::{describe_schema, SchemaDescription, SchemaKind};
pub use swagger::naming::ScenarioKey;
pub use swagger::SwaggerDescriber;
pub use synth::{ExpectedResponse, ParamSet, RequestTemplate, ResponseTemplate};
