#![deny(missing_docs)]

//! # Listing Commands
//!
//! Enumerates one level of the hierarchy, or the named types, one identifier per line.
//! Schemas are printed as pretty JSON.

use crate::error::CliResult;
use apidesc_core::{Describer, DescriberConfig, SwaggerDescriber};
use std::io::Write;
use std::path::PathBuf;

/// The description file every command reads.
#[derive(clap::Args, Debug, Clone)]
pub struct SpecArg {
    /// Path to a Swagger 2.0 description (YAML or JSON).
    pub spec: PathBuf,
}

impl SpecArg {
    /// Loads the description with `config`.
    pub fn load(&self, config: &DescriberConfig) -> CliResult<SwaggerDescriber> {
        Ok(SwaggerDescriber::load_with_config(&self.spec, config)?)
    }
}

/// Arguments for `operations`.
#[derive(clap::Args, Debug, Clone)]
pub struct OperationsArgs {
    #[clap(flatten)]
    pub spec: SpecArg,

    /// Only operations declared on this path template.
    #[clap(long, default_value = "")]
    pub topic: String,
}

/// Arguments for `scenarios`.
#[derive(clap::Args, Debug, Clone)]
pub struct ScenariosArgs {
    #[clap(flatten)]
    pub spec: SpecArg,

    /// Only scenarios of this operation.
    #[clap(long, default_value = "")]
    pub operation: String,
}

/// Arguments for `requests`.
#[derive(clap::Args, Debug, Clone)]
pub struct RequestsArgs {
    #[clap(flatten)]
    pub spec: SpecArg,

    /// Only requests of this scenario.
    #[clap(long, default_value = "")]
    pub scenario: String,
}

/// Arguments for `schema`.
#[derive(clap::Args, Debug, Clone)]
pub struct SchemaArgs {
    #[clap(flatten)]
    pub spec: SpecArg,

    /// Name of a definition, as listed by `types`.
    pub type_id: String,
}

/// Writes one identifier per line.
pub fn print_ids(ids: &[String], out: &mut impl Write) -> CliResult<()> {
    for id in ids {
        writeln!(out, "{}", id)?;
    }
    Ok(())
}

/// Writes the structural description of `type_id` as pretty JSON.
pub fn print_schema(api: &dyn Describer, type_id: &str, out: &mut impl Write) -> CliResult<()> {
    let schema = api.get_schema(type_id)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&schema)?)?;
    Ok(())
}
