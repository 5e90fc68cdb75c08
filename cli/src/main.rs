#![deny(missing_docs)]

//! # apidesc CLI
//!
//! Command Line Interface over a Swagger 2.0 description index.
//!
//! Supported Commands:
//! - `topics`, `operations`, `scenarios`, `requests`: walk the hierarchy.
//! - `types`, `schema`: list definitions and describe one.
//! - `request`: synthesize a request and its expected response.

use apidesc_core::{Describer, DescriberConfig};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::error::CliResult;
use crate::list::{OperationsArgs, RequestsArgs, ScenariosArgs, SchemaArgs, SpecArg};

mod error;
mod list;
mod request;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "APIDESC_LOG";

#[derive(Parser, Debug)]
#[clap(author, version, about = "Swagger 2.0 description explorer")]
struct Cli {
    /// Base URL for synthesized requests; overrides the document's host and basePath.
    #[clap(long, global = true, env = "APIDESC_BASE_URL")]
    base_url: Option<String>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List path templates.
    Topics(SpecArg),
    /// List operation identifiers.
    Operations(OperationsArgs),
    /// List scenario identifiers.
    Scenarios(ScenariosArgs),
    /// List request identifiers.
    Requests(RequestsArgs),
    /// List named definitions.
    Types(SpecArg),
    /// Describe a named definition as JSON.
    Schema(SchemaArgs),
    /// Print a synthesized request and the response it should get.
    Request(request::RequestArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| "apidesc=warn".into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(cli: &Cli, out: &mut impl Write) -> CliResult<()> {
    let config = DescriberConfig {
        base_url: cli.base_url.clone(),
    };

    match &cli.command {
        Commands::Topics(spec) => list::print_ids(&spec.load(&config)?.topics(), out),
        Commands::Operations(args) => {
            let api = args.spec.load(&config)?;
            list::print_ids(&api.operations(&args.topic), out)
        }
        Commands::Scenarios(args) => {
            let api = args.spec.load(&config)?;
            list::print_ids(&api.scenarios(&args.operation), out)
        }
        Commands::Requests(args) => {
            let api = args.spec.load(&config)?;
            list::print_ids(&api.requests(&args.scenario), out)
        }
        Commands::Types(spec) => list::print_ids(&spec.load(&config)?.types(), out),
        Commands::Schema(args) => {
            let api = args.spec.load(&config)?;
            list::print_schema(&api, &args.type_id, out)
        }
        Commands::Request(args) => {
            let api = args.spec.load(&config)?;
            request::execute(args, &api, out)
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    debug!(?cli, "parsed command line");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match run(&cli, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
