//! Command implementations for the Pike CLI.

use log::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::cli::request_file::RequestFile;
use crate::client::{ReplayTransport, SearchClient};
use crate::compile::QueryCompiler;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::search::SearchRequest;

/// Execute a CLI command.
pub fn execute_command(args: PikeArgs) -> Result<()> {
    let config = load_config(&args)?;
    match &args.command {
        Command::Compile(compile_args) => compile_request(compile_args, &config, &args),
        Command::Search(search_args) => search_replay(search_args, config, &args),
        Command::Validate(validate_args) => validate_request(validate_args, &config, &args),
    }
}

fn load_config(args: &PikeArgs) -> Result<ClientConfig> {
    match &args.config {
        Some(path) => {
            debug!("loading configuration from {}", path.display());
            ClientConfig::from_file(path)
        }
        None => Ok(ClientConfig::default()),
    }
}

fn load_request(path: &std::path::Path) -> Result<SearchRequest> {
    info!("reading request file {}", path.display());
    RequestFile::load(path)?.into_request()
}

/// Print the wire body of a request file.
fn compile_request(args: &CompileArgs, config: &ClientConfig, cli_args: &PikeArgs) -> Result<()> {
    let request = load_request(&args.request_file)?;
    config.check_request(&request)?;
    let body = QueryCompiler::from_config(config).compile_request(&request)?;
    output_wire_body(&body, cli_args)
}

/// Decode a recorded response as the reply to a request file.
fn search_replay(args: &SearchArgs, config: ClientConfig, cli_args: &PikeArgs) -> Result<()> {
    let request = load_request(&args.request_file)?;
    info!("replaying response from {}", args.response.display());
    let transport = ReplayTransport::from_file(&args.response)?;

    let client = SearchClient::with_config(transport, config)?;
    let result = client.execute(&request)?;
    output_search_result(&result, args.max_hits, cli_args)
}

/// Check a request file and summarize it.
fn validate_request(args: &ValidateArgs, config: &ClientConfig, cli_args: &PikeArgs) -> Result<()> {
    let request = load_request(&args.request_file)?;
    config.check_request(&request)?;

    let report = ValidationReport {
        target: request.target(),
        query_kind: request.query().kind().to_string(),
        clause_count: request.query().clause_count(),
        query_depth: request.query().depth(),
        has_post_filter: request.post_filter().is_some(),
        sort_fields: request
            .sort()
            .iter()
            .map(|s| format!("{} {}", s.field(), s.order()))
            .collect(),
        aggregations: request
            .aggregations()
            .iter()
            .map(|a| format!("{} ({})", a.name(), a.type_name()))
            .collect(),
    };
    output_result("Request is valid", &report, cli_args)
}
