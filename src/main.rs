use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;

use typespec_completion::completion::TypespecCompletion;
use typespec_completion::config::{CompletionConfig, CompletionRequest};
use typespec_completion::logging::{default_log_dir, init_logger};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Candidate records
    Json,
    /// LSP completion items
    Lsp,
}

/// Resolve typespec completion candidates for a recorded request
#[derive(Debug, Parser)]
#[command(name = "typespec-complete", version, about)]
struct Args {
    /// JSON request: hint, environment, file metadata and compiled module registry
    #[arg(long)]
    request: PathBuf,

    /// Override the hint stored in the request
    #[arg(long)]
    hint: Option<String>,

    /// JSON completion configuration
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Run even when the request's scope is not a typespec
    #[arg(long)]
    ignore_scope: bool,

    /// Log level for stderr (defaults to RUST_LOG, then "info")
    #[arg(long)]
    log_level: Option<String>,

    #[arg(long)]
    no_color: bool,

    /// Also write a DEBUG-level session log to the cache directory
    #[arg(long)]
    log_file: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_dir = if args.log_file { Some(default_log_dir()?) } else { None };
    let _guard = init_logger(args.no_color, args.log_level.as_deref(), log_dir.as_deref())
        .context("failed to initialize logging")?;

    let config = match &args.config {
        Some(path) => CompletionConfig::load(path)?,
        None => CompletionConfig::default(),
    };
    let request = CompletionRequest::load(&args.request)?;
    let hint = args.hint.unwrap_or(request.hint);

    let completion = TypespecCompletion::from_config(Arc::new(request.registry), &config);
    let scope_guard = args.ignore_scope || request.environment.scope.is_typespec();
    let candidates = completion.resolve_type_candidates(&hint, &request.environment, &request.metadata, scope_guard);

    info!("{} candidates for hint {:?}", candidates.len(), hint);

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&candidates)?,
        OutputFormat::Lsp => {
            let items: Vec<_> = candidates
                .iter()
                .enumerate()
                .map(|(index, candidate)| candidate.to_completion_item(index))
                .collect();
            serde_json::to_string_pretty(&items)?
        }
    };
    println!("{}", output);

    Ok(())
}
