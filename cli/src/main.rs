//! CLI entrypoint for toolrouter
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use toolrouter_application::{
    ExecuteToolCallInput, ExecuteToolCallUseCase, NoProgress, NoToolCallLogger, RoutingParams,
    ToolCallLogger, ToolCallProgress, ToolExecutorPort,
};
use toolrouter_domain::IntentScorer;
use toolrouter_infrastructure::{
    ConfigLoader, CookieStore, FileConfig, JsonlToolCallLogger, ToolRegistry,
};
use toolrouter_presentation::{Cli, ConsoleFormatter, ProgressReporter, SimpleProgress, ToolRepl};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _log_guard = init_tracing(&cli)?;

    if cli.show_config {
        for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        return Ok(ExitCode::SUCCESS);
    }

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("failed to load configuration")?
    };
    let issues = config.validate();
    if !issues.is_empty() {
        let details = issues
            .iter()
            .map(|issue| format!("  - {}", issue))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("invalid configuration:\n{}", details);
    }

    if !config.output.color_enabled(cli.no_color) {
        colored::control::set_override(false);
    }

    let format = config.output.resolve_format(cli.output.map(Into::into));

    info!("Starting toolrouter");

    // === Dependency Injection ===
    let use_case = build_use_case(&cli, &config)?;

    if cli.list_tools {
        println!("{}", ConsoleFormatter::format_tools(use_case.executor().tool_spec()));
        return Ok(ExitCode::SUCCESS);
    }

    // Interactive mode
    if cli.interactive {
        let mut repl = ToolRepl::new(Arc::new(use_case))
            .with_format(format)
            .with_progress(config.repl.progress_enabled(cli.quiet))
            .with_history_file(config.repl.history_path());
        repl.run().await?;
        return Ok(ExitCode::SUCCESS);
    }

    // Single request mode - input is required
    let input = match cli.input.as_deref().map(str::trim) {
        Some(input) if !input.is_empty() => input.to_string(),
        _ => bail!("Input is required. Use --interactive for the REPL."),
    };

    if cli.suggest {
        let score = IntentScorer::score(&input);
        println!("{}", ConsoleFormatter::format_scores(&input, &score));
        return Ok(ExitCode::SUCCESS);
    }

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling tool call");
            on_interrupt.cancel();
        }
    });

    let progress: Box<dyn ToolCallProgress> = if cli.quiet {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    let request = ExecuteToolCallInput::new(input).with_override(cli.tool);
    let result = use_case.execute(request, progress.as_ref(), &cancel).await;

    println!("{}", ConsoleFormatter::format(&result, format));

    Ok(if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Initialize logging based on verbosity level; `RUST_LOG` wins when set.
///
/// The returned guard must live until exit so buffered file logs are flushed.
fn init_tracing(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    let Some(path) = &cli.log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| std::path::Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("log file path has no file name: {}", path.display()))?;
    std::fs::create_dir_all(directory)
        .with_context(|| format!("failed to create log directory {}", directory.display()))?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

fn build_use_case(cli: &Cli, config: &FileConfig) -> Result<ExecuteToolCallUseCase> {
    let cookies = Arc::new(CookieStore::new());
    let registry =
        ToolRegistry::with_defaults(config, cookies).context("failed to build HTTP client")?;

    let default_tool = config
        .routing
        .parse_default_tool()
        .map_err(anyhow::Error::msg)?;
    let params = RoutingParams::default()
        .with_default_tool(default_tool)
        .with_extraction_defaults(config.login.to_extraction_defaults());

    let results_path = cli
        .results_log
        .clone()
        .or_else(|| config.logging.results_file.as_ref().map(PathBuf::from));
    let logger: Arc<dyn ToolCallLogger> = match results_path {
        Some(path) => match JsonlToolCallLogger::new(&path) {
            Some(logger) => {
                info!(path = %path.display(), "Recording results");
                Arc::new(logger)
            }
            None => {
                warn!(path = %path.display(), "Could not open results log, continuing without it");
                Arc::new(NoToolCallLogger)
            }
        },
        None => Arc::new(NoToolCallLogger),
    };

    let executor: Arc<dyn ToolExecutorPort> = Arc::new(registry);
    Ok(ExecuteToolCallUseCase::new(executor, params).with_logger(logger))
}
