//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use toolrouter_domain::ToolId;

/// Output format for tool call results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tool output only (errors as a single line)
    Text,
    /// Output plus routing details and metadata
    Full,
    /// The result envelope as JSON
    Json,
}

impl From<OutputFormat> for toolrouter_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => toolrouter_domain::OutputFormat::Text,
            OutputFormat::Full => toolrouter_domain::OutputFormat::Full,
            OutputFormat::Json => toolrouter_domain::OutputFormat::Json,
        }
    }
}

fn parse_tool_id(value: &str) -> Result<ToolId, String> {
    value.parse()
}

/// CLI arguments for toolrouter
#[derive(Parser, Debug)]
#[command(name = "toolrouter")]
#[command(author, version, about = "Route natural-language requests to the right tool")]
#[command(long_about = r#"
toolrouter scores free-form input against a set of tools, extracts the
arguments the chosen tool needs and runs it.

Tools: weather, calculator, translator, search, qr_generator,
color_palette, login.

Configuration files are loaded from (in priority order):
1. --config <path>        Explicit config file
2. ./toolrouter.toml      Project-level config
3. ~/.config/toolrouter/config.toml   Global config
4. TOOLROUTER_<SECTION>__<KEY> environment variables

Example:
  toolrouter "What's the weather in Beijing?"
  toolrouter --tool calculator "15% of 200"
  toolrouter --suggest "translate 你好 to English"
  toolrouter --interactive
"#)]
pub struct Cli {
    /// The request to route (not required in interactive mode)
    pub input: Option<String>,

    /// Skip scoring and use this tool
    #[arg(short, long, value_name = "TOOL", value_parser = parse_tool_id)]
    pub tool: Option<ToolId>,

    /// Print intent scores and the suggested tool without running it
    #[arg(long)]
    pub suggest: bool,

    /// List the registered tools and their parameters
    #[arg(long)]
    pub list_tools: bool,

    /// Start the interactive REPL
    #[arg(short, long)]
    pub interactive: bool,

    /// Output format (default: text, or `[output] format` from config)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write diagnostic logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Append every result as a JSON line to this file
    #[arg(long, value_name = "PATH")]
    pub results_log: Option<PathBuf>,
}
