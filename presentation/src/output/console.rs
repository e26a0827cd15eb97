//! Console output formatter for tool call results

use colored::Colorize;
use toolrouter_domain::{IntentScore, OutputFormat, ToolCallResult, ToolSpec, truncate};

/// Formats results, scores and tool listings for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render a result in the requested format
    pub fn format(result: &ToolCallResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => Self::format_text(result),
            OutputFormat::Full => Self::format_full(result),
            OutputFormat::Json => Self::format_json(result),
        }
    }

    /// Tool output on success, a single error line on failure
    pub fn format_text(result: &ToolCallResult) -> String {
        match (result.output(), result.error()) {
            (Some(output), _) => output.to_string(),
            (None, Some(error)) => format!(
                "{} {}",
                format!("Error [{}]:", error.code()).red().bold(),
                error
            ),
            (None, None) => "No output".dimmed().to_string(),
        }
    }

    /// Output plus routing details and metadata
    pub fn format_full(result: &ToolCallResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!("Tool Call: {}", result.tool.display_name())));
        output.push('\n');

        let status = if result.success {
            "success".green().bold()
        } else {
            "failed".red().bold()
        };
        output.push_str(&format!("{} {}\n", "Tool:".cyan().bold(), result.tool));
        output.push_str(&format!("{} {}\n", "Status:".cyan().bold(), status));
        output.push_str(&format!("{} {}\n", "Input:".cyan().bold(), result.input));
        output.push_str(&format!(
            "{} {}\n",
            "Time:".cyan().bold(),
            result.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        output.push_str(&Self::section_header(if result.success { "Output" } else { "Error" }));
        output.push_str(&Self::format_text(result));
        output.push('\n');

        if !result.metadata.is_empty() {
            output.push_str(&Self::section_header("Metadata"));
            for (key, value) in &result.metadata {
                output.push_str(&format!("  {} {}\n", format!("{}:", key).dimmed(), value));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(result: &ToolCallResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Score table plus the suggestion line
    pub fn format_scores(input: &str, score: &IntentScore) -> String {
        let mut output = format!("{} {}\n", "Input:".cyan().bold(), input);
        let max = score.iter().map(|(_, s)| s).max().unwrap_or(0);
        let suggestion = score.top();

        for (tool, value) in score.iter() {
            let bar = "#".repeat(value.min(40) as usize);
            let line = format!("  {:<14} {:>3} {}", tool.as_str(), value, bar);
            if Some(tool) == suggestion && value == max {
                output.push_str(&format!("{}\n", line.green().bold()));
            } else if value == 0 {
                output.push_str(&format!("{}\n", line.dimmed()));
            } else {
                output.push_str(&format!("{}\n", line));
            }
        }

        match suggestion {
            Some(tool) => output.push_str(&format!("{} {}\n", "Suggested:".cyan().bold(), tool)),
            None => output.push_str(&format!(
                "{} {}\n",
                "Suggested:".cyan().bold(),
                "none (the default tool will be used)".dimmed()
            )),
        }
        output
    }

    /// Registered tools with their parameters
    pub fn format_tools(spec: &ToolSpec) -> String {
        let mut output = Self::section_header("Available tools");
        for definition in spec.all() {
            output.push_str(&format!(
                "\n{} {}\n  {}\n",
                definition.id.as_str().yellow().bold(),
                format!("({})", definition.display_name).dimmed(),
                definition.description
            ));
            for param in &definition.parameters {
                let marker = if param.required { "*" } else { " " };
                output.push_str(&format!(
                    "   {}{:<13} {:<11} {}\n",
                    marker,
                    param.name,
                    param.param_type.dimmed(),
                    param.description
                ));
            }
            if !definition.placeholder_example.is_empty() {
                output.push_str(&format!(
                    "   {} {}\n",
                    "e.g.".dimmed(),
                    definition.placeholder_example
                ));
            }
        }
        output
    }

    /// One line per result, most recent first
    pub fn format_history(results: &[ToolCallResult]) -> String {
        if results.is_empty() {
            return "No calls yet".dimmed().to_string();
        }
        results
            .iter()
            .rev()
            .enumerate()
            .map(|(i, result)| {
                let mark = if result.success { "v".green() } else { "x".red() };
                format!(
                    "{:>3}. {} {:<14} {} {}",
                    i + 1,
                    mark,
                    result.tool.as_str(),
                    result.timestamp.format("%H:%M:%S").to_string().dimmed(),
                    truncate(&result.input, 60)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
