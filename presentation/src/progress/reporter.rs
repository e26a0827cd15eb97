//! Progress reporting for tool call execution

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use toolrouter_application::ToolCallProgress;
use toolrouter_domain::{IntentScore, ToolCallResult, ToolId};

/// Reports progress with a spinner while a tool runs
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn slot(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.spinner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolCallProgress for ProgressReporter {
    fn on_tool_selected(&self, tool: ToolId, score: Option<&IntentScore>) {
        let detail = match score {
            Some(score) => format!("score {}", score.get(tool)),
            None => "override".to_string(),
        };
        eprintln!("{} {} ({})", "->".cyan(), tool.display_name().bold(), detail.dimmed());
    }

    fn on_call_started(&self, tool: ToolId, summary: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(tool.as_str().to_string());
        pb.set_message(summary.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        *self.slot() = Some(pb);
    }

    fn on_call_finished(&self, result: &ToolCallResult) {
        if let Some(pb) = self.slot().take() {
            if result.success {
                pb.finish_and_clear();
            } else {
                pb.abandon_with_message(format!("{}", "failed".red()));
            }
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ToolCallProgress for SimpleProgress {
    fn on_tool_selected(&self, tool: ToolId, score: Option<&IntentScore>) {
        match score {
            Some(score) => eprintln!("{} {} (score {})", "->".cyan(), tool, score.get(tool)),
            None => eprintln!("{} {} (override)", "->".cyan(), tool),
        }
    }

    fn on_call_started(&self, tool: ToolId, summary: &str) {
        eprintln!("  {} {} {}", "..".dimmed(), tool, summary.dimmed());
    }

    fn on_call_finished(&self, result: &ToolCallResult) {
        if result.success {
            eprintln!("  {} {}", "v".green(), result.tool);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), result.tool);
        }
    }
}
