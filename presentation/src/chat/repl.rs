//! REPL (Read-Eval-Print Loop) for interactive tool routing

use crate::ConsoleFormatter;
use crate::progress::reporter::ProgressReporter;
use colored::Colorize;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use toolrouter_application::{
    ExecuteToolCallInput, ExecuteToolCallUseCase, NoProgress, ToolCallProgress,
};
use toolrouter_domain::{IntentScorer, OutputFormat, ToolCallResult, ToolId};

const HISTORY_CAPACITY: usize = 1000;

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Route and run this text
    Run(String),
    /// Pin a tool for subsequent inputs
    Pin(ToolId),
    /// Clear the pinned tool
    Auto,
    /// Show scores for this text
    Score(String),
    Tools,
    History,
    Help,
    Quit,
    /// Empty line
    Nothing,
    /// Unrecognized or malformed command, with a message for the user
    Invalid(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return ReplCommand::Nothing;
        }
        if !line.starts_with('/') {
            return ReplCommand::Run(line.to_string());
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/auto" => ReplCommand::Auto,
            "/tools" => ReplCommand::Tools,
            "/history" => ReplCommand::History,
            "/tool" if rest.is_empty() => ReplCommand::Invalid("Usage: /tool <id>".to_string()),
            "/tool" => match rest.parse::<ToolId>() {
                Ok(tool) => ReplCommand::Pin(tool),
                Err(e) => ReplCommand::Invalid(e),
            },
            "/score" if rest.is_empty() => ReplCommand::Invalid("Usage: /score <text>".to_string()),
            "/score" => ReplCommand::Score(rest.to_string()),
            other => ReplCommand::Invalid(format!(
                "Unknown command: {}\nType /help for available commands",
                other
            )),
        }
    }
}

/// Interactive tool-routing REPL
pub struct ToolRepl {
    use_case: Arc<ExecuteToolCallUseCase>,
    format: OutputFormat,
    show_progress: bool,
    history_file: Option<PathBuf>,
    /// Tool pinned with `/tool`
    pinned: Option<ToolId>,
    /// Results of this session, oldest first
    session: Vec<ToolCallResult>,
}

impl ToolRepl {
    pub fn new(use_case: Arc<ExecuteToolCallUseCase>) -> Self {
        Self {
            use_case,
            format: OutputFormat::Text,
            show_progress: true,
            history_file: None,
            pinned: None,
            session: Vec::new(),
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Line-editor history location; defaults to the data directory
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        self.history_file = path;
        self
    }

    pub fn pinned(&self) -> Option<ToolId> {
        self.pinned
    }

    pub fn session(&self) -> &[ToolCallResult] {
        &self.session
    }

    fn history_path(&self) -> Option<PathBuf> {
        self.history_file
            .clone()
            .or_else(|| dirs::data_dir().map(|p| p.join("toolrouter").join("history.txt")))
    }

    fn line_editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = self.history_path() else {
            return editor;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(_) => editor,
        }
    }

    fn prompt(&self) -> DefaultPrompt {
        let mode = self.pinned.map_or("auto", |tool| tool.as_str());
        DefaultPrompt::new(
            DefaultPromptSegment::Basic(format!("toolrouter [{}]", mode)),
            DefaultPromptSegment::Empty,
        )
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut editor = self.line_editor();
        self.print_welcome();

        loop {
            match editor.read_line(&self.prompt())? {
                Signal::Success(line) => {
                    if self.handle_line(&line).await {
                        break;
                    }
                }
                Signal::CtrlC => {
                    println!("^C");
                    continue;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
                #[allow(unreachable_patterns)]
                _ => continue,
            }
        }
        Ok(())
    }

    /// Handle one line. Returns true if the REPL should exit.
    pub async fn handle_line(&mut self, line: &str) -> bool {
        match ReplCommand::parse(line) {
            ReplCommand::Nothing => {}
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => self.print_help(),
            ReplCommand::Pin(tool) => {
                self.pinned = Some(tool);
                println!("Pinned tool: {}", tool.to_string().yellow());
            }
            ReplCommand::Auto => {
                self.pinned = None;
                println!("Routing by intent score");
            }
            ReplCommand::Score(text) => {
                println!("{}", ConsoleFormatter::format_scores(&text, &IntentScorer::score(&text)));
            }
            ReplCommand::Tools => {
                println!("{}", ConsoleFormatter::format_tools(self.use_case.executor().tool_spec()));
            }
            ReplCommand::History => println!("{}", ConsoleFormatter::format_history(&self.session)),
            ReplCommand::Invalid(message) => println!("{}", message),
            ReplCommand::Run(text) => {
                let result = self.run_request(&text).await;
                println!("{}\n", ConsoleFormatter::format(&result, self.format));
                self.session.push(result);
            }
        }
        false
    }

    async fn run_request(&self, text: &str) -> ToolCallResult {
        let input = ExecuteToolCallInput::new(text).with_override(self.pinned);
        let reporter;
        let progress: &dyn ToolCallProgress = if self.show_progress {
            reporter = ProgressReporter::new();
            &reporter
        } else {
            &NoProgress
        };

        let cancel = CancellationToken::new();
        let call = self.use_case.execute(input, progress, &cancel);
        tokio::pin!(call);
        tokio::select! {
            result = &mut call => return result,
            _ = tokio::signal::ctrl_c() => cancel.cancel(),
        }
        // Cancelled; let the call unwind into a Cancelled result
        call.await
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│          toolrouter - Interactive           │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!(
            "Tools: {}",
            self.use_case
                .executor()
                .available_tools()
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!();
        self.print_help();
    }

    fn print_help(&self) {
        println!("Commands:");
        println!("  /tool <id>    - Pin a tool for the next inputs");
        println!("  /auto         - Route by intent score again");
        println!("  /score <text> - Show intent scores for text");
        println!("  /tools        - List available tools");
        println!("  /history      - Show this session's calls, newest first");
        println!("  /help         - Show this help");
        println!("  /quit         - Exit");
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use toolrouter_application::{RoutingParams, ToolExecutorPort};
    use toolrouter_domain::{
        ToolArguments, ToolDefinition, ToolError, ToolOutput, ToolParameter, ToolSpec,
    };

    struct EchoExecutor {
        spec: ToolSpec,
    }

    impl EchoExecutor {
        fn new() -> Self {
            Self {
                spec: ToolSpec::new()
                    .register(
                        ToolDefinition::new(ToolId::Calculator, "calc")
                            .with_parameter(ToolParameter::new("expression", "expr", true)),
                    )
                    .register(
                        ToolDefinition::new(ToolId::Search, "search")
                            .with_parameter(ToolParameter::new("query", "query", true)),
                    ),
            }
        }
    }

    #[async_trait]
    impl ToolExecutorPort for EchoExecutor {
        fn tool_spec(&self) -> &ToolSpec {
            &self.spec
        }

        async fn execute(
            &self,
            args: &ToolArguments,
            _cancel: &CancellationToken,
        ) -> Result<ToolOutput, ToolError> {
            Ok(ToolOutput::new(format!("{} {}", args.tool(), args.summary())))
        }
    }

    fn repl() -> ToolRepl {
        let use_case = ExecuteToolCallUseCase::new(Arc::new(EchoExecutor::new()), RoutingParams::default());
        ToolRepl::new(Arc::new(use_case)).with_progress(false)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(ReplCommand::parse("  "), ReplCommand::Nothing);
        assert_eq!(ReplCommand::parse("/quit"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("/tool weather"), ReplCommand::Pin(ToolId::Weather));
        assert_eq!(ReplCommand::parse("/auto"), ReplCommand::Auto);
        assert_eq!(
            ReplCommand::parse("/score 15% of 200"),
            ReplCommand::Score("15% of 200".to_string())
        );
        assert_eq!(
            ReplCommand::parse("Calculate 1 + 1"),
            ReplCommand::Run("Calculate 1 + 1".to_string())
        );
    }

    #[test]
    fn test_parse_malformed_commands() {
        assert!(matches!(ReplCommand::parse("/tool"), ReplCommand::Invalid(_)));
        assert!(matches!(ReplCommand::parse("/tool teleport"), ReplCommand::Invalid(_)));
        assert!(matches!(ReplCommand::parse("/score"), ReplCommand::Invalid(_)));
        assert!(matches!(ReplCommand::parse("/frobnicate"), ReplCommand::Invalid(_)));
    }

    #[tokio::test]
    async fn test_session_results_are_appended() {
        let mut repl = repl();
        assert!(!repl.handle_line("Calculate 25 * 4 + 10").await);
        assert!(!repl.handle_line("search for tokio").await);

        let session = repl.session();
        assert_eq!(session.len(), 2);
        assert_eq!(session[0].tool, ToolId::Calculator);
        assert_eq!(session[1].tool, ToolId::Search);
        assert!(session.iter().all(|r| r.success));
    }

    #[tokio::test]
    async fn test_pin_and_auto() {
        let mut repl = repl();
        repl.handle_line("/tool search").await;
        assert_eq!(repl.pinned(), Some(ToolId::Search));

        repl.handle_line("Calculate 1 + 1").await;
        assert_eq!(repl.session()[0].tool, ToolId::Search);

        repl.handle_line("/auto").await;
        assert_eq!(repl.pinned(), None);
        repl.handle_line("Calculate 1 + 1").await;
        assert_eq!(repl.session()[1].tool, ToolId::Calculator);
    }

    #[tokio::test]
    async fn test_commands_do_not_record_results() {
        let mut repl = repl();
        repl.handle_line("/tools").await;
        repl.handle_line("/score weather").await;
        repl.handle_line("/history").await;
        assert!(repl.session().is_empty());
        assert!(repl.handle_line("/quit").await);
    }
}
