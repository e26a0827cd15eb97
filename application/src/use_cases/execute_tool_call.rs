//! Execute Tool Call use case.
//!
//! The single inbound entry point: raw text (plus an optional explicit tool)
//! in, exactly one [`ToolCallResult`] out.
//!
//! ```text
//! raw input ─┬─ override? ──────────────────────┐
//!            └─ IntentScorer ─ top / default ───┤
//!                                               ▼
//!                  extract ─▶ validate ─▶ ToolExecutorPort::execute
//!                     │           │                 │
//!                     └───────────┴──── failure ────┴──▶ ToolCallResult
//! ```
//!
//! Nothing in here returns `Err`: every failure, whatever the stage, is
//! folded into a `success == false` envelope.

use crate::config::RoutingParams;
use crate::ports::progress::ToolCallProgress;
use crate::ports::tool_call_logger::{NoToolCallLogger, ToolCallLogger};
use crate::ports::tool_executor::ToolExecutorPort;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use toolrouter_domain::{
    ArgumentValidator, DefaultArgumentValidator, IntentScore, IntentScorer, ToolArguments,
    ToolCallResult, ToolError, ToolId, truncate,
};
use tracing::{debug, info, warn};

/// Input for the [`ExecuteToolCallUseCase`].
#[derive(Debug, Clone)]
pub struct ExecuteToolCallInput {
    /// Raw user text; never modified.
    pub raw: String,
    /// Skip scoring and use this tool.
    pub tool_override: Option<ToolId>,
}

impl ExecuteToolCallInput {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            tool_override: None,
        }
    }

    pub fn with_override(mut self, tool: Option<ToolId>) -> Self {
        self.tool_override = tool;
        self
    }
}

/// How the tool was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteSource {
    Override,
    Scored,
    Default,
}

impl RouteSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteSource::Override => "override",
            RouteSource::Scored => "scored",
            RouteSource::Default => "default",
        }
    }
}

/// The routing decision for one input.
#[derive(Debug, Clone)]
pub struct RouteDecision {
    pub tool: ToolId,
    pub source: RouteSource,
    /// Present unless an override skipped scoring
    pub score: Option<IntentScore>,
}

/// Use case for running one orchestrated tool call.
///
/// 1. Select a tool (override, else top score, else configured default)
/// 2. Extract typed arguments from the raw input
/// 3. Validate them against the tool's schema
/// 4. Invoke the tool through [`ToolExecutorPort`]
/// 5. Wrap the outcome in a [`ToolCallResult`] and hand it to the logger
pub struct ExecuteToolCallUseCase {
    executor: Arc<dyn ToolExecutorPort>,
    validator: Arc<dyn ArgumentValidator + Send + Sync>,
    logger: Arc<dyn ToolCallLogger>,
    params: RoutingParams,
}

impl Clone for ExecuteToolCallUseCase {
    fn clone(&self) -> Self {
        Self {
            executor: self.executor.clone(),
            validator: self.validator.clone(),
            logger: self.logger.clone(),
            params: self.params.clone(),
        }
    }
}

impl ExecuteToolCallUseCase {
    pub fn new(executor: Arc<dyn ToolExecutorPort>, params: RoutingParams) -> Self {
        Self {
            executor,
            validator: Arc::new(DefaultArgumentValidator),
            logger: Arc::new(NoToolCallLogger),
            params,
        }
    }

    /// Create with a result logger.
    pub fn with_logger(mut self, logger: Arc<dyn ToolCallLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Replace the argument validator.
    pub fn with_validator(mut self, validator: Arc<dyn ArgumentValidator + Send + Sync>) -> Self {
        self.validator = validator;
        self
    }

    pub fn executor(&self) -> &Arc<dyn ToolExecutorPort> {
        &self.executor
    }

    pub fn params(&self) -> &RoutingParams {
        &self.params
    }

    /// Decide which tool handles `raw`. Pure; no I/O.
    pub fn route(&self, raw: &str, tool_override: Option<ToolId>) -> RouteDecision {
        if let Some(tool) = tool_override {
            return RouteDecision {
                tool,
                source: RouteSource::Override,
                score: None,
            };
        }

        let score = IntentScorer::score(raw);
        let (tool, source) = match score.top() {
            Some(tool) => (tool, RouteSource::Scored),
            None => (self.params.default_tool, RouteSource::Default),
        };
        RouteDecision {
            tool,
            source,
            score: Some(score),
        }
    }

    /// Run one orchestrated call.
    pub async fn execute(
        &self,
        input: ExecuteToolCallInput,
        progress: &dyn ToolCallProgress,
        cancel: &CancellationToken,
    ) -> ToolCallResult {
        let decision = self.route(&input.raw, input.tool_override);
        let tool = decision.tool;

        info!(
            tool = %tool,
            route = decision.source.as_str(),
            "Routing input: {}",
            truncate(&input.raw, 80)
        );
        if let Some(score) = &decision.score {
            debug!(?score, "Intent scores");
        }
        progress.on_tool_selected(tool, decision.score.as_ref());

        let mut metadata = BTreeMap::new();
        metadata.insert("route".to_string(), decision.source.as_str().to_string());
        if let Some(score) = &decision.score {
            metadata.insert("score".to_string(), score.get(tool).to_string());
        }

        let result = match self.prepare(tool, &input.raw, cancel) {
            Ok(args) => {
                metadata.insert("extracted".to_string(), args.summary());
                self.invoke(tool, &input.raw, &args, progress, cancel).await
            }
            Err((stage, error)) => {
                debug!(tool = %tool, stage, "Call rejected before invocation: {}", error);
                ToolCallResult::failure(tool, input.raw.clone(), error).with_entry("stage", stage)
            }
        };
        let result = result.with_metadata(metadata);

        if result.is_success() {
            info!(tool = %tool, id = %result.id, "Tool call succeeded");
        } else if let Some(error) = result.error() {
            warn!(tool = %tool, code = error.code(), "Tool call failed: {}", error);
        }

        self.logger.log(&result);
        progress.on_call_finished(&result);
        result
    }

    /// Everything before the handler runs: availability, extraction,
    /// validation. Errors carry the stage they came from.
    fn prepare(
        &self,
        tool: ToolId,
        raw: &str,
        cancel: &CancellationToken,
    ) -> Result<ToolArguments, (&'static str, ToolError)> {
        if cancel.is_cancelled() {
            return Err(("selection", ToolError::Cancelled));
        }

        let Some(definition) = self.executor.get_tool(tool) else {
            return Err(("dispatch", ToolError::unavailable("tool not registered")));
        };

        let args = ToolArguments::extract(tool, raw, &self.params.extraction)
            .map_err(|e| ("extraction", e))?;

        self.validator
            .validate(&args, definition)
            .map_err(|e| ("validation", e))?;

        Ok(args)
    }

    async fn invoke(
        &self,
        tool: ToolId,
        raw: &str,
        args: &ToolArguments,
        progress: &dyn ToolCallProgress,
        cancel: &CancellationToken,
    ) -> ToolCallResult {
        if cancel.is_cancelled() {
            return ToolCallResult::failure(tool, raw, ToolError::Cancelled)
                .with_entry("stage", "invocation");
        }

        let summary = args.summary();
        debug!(tool = %tool, "Invoking with {}", summary);
        progress.on_call_started(tool, &summary);

        match self.executor.execute(args, cancel).await {
            Ok(output) => {
                let result = ToolCallResult::success(tool, raw, output);
                if result.is_success() {
                    result
                } else {
                    result.with_entry("stage", "invocation")
                }
            }
            Err(error) => ToolCallResult::failure(tool, raw, error).with_entry("stage", "invocation"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::progress::NoProgress;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use toolrouter_domain::{
        ExtractionDefaults, ToolDefinition, ToolOutput, ToolParameter, ToolSpec, evaluate_natural,
        format_number,
    };

    // ==================== Mock Executor ====================

    fn definition_for(tool: ToolId) -> ToolDefinition {
        let params: &[(&str, bool)] = match tool {
            ToolId::Weather => &[("city", true)],
            ToolId::Calculator => &[("expression", true)],
            ToolId::Translator => &[("text", true), ("source", false), ("target", true)],
            ToolId::Search => &[("query", true)],
            ToolId::QrGenerator => &[("text", true)],
            ToolId::ColorPalette => &[("model", false)],
            ToolId::Login => &[
                ("username", true),
                ("password", true),
                ("domain", false),
                ("site_address", true),
                ("auth_type", false),
            ],
        };
        params.iter().fold(
            ToolDefinition::new(tool, format!("{} (mock)", tool.display_name())),
            |def, (name, required)| def.with_parameter(ToolParameter::new(*name, *name, *required)),
        )
    }

    /// Answers like the real tools would, without any network.
    struct MockToolExecutor {
        spec: ToolSpec,
        calls: Mutex<Vec<ToolArguments>>,
        failure: Option<ToolError>,
        empty_output: bool,
    }

    impl MockToolExecutor {
        fn new() -> Self {
            Self::with_tools(&ToolId::ALL)
        }

        fn with_tools(tools: &[ToolId]) -> Self {
            let spec = tools
                .iter()
                .fold(ToolSpec::new(), |spec, id| spec.register(definition_for(*id)));
            Self {
                spec,
                calls: Mutex::new(Vec::new()),
                failure: None,
                empty_output: false,
            }
        }

        fn failing_with(mut self, error: ToolError) -> Self {
            self.failure = Some(error);
            self
        }

        fn returning_empty(mut self) -> Self {
            self.empty_output = true;
            self
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn last_call(&self) -> Option<ToolArguments> {
            self.calls.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl ToolExecutorPort for MockToolExecutor {
        fn tool_spec(&self) -> &ToolSpec {
            &self.spec
        }

        async fn execute(
            &self,
            args: &ToolArguments,
            _cancel: &CancellationToken,
        ) -> Result<ToolOutput, ToolError> {
            self.calls.lock().unwrap().push(args.clone());
            if let Some(error) = &self.failure {
                return Err(error.clone());
            }
            if self.empty_output {
                return Ok(ToolOutput::new("").with_metadata("source", "mock"));
            }
            let text = match args {
                ToolArguments::Weather { city } => format!("Weather for {city}: 21°C"),
                ToolArguments::Calculator { expression } => {
                    let (_, value) = evaluate_natural(expression)?;
                    format!("The result of '{}' is {}", expression, format_number(value))
                }
                other => format!("mock output for {}", other.tool()),
            };
            Ok(ToolOutput::new(text).with_metadata("source", "mock"))
        }
    }

    // ==================== Mock Logger ====================

    #[derive(Default)]
    struct RecordingLogger {
        results: Mutex<Vec<ToolCallResult>>,
    }

    impl ToolCallLogger for RecordingLogger {
        fn log(&self, result: &ToolCallResult) {
            self.results.lock().unwrap().push(result.clone());
        }
    }

    fn use_case(executor: Arc<MockToolExecutor>) -> ExecuteToolCallUseCase {
        let params = RoutingParams::default().with_extraction_defaults(ExtractionDefaults {
            login_site: Some("https://portal.example.com".to_string()),
            ..Default::default()
        });
        ExecuteToolCallUseCase::new(executor, params)
    }

    async fn run(uc: &ExecuteToolCallUseCase, raw: &str, tool: Option<ToolId>) -> ToolCallResult {
        uc.execute(
            ExecuteToolCallInput::new(raw).with_override(tool),
            &NoProgress,
            &CancellationToken::new(),
        )
        .await
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_weather_scenario() {
        let executor = Arc::new(MockToolExecutor::new());
        let uc = use_case(executor.clone());

        let result = run(&uc, "What's the weather in Beijing?", None).await;

        assert_eq!(result.tool, ToolId::Weather);
        assert!(result.success);
        assert_eq!(result.input, "What's the weather in Beijing?");
        assert_eq!(
            executor.last_call(),
            Some(ToolArguments::Weather {
                city: "Beijing".to_string()
            })
        );
        assert_eq!(result.metadata.get("route").map(String::as_str), Some("scored"));
        assert_eq!(result.metadata.get("source").map(String::as_str), Some("mock"));
    }

    #[tokio::test]
    async fn test_calculator_scenario() {
        let executor = Arc::new(MockToolExecutor::new());
        let uc = use_case(executor);

        let result = run(&uc, "Calculate 25 * 4 + 10", None).await;

        assert_eq!(result.tool, ToolId::Calculator);
        assert!(result.success);
        assert!(result.output().unwrap().ends_with("is 110"));
    }

    #[tokio::test]
    async fn test_override_skips_scoring() {
        let executor = Arc::new(MockToolExecutor::new());
        let uc = use_case(executor.clone());

        let result = run(&uc, "What's the weather in Beijing?", Some(ToolId::Search)).await;

        assert_eq!(result.tool, ToolId::Search);
        assert_eq!(result.metadata.get("route").map(String::as_str), Some("override"));
        assert!(!result.metadata.contains_key("score"));
        assert!(matches!(executor.last_call(), Some(ToolArguments::Search { .. })));
    }

    #[tokio::test]
    async fn test_falls_back_to_default_tool() {
        let executor = Arc::new(MockToolExecutor::new());
        let uc = use_case(executor);

        let decision = uc.route("hello there", None);
        assert_eq!(decision.tool, ToolId::Search);
        assert_eq!(decision.source, RouteSource::Default);

        let result = run(&uc, "hello there", None).await;
        assert_eq!(result.tool, ToolId::Search);
        assert_eq!(result.metadata.get("route").map(String::as_str), Some("default"));
    }

    #[tokio::test]
    async fn test_extraction_failure_skips_invocation() {
        let executor = Arc::new(MockToolExecutor::new());
        let uc = use_case(executor.clone());

        let result = run(&uc, "   ", Some(ToolId::Weather)).await;

        assert!(!result.success);
        assert!(result.output.is_none());
        assert!(matches!(result.error(), Some(ToolError::ArgumentExtraction(_))));
        assert_eq!(result.metadata.get("stage").map(String::as_str), Some("extraction"));
        assert_eq!(executor.call_count(), 0);
    }

    #[tokio::test]
    async fn test_login_without_credentials_is_invalid_expression() {
        let executor = Arc::new(MockToolExecutor::new());
        let uc = use_case(executor.clone());

        let result = run(&uc, "please log me in", Some(ToolId::Login)).await;

        assert!(matches!(result.error(), Some(ToolError::InvalidExpression(_))));
        assert_eq!(executor.call_count(), 0);
    }

    #[tokio::test]
    async fn test_login_extracted_metadata_masks_password() {
        let executor = Arc::new(MockToolExecutor::new());
        let uc = use_case(executor);

        let result = run(&uc, "user and pwd is superadmin,0115", None).await;

        assert_eq!(result.tool, ToolId::Login);
        let extracted = result.metadata.get("extracted").unwrap();
        assert!(extracted.contains("username=superadmin"));
        assert!(!extracted.contains("0115"));
    }

    #[tokio::test]
    async fn test_unregistered_tool_is_service_unavailable() {
        let executor = Arc::new(MockToolExecutor::with_tools(&[ToolId::Weather]));
        let uc = use_case(executor);

        let result = run(&uc, "Generate QR code for https://apple.com", None).await;

        assert_eq!(result.tool, ToolId::QrGenerator);
        assert_eq!(
            result.error(),
            Some(&ToolError::unavailable("tool not registered"))
        );
        assert_eq!(result.metadata.get("stage").map(String::as_str), Some("dispatch"));
    }

    #[tokio::test]
    async fn test_handler_error_becomes_failed_result() {
        let executor = Arc::new(
            MockToolExecutor::new().failing_with(ToolError::network("connection refused")),
        );
        let uc = use_case(executor);

        let result = run(&uc, "What's the weather in Beijing?", None).await;

        assert!(!result.success);
        assert!(result.output.is_none());
        assert_eq!(result.error().map(|e| e.code()), Some("NETWORK_ERROR"));
        assert_eq!(result.metadata.get("stage").map(String::as_str), Some("invocation"));
        assert_eq!(result.metadata.get("extracted").map(String::as_str), Some("city=Beijing"));
    }

    #[tokio::test]
    async fn test_division_by_zero_is_reported() {
        let executor = Arc::new(MockToolExecutor::new());
        let uc = use_case(executor);

        let result = run(&uc, "10 divided by 0", None).await;

        assert_eq!(result.tool, ToolId::Calculator);
        assert!(matches!(result.error(), Some(ToolError::InvalidExpression(_))));
    }

    #[tokio::test]
    async fn test_empty_output_is_not_success() {
        let executor = Arc::new(MockToolExecutor::new().returning_empty());
        let uc = use_case(executor);

        let result = run(&uc, "give me a color palette", None).await;

        assert!(!result.success);
        assert!(matches!(result.error(), Some(ToolError::ServiceUnavailable(_))));
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let executor = Arc::new(MockToolExecutor::new());
        let uc = use_case(executor.clone());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = uc
            .execute(
                ExecuteToolCallInput::new("What's the weather in Beijing?"),
                &NoProgress,
                &cancel,
            )
            .await;

        assert_eq!(result.error(), Some(&ToolError::Cancelled));
        assert_eq!(executor.call_count(), 0);
    }

    #[tokio::test]
    async fn test_every_result_is_logged() {
        let executor = Arc::new(MockToolExecutor::new());
        let logger = Arc::new(RecordingLogger::default());
        let uc = use_case(executor).with_logger(logger.clone());

        let ok = run(&uc, "Calculate 2 + 2", None).await;
        let failed = run(&uc, "   ", Some(ToolId::Weather)).await;

        let logged = logger.results.lock().unwrap();
        assert_eq!(logged.len(), 2);
        assert_eq!(logged[0].id, ok.id);
        assert_eq!(logged[1].id, failed.id);
    }

    #[tokio::test]
    async fn test_envelope_invariant_holds_for_all_outcomes() {
        let inputs = [
            "What's the weather in Beijing?",
            "Calculate 25 * 4 + 10",
            "10 divided by 0",
            "translate 你好 to English",
            "Generate QR code for https://apple.com",
            "user and pwd is superadmin,0115",
            "login please",
            "hello there",
            "",
        ];
        let executors = [
            Arc::new(MockToolExecutor::new()),
            Arc::new(MockToolExecutor::new().failing_with(ToolError::unavailable("502"))),
            Arc::new(MockToolExecutor::new().returning_empty()),
        ];

        for executor in executors {
            let uc = use_case(executor);
            for input in inputs {
                let result = run(&uc, input, None).await;
                if result.success {
                    assert!(!result.output().unwrap_or("").is_empty(), "{input}");
                    assert!(result.error.is_none());
                } else {
                    assert!(result.output.is_none(), "{input}");
                    assert!(result.error_message().is_some(), "{input}");
                }
            }
        }
    }
}
