//! Tool Registry
//!
//! The [`ToolRegistry`] owns one [`ToolHandler`] per [`ToolId`] and
//! implements [`ToolExecutorPort`]. Dispatch is a map lookup, so adding a
//! capability means registering one more handler.
//!
//! # Usage
//!
//! ```ignore
//! let cookies = Arc::new(CookieStore::new());
//! let registry = ToolRegistry::with_defaults(&config, cookies)?;
//!
//! assert!(registry.has_tool(ToolId::Weather));
//! let output = registry.execute(&args, &cancel).await?;
//! ```

use super::calculator::CalculatorTool;
use super::cookie_store::CookieStore;
use super::http::build_client;
use super::login::LoginTool;
use super::palette::PaletteTool;
use super::qr::QrTool;
use super::search::{SearchEndpoints, SearchTool};
use super::translator::TranslatorTool;
use super::weather::WeatherTool;
use crate::config::FileConfig;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use toolrouter_application::{ToolExecutorPort, ToolHandler};
use toolrouter_domain::{ToolArguments, ToolError, ToolId, ToolOutput, ToolSpec};
use tracing::debug;

/// Registry of tool handlers keyed by id
pub struct ToolRegistry {
    handlers: BTreeMap<ToolId, Arc<dyn ToolHandler>>,
    /// Definitions of the registered handlers
    tool_spec: ToolSpec,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
            tool_spec: ToolSpec::new(),
        }
    }

    /// Register a handler. A later handler for the same id replaces the
    /// earlier one.
    pub fn register<H: ToolHandler + 'static>(self, handler: H) -> Self {
        self.register_arc(Arc::new(handler))
    }

    /// Register a handler (Arc version)
    pub fn register_arc(mut self, handler: Arc<dyn ToolHandler>) -> Self {
        self.tool_spec = self.tool_spec.register(handler.definition());
        self.handlers.insert(handler.id(), handler);
        self
    }

    /// All seven handlers, sharing one HTTP client built from `[http]`.
    pub fn with_defaults(
        config: &FileConfig,
        cookies: Arc<CookieStore>,
    ) -> Result<Self, reqwest::Error> {
        let client = build_client(&config.http)?;
        Ok(Self::with_client(client, config, cookies))
    }

    /// All seven handlers over a caller-supplied client.
    pub fn with_client(
        client: reqwest::Client,
        config: &FileConfig,
        cookies: Arc<CookieStore>,
    ) -> Self {
        let endpoints = &config.endpoints;
        Self::new()
            .register(WeatherTool::new(client.clone(), &endpoints.weather))
            .register(CalculatorTool::new())
            .register(TranslatorTool::new(client.clone(), &endpoints.translate))
            .register(SearchTool::new(client.clone(), SearchEndpoints::from(endpoints)))
            .register(QrTool::new(config.qr.max_bytes))
            .register(PaletteTool::new(client.clone(), &endpoints.palette))
            .register(LoginTool::new(client, cookies))
    }

    pub fn handler(&self, id: ToolId) -> Option<&Arc<dyn ToolHandler>> {
        self.handlers.get(&id)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolExecutorPort for ToolRegistry {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn execute(
        &self,
        args: &ToolArguments,
        cancel: &CancellationToken,
    ) -> Result<ToolOutput, ToolError> {
        let tool = args.tool();
        let handler = self
            .handlers
            .get(&tool)
            .ok_or_else(|| ToolError::unavailable("tool not registered"))?;

        let start = Instant::now();
        let result = handler.call(args, cancel).await;
        let duration_ms = start.elapsed().as_millis();
        debug!(tool = %tool, duration_ms, ok = result.is_ok(), "Handler finished");

        result.map(|mut output| {
            output
                .metadata
                .entry("duration_ms".to_string())
                .or_insert_with(|| duration_ms.to_string());
            output
        })
    }
}
