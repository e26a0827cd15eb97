//! search tool: encyclopedia, repository and echo lookups in parallel
//!
//! The three lookups run concurrently. Sections are reported in a fixed
//! order whatever finishes first, and the call succeeds when at least one
//! lookup produced something.

use super::http::{fetch_json, parse_endpoint, url_with_segment};
use crate::config::FileEndpointsConfig;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use tokio_util::sync::CancellationToken;
use toolrouter_application::ToolHandler;
use toolrouter_domain::{
    ToolArguments, ToolDefinition, ToolError, ToolId, ToolOutput, ToolParameter, single_line, truncate,
};
use tracing::debug;

const REPOSITORY_RESULTS: &str = "3";
const SNIPPET_LEN: usize = 600;

pub fn search_definition() -> ToolDefinition {
    ToolDefinition::new(
        ToolId::Search,
        "Look a topic up in an encyclopedia and a code repository index",
    )
    .with_parameter(ToolParameter::new("query", "What to search for", true))
    .with_placeholder("Search for Rust programming")
}

#[derive(Debug, Deserialize)]
struct EncyclopediaSummary {
    #[serde(default)]
    title: String,
    #[serde(default)]
    extract: String,
    #[serde(default)]
    content_urls: Option<ContentUrls>,
}

#[derive(Debug, Deserialize)]
struct ContentUrls {
    desktop: Option<PageUrl>,
}

#[derive(Debug, Deserialize)]
struct PageUrl {
    page: String,
}

#[derive(Debug, Deserialize)]
struct RepositoryResults {
    #[serde(default)]
    items: Vec<Repository>,
}

#[derive(Debug, Deserialize)]
struct Repository {
    full_name: String,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    html_url: String,
}

#[derive(Debug, Deserialize)]
struct EchoResponse {
    #[serde(default)]
    origin: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    args: BTreeMap<String, serde_json::Value>,
}

/// Endpoints the search fans out to
#[derive(Debug, Clone)]
pub struct SearchEndpoints {
    pub encyclopedia: String,
    pub repository_search: String,
    pub echo: String,
}

impl From<&FileEndpointsConfig> for SearchEndpoints {
    fn from(config: &FileEndpointsConfig) -> Self {
        Self {
            encyclopedia: config.encyclopedia.clone(),
            repository_search: config.repository_search.clone(),
            echo: config.echo.clone(),
        }
    }
}

pub struct SearchTool {
    client: reqwest::Client,
    endpoints: SearchEndpoints,
}

impl SearchTool {
    pub fn new(client: reqwest::Client, endpoints: SearchEndpoints) -> Self {
        Self { client, endpoints }
    }

    async fn encyclopedia(&self, query: &str, cancel: &CancellationToken) -> Result<String, ToolError> {
        let slug = query.split_whitespace().collect::<Vec<_>>().join("_");
        let url = url_with_segment(&self.endpoints.encyclopedia, &slug)?;
        let summary: EncyclopediaSummary =
            fetch_json(self.client.get(url), cancel, "encyclopedia").await?;

        let extract = single_line(&summary.extract);
        if extract.is_empty() {
            return Err(ToolError::unavailable(format!("no encyclopedia entry for '{}'", query)));
        }
        let title = if summary.title.is_empty() { query } else { summary.title.as_str() };

        let mut section = format!("[Encyclopedia] {}\n{}", title, truncate(&extract, SNIPPET_LEN));
        if let Some(page) = summary.content_urls.and_then(|u| u.desktop) {
            section.push('\n');
            section.push_str(&page.page);
        }
        Ok(section)
    }

    async fn repositories(&self, query: &str, cancel: &CancellationToken) -> Result<String, ToolError> {
        let request = self
            .client
            .get(parse_endpoint(&self.endpoints.repository_search)?)
            .header("Accept", "application/vnd.github+json")
            .query(&[
                ("q", query),
                ("sort", "stars"),
                ("order", "desc"),
                ("per_page", REPOSITORY_RESULTS),
            ]);
        let results: RepositoryResults = fetch_json(request, cancel, "repository search").await?;
        if results.items.is_empty() {
            return Err(ToolError::unavailable(format!("no repositories match '{}'", query)));
        }

        let mut lines = vec!["[Repositories]".to_string()];
        for (i, repo) in results.items.iter().enumerate() {
            lines.push(format!("{}. {} ({} stars)", i + 1, repo.full_name, repo.stargazers_count));
            if let Some(description) = repo.description.as_deref().filter(|d| !d.trim().is_empty()) {
                lines.push(format!("   {}", single_line(description)));
            }
            if !repo.html_url.is_empty() {
                lines.push(format!("   {}", repo.html_url));
            }
        }
        Ok(lines.join("\n"))
    }

    async fn echo(&self, query: &str, cancel: &CancellationToken) -> Result<String, ToolError> {
        let request = self
            .client
            .get(parse_endpoint(&self.endpoints.echo)?)
            .query(&[("q", query)]);
        let echo: EchoResponse = fetch_json(request, cancel, "echo service").await?;

        let args = echo
            .args
            .iter()
            .map(|(key, value)| match value {
                serde_json::Value::String(s) => format!("{}={}", key, s),
                other => format!("{}={}", key, other),
            })
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!(
            "[Request echo]\norigin: {}\nurl: {}\nargs: {}",
            echo.origin, echo.url, args
        ))
    }
}

#[async_trait]
impl ToolHandler for SearchTool {
    fn id(&self) -> ToolId {
        ToolId::Search
    }

    fn definition(&self) -> ToolDefinition {
        search_definition()
    }

    async fn call(
        &self,
        args: &ToolArguments,
        cancel: &CancellationToken,
    ) -> Result<ToolOutput, ToolError> {
        let ToolArguments::Search { query } = args else {
            return Err(ToolError::argument("search expects a query"));
        };

        let (encyclopedia, repositories, echo) = tokio::join!(
            self.encyclopedia(query, cancel),
            self.repositories(query, cancel),
            self.echo(query, cancel),
        );
        let lookups = [
            ("encyclopedia", encyclopedia),
            ("repositories", repositories),
            ("echo", echo),
        ];

        if lookups.iter().any(|(_, r)| matches!(r, Err(ToolError::Cancelled))) {
            return Err(ToolError::Cancelled);
        }

        let mut sections = Vec::new();
        let mut answered = Vec::new();
        let mut failures = Vec::new();
        for (name, result) in lookups {
            match result {
                Ok(section) => {
                    sections.push(section);
                    answered.push(name);
                }
                Err(e) => {
                    debug!(lookup = name, error = %e, "Search lookup failed");
                    failures.push(format!("{}: {}", name, e));
                }
            }
        }

        if sections.is_empty() {
            return Err(ToolError::unavailable(format!(
                "no search results for '{}' ({})",
                query,
                failures.join("; ")
            )));
        }

        let text = format!("Search results for '{}'\n\n{}", query, sections.join("\n\n"));
        Ok(ToolOutput::new(text)
            .with_metadata("sections", sections.len())
            .with_metadata("source", answered.join(",")))
    }
}
