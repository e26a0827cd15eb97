//! Shared HTTP plumbing for the network-backed tools.
//!
//! Every await on the network is raced against the caller's
//! [`CancellationToken`], and transport failures are mapped onto the
//! [`ToolError`] taxonomy in one place:
//!
//! | Failure | Error |
//! |---------|-------|
//! | connect / DNS / timeout / body read | `Network` |
//! | non-2xx status, undecodable payload | `ServiceUnavailable` |
//! | token cancelled | `Cancelled` |

use crate::config::FileHttpConfig;
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use toolrouter_domain::{ToolError, truncate};
use tracing::{debug, trace};

/// Longest response excerpt quoted in an error message
const ERROR_BODY_PREVIEW: usize = 300;

/// Build the shared client from `[http]` settings.
pub fn build_client(config: &FileHttpConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(config.timeout())
        .user_agent(config.user_agent.clone())
        .build()
}

/// Send a request, giving up early if `cancel` fires.
pub async fn send(
    request: RequestBuilder,
    cancel: &CancellationToken,
    service: &str,
) -> Result<Response, ToolError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!(service, "Request cancelled");
            Err(ToolError::Cancelled)
        }
        result = request.send() => {
            let response = result.map_err(|e| network_error(service, &e))?;
            trace!(service, status = %response.status(), "Response received");
            Ok(response)
        }
    }
}

/// Read the full body as text, giving up early if `cancel` fires.
pub async fn read_text(
    response: Response,
    cancel: &CancellationToken,
    service: &str,
) -> Result<String, ToolError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ToolError::Cancelled),
        body = response.text() => body.map_err(|e| network_error(service, &e)),
    }
}

/// Send, require a 2xx status and decode the body as JSON.
///
/// The body is decoded from text rather than trusting `Content-Type`, since
/// some services label JSON as `text/html`.
pub async fn fetch_json<T: DeserializeOwned>(
    request: RequestBuilder,
    cancel: &CancellationToken,
    service: &str,
) -> Result<T, ToolError> {
    let response = send(request, cancel, service).await?;
    let status = response.status();
    let body = read_text(response, cancel, service).await?;

    if !status.is_success() {
        return Err(ToolError::unavailable(format!(
            "{} returned HTTP {}: {}",
            service,
            status.as_u16(),
            truncate(body.trim(), ERROR_BODY_PREVIEW)
        )));
    }

    serde_json::from_str(&body).map_err(|e| {
        ToolError::unavailable(format!("{} returned an unexpected payload: {}", service, e))
    })
}

/// Parse `base` and append one percent-encoded path segment.
pub fn url_with_segment(base: &str, segment: &str) -> Result<Url, ToolError> {
    let mut url = parse_endpoint(base)?;
    url.path_segments_mut()
        .map_err(|_| ToolError::unavailable(format!("endpoint '{}' cannot take a path", base)))?
        .pop_if_empty()
        .push(segment);
    Ok(url)
}

pub fn parse_endpoint(base: &str) -> Result<Url, ToolError> {
    Url::parse(base)
        .map_err(|e| ToolError::unavailable(format!("invalid endpoint '{}': {}", base, e)))
}

/// Host name used as the `source` metadata value.
pub fn source_name(endpoint: &str) -> String {
    Url::parse(endpoint)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .unwrap_or_else(|| endpoint.to_string())
}

fn network_error(service: &str, error: &reqwest::Error) -> ToolError {
    let reason = if error.is_timeout() {
        "timed out".to_string()
    } else if error.is_connect() {
        format!("could not connect ({})", error)
    } else {
        error.to_string()
    };
    ToolError::network(format!("{} request failed: {}", service, reason))
}
