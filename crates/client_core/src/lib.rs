use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
    Client,
};
use tracing::{debug, error};
use url::Url;

use shared::{domain::ResultSet, error::QueryError};

pub mod render;
pub mod state;

pub use render::{project, RenderEntry, RenderPayload};
pub use state::{reduce, SearchCommand, SearchEvent, SearchPhase, SearchState};

/// Ceiling for one outbound query, enforced by the transport layer. The
/// controller itself never cancels an in-flight request.
pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(180);

const SEARCH_PATH: &str = "/search";
const QUERY_PARAM: &str = "q";

/// Seam between the controller and whatever actually answers queries. Apps
/// hand the worker a `SearchClient`; tests substitute stubs.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    async fn search(&self, query: &str) -> Result<ResultSet, QueryError>;
}

pub struct SearchClient {
    http: Client,
    server_url: String,
}

impl SearchClient {
    pub fn new(server_url: &str) -> anyhow::Result<Self> {
        Url::parse(server_url).with_context(|| format!("invalid server url '{server_url}'"))?;
        let server_url = server_url.trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/xml"));

        let http = Client::builder()
            .timeout(SEARCH_TIMEOUT)
            .default_headers(headers)
            .build()
            .context("failed to build http client")?;

        Ok(Self { http, server_url })
    }
}

#[async_trait]
impl SearchTransport for SearchClient {
    async fn search(&self, query: &str) -> Result<ResultSet, QueryError> {
        let response = self
            .http
            .get(format!("{}{SEARCH_PATH}", self.server_url))
            .query(&[(QUERY_PARAM, query)])
            .send()
            .await
            .map_err(|err| QueryError::Transport(err.to_string()))?
            .error_for_status()
            .map_err(|err| QueryError::Transport(err.to_string()))?;

        let body = response
            .bytes()
            .await
            .map_err(|err| QueryError::Transport(err.to_string()))?;

        // Schema check: anything but an array of strings is malformed, never
        // iterated blindly.
        let hits: ResultSet = serde_json::from_slice(&body)
            .map_err(|err| QueryError::MalformedResponse(err.to_string()))?;

        debug!(hits = hits.len(), "search query settled");
        Ok(hits)
    }
}

/// Runs one `Dispatch` side effect to completion and reports the settle.
///
/// Failures are logged here, at the call site, with the request id and the
/// operator-facing reason; the settled event carries only the typed error.
pub async fn execute(transport: &dyn SearchTransport, command: SearchCommand) -> SearchEvent {
    match command {
        SearchCommand::Dispatch { request, query } => {
            let outcome = transport.search(&query).await;
            if let Err(err) = &outcome {
                error!(request = request.0, reason = %err.reason(), "search query failed");
            }
            SearchEvent::QuerySettled { request, outcome }
        }
    }
}

/// Convenience for one-shot front-ends: validate, dispatch, settle, and
/// return the final state.
pub async fn run_once(transport: &dyn SearchTransport, query: &str) -> SearchState {
    let (state, _) = reduce(&SearchState::new(), SearchEvent::InputChanged(query.to_string()));
    let (state, command) = reduce(&state, SearchEvent::SubmitRequested);
    match command {
        Some(command) => {
            let settled = execute(transport, command).await;
            reduce(&state, settled).0
        }
        None => state,
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
