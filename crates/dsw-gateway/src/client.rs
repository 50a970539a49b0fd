//! HTTP implementation of [`Backend`].

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::backend::Backend;
use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};
use crate::types::{
    Connection, ConnectionRequest, DatabaseSchema, HealthResponse, PreviewRequest,
    PreviewResponse, PublishRequest, PublishResponse, PythonRunRequest, PythonRunResponse,
    RuntimeVariable, SqlRunRequest, StatsRequest, StatsResponse,
};

/// User agent string for backend requests.
const USER_AGENT_VALUE: &str = concat!("datasnail/", env!("CARGO_PKG_VERSION"));

/// Fallback detail when an error body carries nothing useful.
const GENERIC_FAILURE: &str = "Request failed";

/// `reqwest`-backed client for the analysis backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
    session_id: String,
}

impl BackendClient {
    /// Creates a client for the backend described by `config`.
    ///
    /// Fails if the base URL is not an absolute `http`/`https` URL.
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| GatewayError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            session_id: config.session_id.clone(),
        })
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Session id this client was configured with.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Cannot-be-a-base URLs are rejected in `new`, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        tracing::debug!(%url, "GET");
        let response = self.http.get(url).send().await?;
        handle_response(response).await
    }

    async fn post_json<B, T>(&self, url: Url, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(%url, "POST");
        let response = self.http.post(url).json(body).send().await?;
        handle_response(response).await
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let invalid = |reason: String| GatewayError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot carry a path".to_string()));
    }
    Ok(url)
}

/// Checks the status, then decodes the JSON body.
async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let detail = extract_detail(&body)
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| GENERIC_FAILURE.to_string());
        tracing::debug!(status = status.as_u16(), %detail, "backend returned an error");
        return Err(GatewayError::Status {
            status: status.as_u16(),
            detail,
        });
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Pulls `detail` out of a FastAPI error body, falling back to the raw text.
fn extract_detail(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => match map.get("detail") {
            Some(serde_json::Value::String(detail)) if !detail.is_empty() => Some(detail.clone()),
            Some(serde_json::Value::Null) | None => Some(trimmed.to_string()),
            Some(other) => Some(other.to_string()),
        },
        _ => Some(trimmed.to_string()),
    }
}

#[async_trait]
impl Backend for BackendClient {
    async fn health(&self) -> Result<HealthResponse> {
        self.get_json(self.endpoint(&["health"])).await
    }

    async fn list_connections(&self) -> Result<Vec<Connection>> {
        self.get_json(self.endpoint(&["api", "connections"])).await
    }

    async fn create_connection(&self, request: &ConnectionRequest) -> Result<Connection> {
        tracing::info!(engine = %request.engine, name = %request.name, "creating connection");
        self.post_json(self.endpoint(&["api", "connect"]), request)
            .await
    }

    async fn schema(&self, connection_id: &str) -> Result<DatabaseSchema> {
        self.get_json(self.endpoint(&["api", "schema", connection_id]))
            .await
    }

    async fn preview(&self, request: &PreviewRequest) -> Result<PreviewResponse> {
        self.post_json(self.endpoint(&["api", "preview"]), request)
            .await
    }

    async fn run_sql(&self, request: &SqlRunRequest) -> Result<PreviewResponse> {
        self.post_json(self.endpoint(&["api", "query", "run"]), request)
            .await
    }

    async fn analyze_stats(&self, request: &StatsRequest) -> Result<StatsResponse> {
        self.post_json(self.endpoint(&["api", "analyze", "stats"]), request)
            .await
    }

    async fn run_python(&self, request: &PythonRunRequest) -> Result<PythonRunResponse> {
        self.post_json(self.endpoint(&["api", "python", "run"]), request)
            .await
    }

    async fn python_variables(&self, session_id: &str) -> Result<Vec<RuntimeVariable>> {
        let mut url = self.endpoint(&["api", "python", "variables"]);
        url.query_pairs_mut().append_pair("session_id", session_id);
        self.get_json(url).await
    }

    async fn publish_variable(&self, request: &PublishRequest) -> Result<PublishResponse> {
        tracing::info!(variable = %request.var_name, "publishing variable");
        self.post_json(self.endpoint(&["api", "python", "publish"]), request)
            .await
    }
}
