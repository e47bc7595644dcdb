//! HTTP façade: one `request` primitive that never lets a failure escape as
//! anything other than an [`ApiError`].

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::envelope::{ApiResult, Envelope};
use crate::resources::{EventsApi, OrganizationsApi, PublicApi};
use crate::{ApiError, ClientConfig};

/// Per-call options: method, extra headers, query pairs and JSON body.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn patch() -> Self {
        Self::new(Method::PATCH)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Add or override a header. Later values win over the JSON default.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::InvalidRequest(format!("failed to serialize body: {e}")))?;
        self.body = Some(value);
        Ok(self)
    }
}

/// Client for the platform API.
///
/// Construct one at application start and pass references to whoever needs
/// it. Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn events(&self) -> EventsApi<'_> {
        EventsApi::new(self)
    }

    pub fn organizations(&self) -> OrganizationsApi<'_> {
        OrganizationsApi::new(self)
    }

    pub fn public(&self) -> PublicApi<'_> {
        PublicApi::new(self)
    }

    /// Issue a call against `base_url + endpoint` and normalize the outcome.
    ///
    /// - non-2xx: [`ApiError::Status`] with the body's `error` field or `HTTP <status>`
    /// - no response at all: [`ApiError::Transport`]
    /// - 2xx that is not a valid envelope of `T`: [`ApiError::Decode`]
    /// - `success: false`: [`ApiError::Application`]
    pub async fn request<T>(&self, endpoint: &str, options: RequestOptions) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.config.base_url, endpoint);
        let headers = build_headers(&options.headers)?;

        tracing::debug!(method = %options.method, %url, "sending API request");

        let mut req = self.http.request(options.method.clone(), &url);
        if let Some(token) = &self.config.bearer_token {
            req = req.bearer_auth(token);
        }
        req = req.headers(headers);
        if !options.query.is_empty() {
            req = req.query(&options.query);
        }
        if let Some(body) = &options.body {
            let bytes = serde_json::to_vec(body)
                .map_err(|e| ApiError::InvalidRequest(format!("failed to serialize body: {e}")))?;
            req = req.body(bytes);
        }

        let resp = req.send().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "API request failed before a response");
            ApiError::transport(e)
        })?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(ApiError::transport)?;

        if !status.is_success() {
            let message = error_field(&body).unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            tracing::warn!(%url, status = status.as_u16(), %message, "API request returned an error status");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: Envelope<T> = serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(%url, error = %e, "API response did not match the expected shape");
            ApiError::Decode(e.to_string())
        })?;

        envelope.into_result()
    }
}

fn build_headers(extra: &[(String, String)]) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ApiError::InvalidRequest(format!("invalid header name '{name}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid value for header '{name}': {e}")))?;
        headers.insert(name, value);
    }

    Ok(headers)
}

fn error_field(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value.get("error")?.as_str().map(str::to_string)
}
