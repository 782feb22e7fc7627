use crate::modules::config::ClientConfig;
use crate::modules::error::{RemoteError, FALLBACK_SERVICE_MESSAGE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::{Duration, Instant};
use url::Url;

#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self::with_method(Method::POST)
    }

    pub fn put() -> Self {
        Self::with_method(Method::PUT)
    }

    pub fn delete() -> Self {
        Self::with_method(Method::DELETE)
    }

    fn with_method(method: Method) -> Self {
        Self { method, body: None }
    }

    /// Attaches a JSON body. Encoding failures are reported before anything is sent.
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, RemoteError> {
        let value = serde_json::to_value(body)
            .map_err(|e| RemoteError::Network(format!("could not encode request body: {e}")))?;
        self.body = Some(value);
        Ok(self)
    }
}

/// Timeout-bounded JSON client shared by both stores.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    base_url: Url,
    timeout: Duration,
    http: reqwest::Client,
}

impl RemoteClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: config.timeout,
            http: reqwest::Client::new(),
        }
    }

    /// Appends path segments to the base url, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Issues one request and races it against the configured bound. When the
    /// timer wins the in-flight exchange is dropped, which cancels it.
    pub async fn request(&self, url: Url, options: RequestOptions) -> Result<Value, RemoteError> {
        let method = options.method.clone();
        let started = Instant::now();

        let outcome = tokio::time::timeout(self.timeout, self.exchange(url.clone(), options)).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(Ok(body)) => {
                tracing::debug!(%method, %url, elapsed_ms, "request ok");
                Ok(body)
            }
            Ok(Err(e)) => {
                tracing::debug!(
                    %method,
                    %url,
                    elapsed_ms,
                    status = e.status(),
                    error = ?e,
                    "request failed"
                );
                Err(e)
            }
            Err(_) => {
                tracing::warn!(
                    %method,
                    %url,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "request timed out"
                );
                Err(RemoteError::Timeout)
            }
        }
    }

    pub async fn request_json<T: DeserializeOwned>(
        &self,
        url: Url,
        options: RequestOptions,
    ) -> Result<T, RemoteError> {
        let value = self.request(url, options).await?;
        serde_json::from_value(value)
            .map_err(|e| RemoteError::Network(format!("unexpected response shape: {e}")))
    }

    async fn exchange(&self, url: Url, options: RequestOptions) -> Result<Value, RemoteError> {
        let mut req = self.http.request(options.method, url);
        if let Some(body) = &options.body {
            req = req.json(body);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(service_error(status.as_u16(), &body));
        }
        parse_success_body(&body)
    }
}

// Only an object with a string `message` counts; anything else gets the fallback.
pub(crate) fn service_error(status: u16, body: &[u8]) -> RemoteError {
    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::trim).map(String::from))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| FALLBACK_SERVICE_MESSAGE.to_string());
    RemoteError::Service { status, message }
}

// Acks may come back empty.
fn parse_success_body(body: &[u8]) -> Result<Value, RemoteError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body)
        .map_err(|e| RemoteError::Network(format!("malformed response body: {e}")))
}
