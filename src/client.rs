use std::env;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Method, Response, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::cache::{self, CacheStats, ResponseCache};
use crate::connection::{ConnectionSubscription, ConnectionTracker};
use crate::error::{Error, Result};
use crate::retry::RetryPolicy;
use crate::types::{
    ApiResponse, BotRegistry, ChatRequest, ChatResponse, ConnectionTest, HealthStatus,
    MetricsReport, SendOptions,
};

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const HEALTH_PATH: &str = "/api/health";
const METRICS_PATH: &str = "/api/metrics";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Parley chatbot API.
///
/// Owns all outbound calls to the backend and layers automatic retry,
/// response caching, connection tracking, and error classification on top of
/// them. Cloning is cheap; clones share one cache and one connection
/// tracker, while per-request state (retry counters, cache keys) is never
/// shared between calls.
#[derive(Debug, Clone)]
pub struct Parley {
    client: ReqwestClient,
    base_url: String,
    timeout: Duration,
    retry: RetryPolicy,
    bots: Arc<BotRegistry>,
    cache: Arc<ResponseCache>,
    connection: Arc<ConnectionTracker>,
}

impl Parley {
    /// Create a new Parley client.
    ///
    /// The base URL can be provided directly or read from the
    /// PARLEY_BASE_URL environment variable; absent both, the local
    /// development backend is assumed.
    pub fn new(base_url: Option<String>) -> Result<Self> {
        Self::with_options(base_url, None, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(
        base_url: Option<String>,
        timeout: Option<Duration>,
        retry: Option<RetryPolicy>,
    ) -> Result<Self> {
        let base_url = base_url
            .or_else(|| env::var("PARLEY_BASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Url::parse(&base_url)?;
        let base_url = base_url.trim_end_matches('/').to_string();

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            base_url,
            timeout,
            retry: retry.unwrap_or_default(),
            bots: Arc::new(BotRegistry::builtin()),
            cache: Arc::new(ResponseCache::new()),
            connection: Arc::new(ConnectionTracker::new()),
        })
    }

    /// Sets the total attempts per logical request.
    pub fn with_max_retries(mut self, max_attempts: u32) -> Self {
        self.retry.max_attempts = max_attempts.max(1);
        self
    }

    /// Sets the linear backoff base delay.
    pub fn with_backoff_base(mut self, base_delay: Duration) -> Self {
        self.retry.base_delay = base_delay;
        self
    }

    /// Sets the per-attempt request timeout, rebuilding the HTTP client.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.timeout = timeout;
        self.client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;
        Ok(self)
    }

    /// Sets the cache TTL.
    ///
    /// Replaces the cache, so apply before cloning the client.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache = Arc::new(ResponseCache::with_ttl(ttl));
        self
    }

    /// Returns the persona registry.
    pub fn bots(&self) -> &BotRegistry {
        &self.bots
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create and return default headers for API requests.
    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Process API response errors and convert to our Error type.
    async fn process_error_response(response: Response) -> Error {
        let status = response.status();
        let status_code = status.as_u16();
        let path = response.url().path().to_string();

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|val| val.to_str().ok())
            .and_then(|val| val.parse::<u64>().ok());

        // Error bodies vary between backend generations: a flat
        // {"error": "...", "message": "..."} or a nested {"error": {...}}.
        #[derive(Deserialize)]
        struct ErrorResponse {
            error: Option<serde_json::Value>,
            message: Option<String>,
        }

        let error_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };

        let parsed = serde_json::from_str::<ErrorResponse>(&error_body).ok();
        let error_message = parsed
            .as_ref()
            .and_then(|p| match &p.error {
                Some(serde_json::Value::String(s)) => Some(s.clone()),
                Some(serde_json::Value::Object(obj)) => obj
                    .get("message")
                    .and_then(|m| m.as_str())
                    .map(String::from),
                _ => None,
            })
            .or_else(|| parsed.as_ref().and_then(|p| p.message.clone()))
            .unwrap_or_else(|| {
                if error_body.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                } else {
                    error_body.clone()
                }
            });

        match status_code {
            400 => Error::validation(error_message, None),
            404 => Error::not_found(error_message, Some(path)),
            // 408 classifies as a timeout but, with no local duration,
            // never counts as a network-layer failure.
            408 => Error::timeout(error_message, None),
            429 => Error::rate_limit(error_message, retry_after),
            500 => Error::internal_server(error_message),
            502..=504 => Error::service_unavailable(error_message, retry_after),
            _ => Error::api(status_code, None, error_message),
        }
    }

    /// Issues one HTTP attempt and classifies the outcome.
    async fn attempt_once<T: DeserializeOwned>(
        &self,
        method: &Method,
        url: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<T> {
        let mut request = self
            .client
            .request(method.clone(), url)
            .headers(self.default_headers());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::timeout(
                    format!("Request timed out: {}", e),
                    Some(self.timeout.as_secs_f64()),
                )
            } else if e.is_connect() {
                Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
            } else {
                Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
            }
        })?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        response.json::<T>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }

    /// Runs a request under the retry policy, updating connection state.
    ///
    /// Each invocation owns its attempt counter; concurrent requests never
    /// share retry state. Only network-layer failures mark the backend
    /// unreachable; any HTTP response, success or not, proves it reachable.
    async fn request_with_retry<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            crate::observability::CLIENT_REQUESTS.click();
            let start = Instant::now();
            let outcome = self.attempt_once::<T>(&method, &url, body.as_ref()).await;
            crate::observability::CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());

            let err = match outcome {
                Ok(value) => {
                    self.connection.set_reachable(true);
                    return Ok(value);
                }
                Err(err) => err,
            };

            crate::observability::CLIENT_REQUEST_ERRORS.click();
            self.connection.set_reachable(!err.is_network_layer());

            if err.is_retryable()
                && self.retry.should_retry(attempt)
                && let Some(delay) = self.retry.backoff_delay(attempt + 1)
            {
                crate::observability::CLIENT_REQUEST_RETRIES.click();
                crate::observability::CLIENT_RETRY_BACKOFF.add(delay.as_secs_f64());
                tokio::time::sleep(delay).await;
                continue;
            }

            return Err(err);
        }
    }

    /// Send a chat message to a persona endpoint.
    ///
    /// Validation failures (unknown persona id, whitespace-only text) return
    /// immediately without network I/O. With `options.use_cache` a fresh hit
    /// is served from the cache; otherwise the request runs under the retry
    /// policy and a successful payload is stored back.
    pub async fn send_message(
        &self,
        bot_id: &str,
        text: &str,
        context: Option<serde_json::Value>,
        options: SendOptions,
    ) -> Result<ApiResponse<ChatResponse>> {
        let bot = self
            .bots
            .find(bot_id)
            .ok_or_else(|| {
                Error::validation(
                    format!("unknown chatbot id: {bot_id}"),
                    Some("chatbot_id".to_string()),
                )
            })?
            .clone();

        let request = match context {
            Some(context) => ChatRequest::with_context(text, context),
            None => ChatRequest::new(text),
        };
        if !request.is_valid() {
            return Err(Error::validation(
                "message must not be empty",
                Some("message".to_string()),
            ));
        }

        let body = serde_json::to_value(&request)?;
        let key = cache::cache_key("POST", &bot.path, Some(&body.to_string()));

        if options.use_cache {
            if let Some(hit) = self.cache.get::<ChatResponse>(&key) {
                crate::observability::CACHE_HITS.click();
                return Ok(ApiResponse::cached(hit));
            }
            crate::observability::CACHE_MISSES.click();
        }

        if let Some(delay) = options.typing_delay {
            tokio::time::sleep(delay).await;
        }

        let response: ChatResponse = self
            .request_with_retry(Method::POST, &bot.path, Some(body))
            .await?;

        if options.use_cache {
            self.cache.put(&key, &response)?;
        }
        Ok(ApiResponse::fresh(response))
    }

    /// Fetch the backend health status.
    ///
    /// Cache-eligible under the same TTL as chat responses.
    pub async fn health(&self, options: SendOptions) -> Result<ApiResponse<HealthStatus>> {
        let key = cache::cache_key("GET", HEALTH_PATH, None);

        if options.use_cache {
            if let Some(hit) = self.cache.get::<HealthStatus>(&key) {
                crate::observability::CACHE_HITS.click();
                return Ok(ApiResponse::cached(hit));
            }
            crate::observability::CACHE_MISSES.click();
        }

        let status: HealthStatus = self
            .request_with_retry(Method::GET, HEALTH_PATH, None)
            .await?;

        if options.use_cache {
            self.cache.put(&key, &status)?;
        }
        Ok(ApiResponse::fresh(status))
    }

    /// Fetch the backend metrics report. Never cached.
    pub async fn metrics(&self) -> Result<ApiResponse<MetricsReport>> {
        let report: MetricsReport = self
            .request_with_retry(Method::GET, METRICS_PATH, None)
            .await?;
        Ok(ApiResponse::fresh(report))
    }

    /// Measure a single round trip to the backend.
    ///
    /// Bypasses the retry policy: this is an explicit probe and the caller
    /// wants the first answer, not the best one. The elapsed time is
    /// reported for both outcomes.
    pub async fn test_connection(&self) -> ConnectionTest {
        let url = format!("{}{}", self.base_url, HEALTH_PATH);
        let start = Instant::now();
        let result = self
            .client
            .get(&url)
            .headers(self.default_headers())
            .send()
            .await;
        let latency = start.elapsed();

        match result {
            Ok(response) => {
                self.connection.set_reachable(true);
                ConnectionTest::success(latency, response.status().as_u16())
            }
            Err(e) => {
                self.connection.set_reachable(false);
                ConnectionTest::failure(latency, e.to_string())
            }
        }
    }

    /// Registers a callback invoked whenever backend reachability flips.
    ///
    /// Keep the returned handle alive for as long as notifications are
    /// wanted; dropping it de-registers the callback.
    pub fn on_connection_change(
        &self,
        callback: impl Fn(bool) + Send + Sync + 'static,
    ) -> ConnectionSubscription {
        self.connection.subscribe(callback)
    }

    /// Returns the current reachability state.
    pub fn is_reachable(&self) -> bool {
        self.connection.is_reachable()
    }

    /// Feeds a platform-level online/offline notification into the tracker.
    pub fn set_network_available(&self, available: bool) {
        self.connection.set_reachable(available);
    }

    /// Removes every cached response.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Returns a snapshot of cache contents.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = Parley::new(Some("http://chat.example.com".to_string())).unwrap();
        assert_eq!(client.base_url, "http://chat.example.com");
        assert_eq!(client.timeout, DEFAULT_TIMEOUT);
        assert_eq!(client.retry, RetryPolicy::default());

        let client = Parley::with_options(
            Some("http://chat.example.com/".to_string()),
            Some(Duration::from_secs(5)),
            Some(RetryPolicy::new(5, Duration::from_millis(100))),
        )
        .unwrap();
        assert_eq!(client.base_url, "http://chat.example.com");
        assert_eq!(client.timeout, Duration::from_secs(5));
        assert_eq!(client.retry.max_attempts, 5);
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = Parley::new(Some("not a url".to_string()));
        assert!(matches!(result, Err(Error::Url { .. })));
    }

    #[test]
    fn builder_methods_adjust_policy() {
        let client = Parley::new(Some("http://chat.example.com".to_string()))
            .unwrap()
            .with_max_retries(5)
            .with_backoff_base(Duration::from_millis(50))
            .with_timeout(Duration::from_secs(10))
            .unwrap();
        assert_eq!(client.retry.max_attempts, 5);
        assert_eq!(client.retry.base_delay, Duration::from_millis(50));
        assert_eq!(client.timeout, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn unknown_bot_is_a_validation_error() {
        let client = Parley::new(Some("http://chat.example.com".to_string())).unwrap();
        let err = client
            .send_message("astrology", "hello", None, SendOptions::new())
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn empty_message_is_a_validation_error() {
        let client = Parley::new(Some("http://chat.example.com".to_string())).unwrap();
        let err = client
            .send_message("general", "   ", None, SendOptions::new())
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn clones_share_cache_and_connection() {
        let client = Parley::new(Some("http://chat.example.com".to_string())).unwrap();
        let clone = client.clone();
        client.set_network_available(false);
        assert!(!clone.is_reachable());
    }
}
