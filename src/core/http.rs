use crate::utils::error::{ApiErrorDetails, Result, SteamWebApiError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://www.steamwebapi.com";

const RATELIMIT_RESET: &str = "x-ratelimit-reset";
const RATELIMIT_REMAINING: &str = "x-ratelimit-remaining";
const RETRY_AFTER: &str = "retry-after";

/// An API route: HTTP method plus a path starting with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub method: Method,
    pub path: String,
}

impl Route {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }
}

/// Extra query parameters, headers and JSON body for one request.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    json: Option<Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn params<K, V, I>(mut self, params: I) -> Self
    where
        K: Into<String>,
        V: ToString,
        I: IntoIterator<Item = (K, V)>,
    {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.to_string())));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.json = Some(body);
        self
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn json_body(&self) -> Option<&Value> {
        self.json.as_ref()
    }
}

/// A decoded response body. Which variant comes back depends on `Content-Type`.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
    Bytes(Vec<u8>),
}

impl ResponseBody {
    pub fn kind(&self) -> &'static str {
        match self {
            ResponseBody::Json(_) => "json",
            ResponseBody::Text(_) => "text",
            ResponseBody::Bytes(_) => "bytes",
        }
    }

    pub fn into_json(self) -> Result<Value> {
        match self {
            ResponseBody::Json(value) => Ok(value),
            other => Err(SteamWebApiError::UnexpectedBody { kind: other.kind() }),
        }
    }
}

/// How the request loop reacts to `429` and `5xx` responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total tries per request, the first one included.
    pub max_attempts: u32,
    /// A rate limit asking us to wait longer than this fails immediately.
    pub max_ratelimit_wait: Duration,
    pub backoff_base: Duration,
    pub backoff_step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            max_ratelimit_wait: Duration::from_secs(30),
            backoff_base: Duration::from_secs(1),
            backoff_step: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Delay after the server error seen on `attempt` (0-based).
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.backoff_base + self.backoff_step * attempt
    }
}

pub fn decode_body(content_type: Option<&str>, bytes: Vec<u8>) -> Result<ResponseBody> {
    let Some(content_type) = content_type else {
        return Ok(ResponseBody::Bytes(bytes));
    };

    if content_type == "application/octet-stream" || content_type.starts_with("image/") {
        return Ok(ResponseBody::Bytes(bytes));
    }

    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    };

    if content_type.starts_with("application/json") {
        if text.trim().is_empty() {
            return Ok(ResponseBody::Json(Value::Null));
        }
        return Ok(ResponseBody::Json(serde_json::from_str(&text)?));
    }

    Ok(ResponseBody::Text(text))
}

/// Pulls `error` and `message` out of a failing response.
pub fn error_details(status: u16, body: &ResponseBody) -> ApiErrorDetails {
    fn field(map: &serde_json::Map<String, Value>, key: &str) -> String {
        match map.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    match body {
        ResponseBody::Json(Value::Object(map)) => {
            ApiErrorDetails::new(status, field(map, "error"), field(map, "message"))
        }
        ResponseBody::Json(other) => {
            let text = other.to_string();
            ApiErrorDetails::new(status, text.clone(), text)
        }
        ResponseBody::Text(text) => ApiErrorDetails::new(status, text.clone(), text.clone()),
        ResponseBody::Bytes(bytes) => {
            let text = String::from_utf8_lossy(bytes).into_owned();
            ApiErrorDetails::new(status, text.clone(), text)
        }
    }
}

/// How long a `429` asks us to wait.
///
/// `X-Ratelimit-Reset` is preferred. When it is zero or missing and the server
/// sent no `X-Ratelimit-Remaining`, `Retry-After` is used instead. A wait too
/// large for a [`Duration`] comes back as [`Duration::MAX`].
pub fn ratelimit_wait(headers: &HeaderMap) -> Option<Duration> {
    let seconds = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|s| s.is_finite() && *s >= 0.0)
    };

    let reset = seconds(RATELIMIT_RESET);
    let wait = match reset {
        Some(s) if s > 0.0 => Some(s),
        Some(s) if headers.contains_key(RATELIMIT_REMAINING) => Some(s),
        _ => seconds(RETRY_AFTER),
    };
    wait.map(|s| Duration::try_from_secs_f64(s).unwrap_or(Duration::MAX))
}

fn merge_query(token: &str, production: bool, extra: &[(String, String)]) -> Vec<(String, String)> {
    let mut query = vec![
        ("key".to_string(), token.to_string()),
        ("production".to_string(), if production { "1" } else { "0" }.to_string()),
    ];

    for (key, value) in extra {
        match query[..2].iter().position(|(k, _)| k == key) {
            Some(index) => query[index].1 = value.clone(),
            None => query.push((key.clone(), value.clone())),
        }
    }
    query
}

fn build_headers(user_agent: &str, options: &RequestOptions) -> Result<HeaderMap> {
    let invalid = |name: &str, reason: String| SteamWebApiError::Validation {
        message: format!("invalid header {name}: {reason}"),
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(user_agent).map_err(|e| invalid("User-Agent", e.to_string()))?,
    );

    for (name, value) in &options.headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(name.as_str(), e.to_string()))?;
        let header_value =
            HeaderValue::from_str(value).map_err(|e| invalid(name.as_str(), e.to_string()))?;
        headers.insert(header_name, header_value);
    }

    if options.json.is_some() {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    Ok(headers)
}

/// Sends requests to the API. Use [`crate::Client`] rather than this directly.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
    production: bool,
    user_agent: String,
    retry: RetryPolicy,
}

impl HttpClient {
    pub(crate) fn new(
        client: reqwest::Client,
        base_url: String,
        token: String,
        production: bool,
        user_agent: String,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            client,
            base_url,
            token,
            production,
            user_agent,
            retry,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn production(&self) -> bool {
        self.production
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub async fn request(&self, route: &Route, options: &RequestOptions) -> Result<ResponseBody> {
        let url = format!("{}{}", self.base_url, route.path);
        let query = merge_query(&self.token, self.production, &options.query);
        let headers = build_headers(&self.user_agent, options)?;
        let mut rate_limited: Option<ApiErrorDetails> = None;

        for attempt in 0..self.retry.max_attempts {
            let mut request = self
                .client
                .request(route.method.clone(), &url)
                .headers(headers.clone())
                .query(&query);
            if let Some(body) = &options.json {
                request = request.json(body);
            }

            let response = request.send().await?;
            let status = response.status();

            debug!(
                method = %route.method,
                url = %url,
                json = ?options.json,
                status = status.as_u16(),
                attempt,
                "request completed"
            );

            let response_headers = response.headers().clone();
            let content_type = response_headers
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            let bytes = response.bytes().await?;
            let body = decode_body(content_type.as_deref(), bytes.to_vec())?;

            if status.is_success() {
                return Ok(body);
            }

            let details = error_details(status.as_u16(), &body);
            match status.as_u16() {
                400 => return Err(SteamWebApiError::BadRequest(details)),
                401 => return Err(SteamWebApiError::NotAuthenticated(details)),
                403 => return Err(SteamWebApiError::Forbidden(details)),
                404 => return Err(SteamWebApiError::NotFound(details)),
                429 => {
                    let Some(wait) = ratelimit_wait(&response_headers) else {
                        warn!(url = %url, "Rate limited without a usable retry header");
                        return Err(SteamWebApiError::RateLimited(details));
                    };

                    if wait > self.retry.max_ratelimit_wait {
                        warn!(
                            url = %url,
                            retry_after = wait.as_secs_f64(),
                            "Rate limit wait exceeds {:?}, giving up",
                            self.retry.max_ratelimit_wait
                        );
                        return Err(SteamWebApiError::RateLimited(details));
                    }

                    warn!(
                        url = %url,
                        retry_after = wait.as_secs_f64(),
                        "We are being rate limited, retrying in {:.2} seconds",
                        wait.as_secs_f64()
                    );

                    rate_limited = Some(details);
                    tokio::time::sleep(wait).await;
                }
                405..=499 => return Err(SteamWebApiError::Api(details)),
                500..=599 => {
                    if attempt + 1 >= self.retry.max_attempts {
                        return Err(SteamWebApiError::ServerError(details));
                    }

                    let delay = self.retry.backoff_for(attempt);
                    warn!(
                        url = %url,
                        status = status.as_u16(),
                        attempt,
                        "Server error, retrying in {:?}",
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                _ => return Err(SteamWebApiError::Unhandled(details)),
            }
        }

        match rate_limited {
            Some(details) => Err(SteamWebApiError::RateLimited(details)),
            None => Err(SteamWebApiError::Validation {
                message: "retry policy allows no attempts".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_decode_body_by_content_type() {
        let body = decode_body(Some("application/json; charset=utf-8"), br#"{"a":1}"#.to_vec()).unwrap();
        assert_eq!(body, ResponseBody::Json(json!({"a": 1})));

        let body = decode_body(Some("text/html"), b"<p>hi</p>".to_vec()).unwrap();
        assert_eq!(body, ResponseBody::Text("<p>hi</p>".to_string()));

        let body = decode_body(Some("image/png"), vec![0x89, 0x50]).unwrap();
        assert_eq!(body, ResponseBody::Bytes(vec![0x89, 0x50]));

        let body = decode_body(Some("application/octet-stream"), vec![1, 2, 3]).unwrap();
        assert_eq!(body.kind(), "bytes");

        let body = decode_body(None, b"{}".to_vec()).unwrap();
        assert_eq!(body, ResponseBody::Bytes(b"{}".to_vec()));
    }

    #[test]
    fn test_decode_body_json_edge_cases() {
        assert_eq!(
            decode_body(Some("application/json"), Vec::new()).unwrap(),
            ResponseBody::Json(Value::Null)
        );
        assert!(matches!(
            decode_body(Some("application/json"), b"not json".to_vec()),
            Err(SteamWebApiError::Json(_))
        ));
    }

    #[test]
    fn test_error_details_from_object_and_text() {
        let body = ResponseBody::Json(json!({"error": "invalid_key", "message": "Key not found"}));
        let details = error_details(401, &body);
        assert_eq!(details, ApiErrorDetails::new(401, "invalid_key", "Key not found"));

        let body = ResponseBody::Json(json!({"message": "slow down"}));
        let details = error_details(429, &body);
        assert_eq!(details.error, "");
        assert_eq!(details.message, "slow down");

        let body = ResponseBody::Text("Bad Gateway".to_string());
        let details = error_details(502, &body);
        assert_eq!(details.error, "Bad Gateway");
        assert_eq!(details.message, "Bad Gateway");
    }

    #[test]
    fn test_ratelimit_wait_prefers_reset_header() {
        let map = headers(&[("x-ratelimit-reset", "12"), ("retry-after", "3")]);
        assert_eq!(ratelimit_wait(&map), Some(Duration::from_secs(12)));
    }

    #[test]
    fn test_ratelimit_wait_falls_back_to_retry_after() {
        let map = headers(&[("x-ratelimit-reset", "0"), ("retry-after", "2.5")]);
        assert_eq!(ratelimit_wait(&map), Some(Duration::from_millis(2500)));

        let map = headers(&[("retry-after", "4")]);
        assert_eq!(ratelimit_wait(&map), Some(Duration::from_secs(4)));
    }

    #[test]
    fn test_ratelimit_wait_zero_reset_with_remaining() {
        let map = headers(&[
            ("x-ratelimit-reset", "0"),
            ("x-ratelimit-remaining", "10"),
            ("retry-after", "9"),
        ]);
        assert_eq!(ratelimit_wait(&map), Some(Duration::ZERO));
    }

    #[test]
    fn test_ratelimit_wait_without_headers() {
        assert_eq!(ratelimit_wait(&HeaderMap::new()), None);
        assert_eq!(ratelimit_wait(&headers(&[("retry-after", "soon")])), None);
    }

    #[test]
    fn test_ratelimit_wait_zero_reset_alone_is_unknown() {
        assert_eq!(ratelimit_wait(&headers(&[("x-ratelimit-reset", "0")])), None);
    }

    #[test]
    fn test_ratelimit_wait_saturates_huge_values() {
        let map = headers(&[("x-ratelimit-reset", "1e20")]);
        assert_eq!(ratelimit_wait(&map), Some(Duration::MAX));

        let map = headers(&[("retry-after", "1e300")]);
        assert_eq!(ratelimit_wait(&map), Some(Duration::MAX));
    }

    #[test]
    fn test_backoff_grows_linearly() {
        let policy = RetryPolicy::default();
        let delays: Vec<u64> = (0..4).map(|n| policy.backoff_for(n).as_secs()).collect();
        assert_eq!(delays, vec![1, 3, 5, 7]);
    }

    #[test]
    fn test_merge_query_overrides_auth_params() {
        let extra = vec![
            ("production".to_string(), "1".to_string()),
            ("game".to_string(), "cs2".to_string()),
            ("game".to_string(), "rust".to_string()),
        ];
        let query = merge_query("secret", false, &extra);
        assert_eq!(
            query,
            vec![
                ("key".to_string(), "secret".to_string()),
                ("production".to_string(), "1".to_string()),
                ("game".to_string(), "cs2".to_string()),
                ("game".to_string(), "rust".to_string()),
            ]
        );
    }

    #[test]
    fn test_build_headers_rejects_bad_names() {
        let options = RequestOptions::new().header("bad header", "x");
        assert!(matches!(
            build_headers("ua", &options),
            Err(SteamWebApiError::Validation { .. })
        ));

        let options = RequestOptions::new().json(json!({"x": 1}));
        let headers = build_headers("ua", &options).unwrap();
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers[USER_AGENT], "ua");
    }
}
