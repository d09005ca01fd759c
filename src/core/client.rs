use crate::core::http::{HttpClient, RequestOptions, ResponseBody, RetryPolicy, Route, DEFAULT_BASE_URL};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, SteamWebApiError};
use crate::utils::validation::{validate_non_empty_string, validate_required_field, validate_url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A steamwebapi.com client.
///
/// Cheap to clone: clones share one connection pool, which is released when
/// the last clone is dropped.
///
/// ```no_run
/// # async fn run() -> steamwebapi::Result<()> {
/// let client = steamwebapi::Client::new("my-api-key")?;
/// let body = client
///     .request(
///         steamwebapi::Route::get("/path/to/endpoint"),
///         steamwebapi::RequestOptions::new().param("id", "76561197960287930"),
///     )
///     .await?;
/// # let _ = body;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
}

impl Client {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::builder(token).build()
    }

    pub fn builder(token: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(token)
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    pub fn production(&self) -> bool {
        self.http.production()
    }

    pub async fn request(&self, route: Route, options: RequestOptions) -> Result<ResponseBody> {
        self.http.request(&route, &options).await
    }

    /// Sends the request and deserialises a JSON response into `T`.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        route: Route,
        options: RequestOptions,
    ) -> Result<T> {
        let value = self.request(route, options).await?.into_json()?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn get_json<T, K, V, I>(&self, path: &str, params: I) -> Result<T>
    where
        T: DeserializeOwned,
        K: Into<String>,
        V: ToString,
        I: IntoIterator<Item = (K, V)>,
    {
        self.request_json(Route::get(path), RequestOptions::new().params(params))
            .await
    }
}

#[derive(Debug, Clone)]
pub struct ClientBuilder {
    token: String,
    production: bool,
    base_url: String,
    timeout: Duration,
    retry: RetryPolicy,
    user_agent: Option<String>,
    http_client: Option<reqwest::Client>,
}

impl ClientBuilder {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            production: false,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
            user_agent: None,
            http_client: None,
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let token = config.token();
        let token = validate_required_field("api.token", &token)?;

        Ok(Self::new(*token)
            .production(config.production())
            .base_url(config.base_url())
            .timeout(config.timeout())
            .retry_policy(config.retry_policy()))
    }

    /// Sent as the `production` query parameter on every request.
    pub fn production(mut self, production: bool) -> Self {
        self.production = production;
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Ignored when a prepared client is supplied through [`Self::http_client`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn build(self) -> Result<Client> {
        validate_non_empty_string("api.token", &self.token)?;
        validate_url("api.base_url", &self.base_url)?;
        if self.retry.max_attempts == 0 {
            return Err(SteamWebApiError::InvalidConfigValueError {
                field: "retry.max_attempts".to_string(),
                value: "0".to_string(),
                reason: "At least one attempt is required".to_string(),
            });
        }

        let base_url = Url::parse(&self.base_url)
            .map_err(|e| SteamWebApiError::ConfigError {
                message: format!("invalid base URL {}: {}", self.base_url, e),
            })?
            .origin()
            .ascii_serialization();

        let client = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder().timeout(self.timeout).build()?,
        };

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("steamwebapi-rs v{} - Rust reqwest", crate::VERSION));

        tracing::debug!(base_url = %base_url, production = self.production, "building client");

        Ok(Client {
            http: HttpClient::new(
                client,
                base_url,
                self.token,
                self.production,
                user_agent,
                self.retry,
            ),
        })
    }
}
