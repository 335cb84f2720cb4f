//! FreeScout API client.
//!
//! Low-level HTTP client that handles authentication and raw requests.
//! Higher-level operations are implemented via traits on entity types.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use url::Url;

use crate::config::Config;
use crate::error::{FreeScoutError, Result};

/// Header carrying the API key on authenticated requests.
pub const API_KEY_HEADER: &str = "X-FreeScout-API-Key";

const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";
const USER_AGENT: &str = concat!("freescout-rs/", env!("CARGO_PKG_VERSION"));

/// Low-level FreeScout API client.
///
/// Handles authentication and HTTP requests. Entity-specific operations
/// are implemented via the `Get`, `List`, and `Create` traits on model types.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use freescout::FreeScoutClient;
///
/// # fn example() -> freescout::Result<()> {
/// // Create from environment variables
/// let client = FreeScoutClient::from_env()?;
///
/// // Or configure manually; a trailing `/api` is ignored
/// let client = FreeScoutClient::new("https://support.example.com/api", "your-api-key")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FreeScoutClient {
    http: Client,
    base_url: Arc<Url>,
    api_url: Arc<Url>,
    api_key: String,
}

impl std::fmt::Debug for FreeScoutClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FreeScoutClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl FreeScoutClient {
    /// Create a client from `FREESCOUT_BASE_URL` and `FREESCOUT_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if either variable is missing or the URL is invalid.
    pub fn from_env() -> Result<Self> {
        Self::with_config(&Config::from_env()?)
    }

    /// Create a new client with the provided base URL and API key.
    ///
    /// # Arguments
    ///
    /// * `base_url` - FreeScout installation URL (e.g., `https://support.example.com`)
    /// * `api_key` - FreeScout API key
    ///
    /// # Errors
    ///
    /// Returns an error if either value is blank or the base URL is invalid.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        Self::with_config(&Config::new(base_url, api_key)?)
    }

    /// Create a client from a resolved [`Config`].
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client
    /// cannot be built.
    pub fn with_config(config: &Config) -> Result<Self> {
        // Ensure base URL ends with / so joins keep any sub-path
        let base_url = Url::parse(&format!("{}/", config.base_url))?;
        let api_url = base_url.join("api/")?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .build()
            .map_err(FreeScoutError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            api_url: Arc::new(api_url),
            api_key: config.api_key.clone(),
        })
    }

    /// Get the effective base URL (without the `/api` segment).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a resource path (e.g. `mailboxes`) to its full API URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be joined onto the base URL.
    pub fn endpoint_url(&self, path: &str) -> Result<Url> {
        Ok(self.api_url.join(path.trim_start_matches('/'))?)
    }

    /// Make an authenticated GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = self.endpoint_url(path)?;
        let request = self.authenticated(self.http.get(url.clone()));
        Self::send(request, &url).await
    }

    /// Make an authenticated GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Response> {
        let url = self.endpoint_url(path)?;
        let request = self.authenticated(self.http.get(url.clone()).query(query));
        Self::send(request, &url).await
    }

    /// Make a GET request without the API key header.
    ///
    /// Used for the public knowledge base endpoints.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_public<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Response> {
        let url = self.endpoint_url(path)?;
        let request = self.http.get(url.clone()).query(query);
        Self::send(request, &url).await
    }

    /// Make an authenticated POST request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.endpoint_url(path)?;
        // Serialized by hand so the default charset content type is kept
        let body = serde_json::to_vec(body)?;
        let request = self.authenticated(self.http.post(url.clone()).body(body));
        Self::send(request, &url).await
    }

    fn authenticated(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(API_KEY_HEADER, &self.api_key)
    }

    async fn send(request: RequestBuilder, url: &Url) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            tracing::error!(%url, error = %e, "request to FreeScout failed");
            FreeScoutError::HttpError(e)
        })?;

        Self::check_response(response, url).await
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response, url: &Url) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.ok();
        tracing::error!(
            %url,
            status = status.as_u16(),
            response = body.as_deref().unwrap_or(""),
            "FreeScout returned an error status"
        );

        let message = Self::extract_error_message(body.as_deref(), status);
        Err(FreeScoutError::ApiError {
            message,
            status_code: Some(status.as_u16()),
            body,
        })
    }

    /// Extract error message from a failed response body.
    fn extract_error_message(body: Option<&str>, status: reqwest::StatusCode) -> String {
        let Some(body) = body.filter(|b| !b.trim().is_empty()) else {
            return format!("HTTP {status}");
        };

        // Try to parse as JSON and extract message field
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
            if let Some(msg) = json.get("message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
            if let Some(err) = json.get("error").and_then(|m| m.as_str()) {
                return err.to_string();
            }
        }

        body.to_string()
    }
}
