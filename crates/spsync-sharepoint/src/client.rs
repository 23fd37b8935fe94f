//! SharePoint REST API client
//!
//! Provides a typed HTTP client for the `/_api` endpoints of a single
//! SharePoint site. Handles authentication headers, throttling retries,
//! status classification and JSON deserialization.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use spsync_sharepoint::client::SharePointClient;
//!
//! # async fn example() -> Result<(), spsync_sharepoint::SharePointError> {
//! let client = SharePointClient::new("https://contoso.sharepoint.com/sites/team", "access-token");
//! let title = client.get_site_title().await?;
//! println!("Connected to {title}");
//! # Ok(())
//! # }
//! ```

use reqwest::header::{ACCEPT, RETRY_AFTER};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::odata::{self, WebInfo};
use crate::rate_limit::{is_throttled, RetryPolicy};
use crate::SharePointError;

/// Response format requested from SharePoint: bare JSON without OData metadata
const ACCEPT_JSON: &str = "application/json;odata=nometadata";

/// HTTP client for one SharePoint site
///
/// Wraps `reqwest::Client` with the bearer token, the `/_api` base URL of
/// the site, and the retry policy for throttled requests.
pub struct SharePointClient {
    /// The underlying HTTP client
    client: Client,
    /// Absolute site URL without trailing slash
    site_url: String,
    /// Current OAuth2 access token
    access_token: String,
    /// Retry budget for 429/503 responses
    retry: RetryPolicy,
}

impl SharePointClient {
    /// Creates a new client for the site at `site_url`
    ///
    /// # Arguments
    /// * `site_url` - Absolute site URL, e.g. `https://contoso.sharepoint.com/sites/team`
    /// * `access_token` - A valid OAuth2 access token for SharePoint
    pub fn new(site_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        let site_url = site_url.into();
        Self {
            client: Client::new(),
            site_url: site_url.trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            retry: RetryPolicy::default(),
        }
    }

    /// Sets the retry budget for throttled requests
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Updates the access token (e.g., after a token refresh)
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = token.into();
        debug!("Updated SharePointClient access token");
    }

    /// Returns a reference to the current access token
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the site URL requests are made against
    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Creates an authenticated request builder for an `/_api` endpoint
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `endpoint` - Path below `/_api`, e.g. `"/web"`
    pub fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = format!("{}/_api{}", self.site_url, endpoint);
        self.client
            .request(method, &url)
            .bearer_auth(&self.access_token)
            .header(ACCEPT, ACCEPT_JSON)
    }

    /// Retrieves the title of the site
    pub async fn get_site_title(&self) -> Result<String, SharePointError> {
        debug!("Fetching site title");
        let web: WebInfo = self
            .get_json(self.request(Method::GET, "/web").query(&[("$select", "Title")]))
            .await?;
        Ok(web.title)
    }

    // ========================================================================
    // Request execution
    // ========================================================================

    /// Sends a request, retrying while SharePoint throttles it.
    ///
    /// On 429 or 503 the `Retry-After` header is honoured (bounded by the
    /// policy) and the request is re-sent, at most `max_retries` times.
    /// Any other non-success status is classified into a [`SharePointError`].
    pub async fn execute_with_retry(
        &self,
        request: RequestBuilder,
    ) -> Result<Response, SharePointError> {
        let mut pending = request;
        let mut attempt: u32 = 0;

        loop {
            let next = pending.try_clone();
            let response = pending.send().await?;
            let status = response.status();

            if !is_throttled(status) {
                if attempt > 0 {
                    info!(attempt, "Request succeeded after retry");
                }
                return check_status(response).await;
            }

            let retry_after = self.retry.wait_for(
                response
                    .headers()
                    .get(RETRY_AFTER)
                    .and_then(|v| v.to_str().ok()),
            );

            match next {
                Some(retry) if attempt < self.retry.max_retries => {
                    info!(
                        status = status.as_u16(),
                        attempt,
                        retry_after_ms = retry_after.as_millis(),
                        "Throttled, backing off"
                    );
                    tokio::time::sleep(retry_after).await;
                    pending = retry;
                    attempt += 1;
                }
                _ => {
                    warn!(attempts = attempt + 1, "Throttling retry limit exhausted");
                    return Err(SharePointError::TooManyRequests { retry_after });
                }
            }
        }
    }

    /// Sends a request and deserializes the JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, SharePointError> {
        let response = self.execute_with_retry(request).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| SharePointError::InvalidResponse(e.to_string()))
    }

    /// Sends a request and returns the raw body
    pub async fn get_bytes(&self, request: RequestBuilder) -> Result<Vec<u8>, SharePointError> {
        let response = self.execute_with_retry(request).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Sends a request whose response body is not needed
    pub async fn send(&self, request: RequestBuilder) -> Result<(), SharePointError> {
        self.execute_with_retry(request).await.map(|_| ())
    }
}

/// Passes successful responses through and classifies the rest
async fn check_status(response: Response) -> Result<Response, SharePointError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = odata::error_message(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Unexpected response")
            .to_string()
    });
    debug!(status = status.as_u16(), %message, "SharePoint request failed");

    Err(match status {
        StatusCode::UNAUTHORIZED => SharePointError::Unauthorized(message),
        StatusCode::FORBIDDEN => SharePointError::Forbidden(message),
        StatusCode::NOT_FOUND => SharePointError::NotFound(message),
        StatusCode::BAD_REQUEST => SharePointError::BadRequest(message),
        other => SharePointError::Status {
            status: other.as_u16(),
            message,
        },
    })
}
