//! Heartbeat HTTP Client
//!
//! A small, type-safe client for the read-only dbt Cloud v2 endpoints the
//! monitor needs: run status and job metadata.
//!
//! # Example
//!
//! ```no_run
//! use heartbeat_client::DbtCloudClient;
//!
//! #[tokio::main]
//! async fn main() -> heartbeat_client::Result<()> {
//!     let client = DbtCloudClient::new("https://cloud.getdbt.com", "12345", "dbtc_token");
//!
//!     let run = client.get_run(987654).await?;
//!     println!("Run status: {}", run.status());
//!     Ok(())
//! }
//! ```

pub mod error;
mod jobs;
mod runs;
mod source;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use source::RunSource;

use heartbeat_core::dto::ApiEnvelope;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Default dbt Cloud host (multi-tenant, North America)
pub const DEFAULT_BASE_URL: &str = "https://cloud.getdbt.com";

/// HTTP client for the dbt Cloud v2 API
///
/// All endpoints are scoped to a single account and authenticated with a
/// static service or personal token.
#[derive(Clone)]
pub struct DbtCloudClient {
    /// Base URL of dbt Cloud (e.g., "https://cloud.getdbt.com")
    base_url: String,
    /// Account the runs and jobs belong to
    account_id: String,
    /// API token sent as `Authorization: Token <key>`
    api_key: String,
    /// HTTP client instance
    client: Client,
}

impl DbtCloudClient {
    /// Create a new dbt Cloud client
    ///
    /// # Arguments
    /// * `base_url` - The dbt Cloud host (e.g., "https://cloud.getdbt.com")
    /// * `account_id` - The dbt Cloud account id
    /// * `api_key` - The API token
    ///
    /// # Example
    /// ```
    /// use heartbeat_client::DbtCloudClient;
    ///
    /// let client = DbtCloudClient::new("https://cloud.getdbt.com", "12345", "dbtc_token");
    /// ```
    pub fn new(
        base_url: impl Into<String>,
        account_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self::with_client(base_url, account_id, api_key, Client::new())
    }

    /// Create a new dbt Cloud client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use heartbeat_client::DbtCloudClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = DbtCloudClient::with_client(
    ///     "https://cloud.getdbt.com",
    ///     "12345",
    ///     "dbtc_token",
    ///     http_client,
    /// );
    /// ```
    pub fn with_client(
        base_url: impl Into<String>,
        account_id: impl Into<String>,
        api_key: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            account_id: account_id.into(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Get the base URL of dbt Cloud
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the account id requests are scoped to
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Account-scoped v2 API prefix, without a trailing slash
    fn account_url(&self) -> String {
        format!("{}/api/v2/accounts/{}", self.base_url, self.account_id)
    }

    /// Build an authenticated GET request
    fn get(&self, url: &str) -> RequestBuilder {
        self.client
            .get(url)
            .header(AUTHORIZATION, format!("Token {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and unwrap the `data` envelope
    ///
    /// Non-success statuses become [`ClientError::Unauthorized`] or
    /// [`ClientError::ApiError`]. A body that is not JSON becomes
    /// [`ClientError::ParseError`]; a JSON body without `data` yields an empty
    /// record.
    async fn handle_response<T>(&self, response: reqwest::Response) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        let body = response.text().await?;
        debug!("API response ({} bytes): {}", body.len(), body);

        serde_json::from_str::<ApiEnvelope<T>>(&body)
            .map(ApiEnvelope::into_data)
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

impl std::fmt::Debug for DbtCloudClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbtCloudClient")
            .field("base_url", &self.base_url)
            .field("account_id", &self.account_id)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod test_server {
    //! Single-shot HTTP server for exercising the client end to end

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use crate::DbtCloudClient;

    /// Client for account 42 that bypasses any proxy configured in the environment
    pub fn local_client(base_url: String, api_key: &str) -> DbtCloudClient {
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        DbtCloudClient::with_client(base_url, "42", api_key, http)
    }

    /// Serves one canned response and returns the raw request it received
    pub async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;

            String::from_utf8_lossy(&request).to_string()
        });

        (format!("http://{}", addr), handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = DbtCloudClient::new(DEFAULT_BASE_URL, "42", "token");
        assert_eq!(client.base_url(), "https://cloud.getdbt.com");
        assert_eq!(client.account_id(), "42");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = DbtCloudClient::new("https://emea.dbt.com/", "42", "token");
        assert_eq!(client.base_url(), "https://emea.dbt.com");
        assert_eq!(client.account_url(), "https://emea.dbt.com/api/v2/accounts/42");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = DbtCloudClient::with_client(DEFAULT_BASE_URL, "42", "token", http_client);
        assert_eq!(client.base_url(), "https://cloud.getdbt.com");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let client = DbtCloudClient::new(DEFAULT_BASE_URL, "42", "super-secret");
        let debug = format!("{:?}", client);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
