//! Elkarbackup HTTP Client
//!
//! A small, type-safe client for the Elkarbackup REST API.
//!
//! Every endpoint used by the reconciler is generic over
//! [`Resource`](elkar_core::Resource), so Clients and Jobs share one code path
//! and differ only in their collection segment (`/api/clients`, `/api/jobs`).
//!
//! # Example
//!
//! ```no_run
//! use elkar_client::{Credentials, ElkarClient};
//! use elkar_core::domain::client::Client;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let api = ElkarClient::new(
//!         "http://localhost:8000",
//!         Credentials::new("root", "root"),
//!     );
//!
//!     let matches = api.list_by_name::<Client>("Name1").await?;
//!     println!("found {} client(s)", matches.len());
//!     Ok(())
//! }
//! ```

pub mod error;
mod resources;

pub use error::{ClientError, Result};
pub use resources::WriteOutcome;

use std::fmt;

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP basic authentication credentials
#[derive(Clone)]
pub struct Credentials {
    pub user: String,
    password: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// HTTP client for the Elkarbackup API
///
/// Holds the transport and the credentials; it keeps no other state, so one
/// value can serve any number of sequential reconciliations.
#[derive(Debug, Clone)]
pub struct ElkarClient {
    /// Server URL without the `/api` part (e.g., "http://localhost:8000")
    base_url: String,
    credentials: Credentials,
    client: Client,
}

impl ElkarClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - The server URL without the `/api` part
    /// * `credentials` - User and password of an ADMIN account
    ///
    /// # Example
    /// ```
    /// use elkar_client::{Credentials, ElkarClient};
    ///
    /// let api = ElkarClient::new("http://localhost:8000", Credentials::new("root", "root"));
    /// ```
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self::with_client(base_url, credentials, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This is the place to configure timeouts, proxies or TLS settings; the
    /// reconciler itself never times out a request.
    ///
    /// # Example
    /// ```
    /// use elkar_client::{Credentials, ElkarClient};
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let api = ElkarClient::with_client(
    ///     "http://localhost:8000",
    ///     Credentials::new("root", "root"),
    ///     http_client,
    /// );
    /// ```
    pub fn with_client(
        base_url: impl Into<String>,
        credentials: Credentials,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            client,
        }
    }

    /// Get the server URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a collection, e.g. `<base>/api/clients.json`
    fn collection_url(&self, collection: &str) -> String {
        format!("{}/api/{}.json", self.base_url, collection)
    }

    /// URL of one item, e.g. `<base>/api/clients/4.json`
    fn item_url(&self, collection: &str, id: i64) -> String {
        format!("{}/api/{}/{}.json", self.base_url, collection, id)
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .basic_auth(&self.credentials.user, Some(&self.credentials.password))
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle a read response and deserialize JSON
    ///
    /// Reads have no "rejected" outcome: any non-success status is a
    /// transport-level failure.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
