//! HTTP client for niconico Live
//!
//! Wraps `reqwest` with the session cookie pinned as a default header and
//! maps non-200 responses to errors before anyone touches the body.

use reqwest::StatusCode;
use reqwest::header::{self, HeaderMap, HeaderValue};
use tracing::debug;

use crate::error::{NicoliveError, Result};
use crate::url::LIVE_BASE_URL;

/// Cookie name the platform expects the session credential under
const SESSION_COOKIE: &str = "user_session";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for the niconico Live client
///
/// The upstream cookie is declared `Domain=.nicovideo.jp; Path=/; HttpOnly;
/// Secure`; an outbound request carries only the `user_session=<value>`
/// pair, which is what this client sends. Domain scoping is structural:
/// the client only ever talks to its configured base URL.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Pre-obtained `user_session` cookie value. `None` builds an
    /// unauthenticated client, which the platform answers with a page
    /// that carries no embedded data (default: `None`)
    pub user_session: Option<String>,

    /// Service base URL (default: `https://live.nicovideo.jp`)
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_session: None,
            base_url: LIVE_BASE_URL.to_string(),
        }
    }
}

/// HTTP client wrapper for niconico Live
///
/// Holds only an immutable transport and credential, so one instance can
/// serve concurrent calls without synchronization. The transport carries
/// no timeout, proxy, or retry layer; failures propagate to the caller
/// immediately.
pub struct NicoliveClient {
    client: reqwest::Client,
    base_url: String,
}

impl NicoliveClient {
    /// Create a new unauthenticated client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// - `InvalidSession` if the session token cannot be encoded as a
    ///   cookie header value
    /// - `Http` if the underlying client fails to initialize
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(session) = &config.user_session {
            let mut cookie = HeaderValue::from_str(&format!("{}={}", SESSION_COOKIE, session))
                .map_err(|_| NicoliveError::InvalidSession)?;
            cookie.set_sensitive(true);
            headers.insert(header::COOKIE, cookie);
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(NicoliveError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    /// Fetch a path on the service, returning the unread response
    ///
    /// # Arguments
    /// * `path` - Absolute path to fetch (e.g., "/embed/timeshift-reservations")
    ///
    /// # Errors
    /// - `Http` - network-level failure
    /// - `UnexpectedStatus` - status other than 200; the body is not read
    pub async fn get(&self, path: &str) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "fetching page");

        let response = self.client.get(&url).send().await.map_err(NicoliveError::Http)?;

        let status = response.status();
        debug!(%status, "received response");
        if status != StatusCode::OK {
            return Err(NicoliveError::UnexpectedStatus(status));
        }

        Ok(response)
    }
}
