//! Transport seam for the gist-creation request.
//!
//! The pipeline depends only on the [`GistTransport`] trait; the concrete
//! [`GistClient`] speaks HTTPS via reqwest. The trait is annotated for
//! mockall so the publish flow can be exercised against deterministic mocks.

use async_trait::async_trait;
use tracing::{debug, warn};

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::config::UploadSettings;
use crate::payload::GistPayload;

/// Fixed user-agent header sent with every upload request.
pub const REQUEST_USER_AGENT: &str = "gist-publisher_log_uploader";

/// Default gist-creation endpoint.
pub const GIST_API_URL: &str = "https://api.github.com/gists";

/// Error type for the transport seam (boxed, transport-specific).
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Raw outcome of an upload request: the response status line rendered as
/// `<code> <reason>` plus the unparsed body.
#[derive(Debug, Clone)]
pub struct GistResponse {
    pub status_line: String,
    pub body: String,
}

/// Performs the authenticated gist-creation request.
/// Implemented by the real HTTPS client and by test mocks.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait GistTransport: Send + Sync {
    async fn create_gist(&self, payload: GistPayload) -> Result<GistResponse, TransportError>;
}

/// HTTPS client for the gist API.
pub struct GistClient {
    http: reqwest::Client,
    api_url: String,
    auth_token: String,
}

impl GistClient {
    /// Builds the client from upload settings. Certificate validation is
    /// disabled only when `insecure_skip_verify` is set; the flag exists to
    /// tolerate broken TLS environments on some hosts and stays off by
    /// default.
    pub fn new(settings: &UploadSettings) -> Result<Self, TransportError> {
        if settings.insecure_skip_verify {
            warn!("TLS certificate validation is disabled for gist uploads");
        }
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(settings.insecure_skip_verify)
            .build()?;
        Ok(GistClient {
            http,
            api_url: settings.api_url.clone(),
            auth_token: settings.auth_token.clone(),
        })
    }
}

#[async_trait]
impl GistTransport for GistClient {
    async fn create_gist(&self, payload: GistPayload) -> Result<GistResponse, TransportError> {
        debug!(api_url = %self.api_url, "Sending gist creation request");
        let response = self
            .http
            .post(&self.api_url)
            .header("Authorization", format!("token {}", self.auth_token))
            .header("User-Agent", REQUEST_USER_AGENT)
            .json(&payload)
            .send()
            .await?;
        let status = response.status();
        let status_line = match status.canonical_reason() {
            Some(reason) => format!("{} {}", status.as_u16(), reason),
            None => status.as_u16().to_string(),
        };
        let body = response.text().await?;
        debug!(status_line = %status_line, body_len = body.len(), "Gist creation response received");
        Ok(GistResponse { status_line, body })
    }
}
