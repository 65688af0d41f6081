//! HTTP lyrics client.

use crate::document::parse_document;
use crate::error::{LyricsError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tempo_core::{Catalog, LyricsDocument, LyricsRequest};
use tracing::{debug, warn};
use url::Url;

/// Source of lyric text
///
/// Best effort: one attempt, no retry. Callers render a placeholder on any
/// error.
#[async_trait]
pub trait LyricsProvider {
    /// Fetch the lyrics for a freshly loaded track
    async fn fetch(&self, request: &LyricsRequest) -> Result<LyricsDocument>;
}

/// Lyrics client configuration
#[derive(Debug, Clone)]
pub struct LyricsConfig {
    /// Base URL; documents live at `{base}/artiste{N}/son{M}.json`
    pub base_url: String,

    /// Whole-request timeout
    pub timeout: Duration,
}

impl LyricsConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Fetches lyric documents over HTTP.
///
/// Tracks are located in the catalog by title; the 1-based artist and
/// track positions form the document path.
///
/// # Example
///
/// ```ignore
/// let client = LyricsClient::new(LyricsConfig::new("https://lyrics.example.com"), catalog)?;
/// let url = client.lyrics_url("Olala")?;
/// // https://lyrics.example.com/artiste1/son1.json
/// ```
pub struct LyricsClient {
    http: Client,
    base_url: String,
    catalog: Arc<Catalog>,
}

impl LyricsClient {
    /// Create a new client.
    pub fn new(config: LyricsConfig, catalog: Arc<Catalog>) -> Result<Self> {
        let trimmed = config.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(LyricsError::InvalidUrl("URL cannot be empty".into()));
        }

        let parsed = Url::parse(trimmed).map_err(|e| LyricsError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(LyricsError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(5))
            .user_agent(format!("Tempo/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: trimmed.to_string(),
            catalog,
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Document location for a track title
    pub fn lyrics_url(&self, title: &str) -> Result<String> {
        let (artist, track) =
            self.catalog
                .locate(title)
                .ok_or_else(|| LyricsError::NotListed {
                    title: title.to_string(),
                })?;

        Ok(format!(
            "{}/artiste{}/son{}.json",
            self.base_url,
            artist + 1,
            track + 1
        ))
    }
}

#[async_trait]
impl LyricsProvider for LyricsClient {
    async fn fetch(&self, request: &LyricsRequest) -> Result<LyricsDocument> {
        let url = self.lyrics_url(&request.title)?;
        debug!(url = %url, token = request.token, "Fetching lyrics");

        let response = self.http.get(&url).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                LyricsError::ServerUnreachable(e.to_string())
            } else {
                LyricsError::Request(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Lyrics not available");
            return Err(LyricsError::ServerError {
                status: status.as_u16(),
                url,
            });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LyricsError::ParseError(e.to_string()))?;

        parse_document(&body)
    }
}
