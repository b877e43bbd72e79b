//! Remote catalog client: one page of keyword search, one single-item fetch.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use url::Url;

use super::error::RemoteError;
use super::transport::{Headers, ReqwestTransport, Transport, TransportError};
use super::types::{RepoDto, SearchResponseDto};

const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Stateless client for the remote catalog.
///
/// All I/O goes through the [`Transport`] seam; the client itself only
/// builds URLs, sets headers, and maps failures into [`RemoteError`].
#[derive(Clone)]
pub struct SearchClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    token: Option<String>,
}

impl SearchClient {
    /// Create a client over an explicit transport (used by tests).
    pub fn new(
        transport: Arc<dyn Transport>,
        base_url: impl Into<String>,
        token: Option<String>,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Create a client against the public GitHub API over reqwest.
    pub fn github(token: Option<String>) -> Self {
        Self::new(
            Arc::new(ReqwestTransport::default()),
            DEFAULT_BASE_URL,
            token,
        )
    }

    /// Fetch one page of a keyword search.
    ///
    /// `page` is 1-based. The remote treats an out-of-range page as an empty
    /// `items` list, which callers interpret as end-of-data.
    pub async fn search_repos(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SearchResponseDto, RemoteError> {
        let url = self.search_url(query, page, per_page)?;
        tracing::debug!(%url, page, "searching remote catalog");
        self.get_json(url.as_str()).await
    }

    /// Fetch a single repository by its stable numeric id.
    pub async fn get_repo(&self, id: i64) -> Result<RepoDto, RemoteError> {
        let url = format!("{}/repositories/{}", self.base_url, id);
        tracing::debug!(%url, id, "fetching repository detail");
        self.get_json(&url).await
    }

    fn search_url(&self, query: &str, page: u32, per_page: u32) -> Result<Url, RemoteError> {
        let mut url = Url::parse(&format!("{}/search/repositories", self.base_url))
            .map_err(|e| RemoteError::network(format!("invalid base url: {e}")))?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &per_page.to_string());
        Ok(url)
    }

    fn headers(&self) -> Headers {
        let mut headers: Headers = vec![
            (
                "Accept".to_string(),
                "application/vnd.github+json".to_string(),
            ),
            ("User-Agent".to_string(), "starboard".to_string()),
        ];
        if let Some(token) = &self.token {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }
        headers
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, RemoteError> {
        let response = self
            .transport
            .get(url, &self.headers())
            .await
            .map_err(|e: TransportError| RemoteError::network(e.to_string()))?;

        if !(200..300).contains(&response.status) {
            return Err(api_error(response.status, &response.body));
        }

        serde_json::from_slice(&response.body)
            .map_err(|e| RemoteError::api(response.status, format!("invalid response body: {e}")))
    }
}

/// Build an API error from a failure response, preferring the remote's own
/// `message` field when the body carries one.
fn api_error(status: u16, body: &[u8]) -> RemoteError {
    let message = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| format!("HTTP {status}"));
    RemoteError::api(status, message)
}
