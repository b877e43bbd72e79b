//! Transport boundary for all HTTP I/O.
//!
//! The catalog client only ever issues GET requests, so the seam is a single
//! method. Production uses [`ReqwestTransport`]; unit tests use the in-memory
//! [`MockTransport`] (no sockets, no loopback servers).

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// HTTP headers represented as key/value pairs.
pub type Headers = Vec<(String, String)>;

/// A minimal HTTP response: status plus raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// A request that never produced a response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport error: {0}")]
    Transport(String),

    #[cfg(test)]
    #[error("no mock response registered for GET {url}")]
    NoMockResponse { url: String },
}

/// Async GET seam. Timeouts live here, not in the callers.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, headers: &Headers) -> Result<TransportResponse, TransportError>;
}

/// A real HTTP transport backed by reqwest.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a transport whose requests fail with a transport error after
    /// `timeout`. Callers treat that like any other connectivity failure.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str, headers: &Headers) -> Result<TransportResponse, TransportError> {
        let mut builder = self.client.get(url);
        for (k, v) in headers {
            builder = builder.header(k, v);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| TransportError::Transport(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .map_err(|e| TransportError::Transport(e.to_string()))?
            .to_vec();

        Ok(TransportResponse { status, body })
    }
}

// ---------- Test-only mock transport ----------

#[cfg(test)]
pub(crate) mod mock {
    use super::*;

    use std::collections::{HashMap, VecDeque};
    use std::sync::{Arc, Mutex};

    /// In-memory mock transport.
    ///
    /// Responses are registered per URL and returned in FIFO order; every
    /// request is recorded so tests can assert on exactly what was sent.
    #[derive(Clone, Default)]
    pub struct MockTransport {
        inner: Arc<Mutex<MockTransportInner>>,
    }

    #[derive(Default)]
    struct MockTransportInner {
        routes: HashMap<String, VecDeque<TransportResponse>>,
        requests: Vec<String>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Register a response for a URL.
        pub fn push_response(&self, url: impl Into<String>, status: u16, body: impl Into<Vec<u8>>) {
            let mut inner = self
                .inner
                .lock()
                .expect("mock transport lock should not be poisoned");
            inner
                .routes
                .entry(url.into())
                .or_default()
                .push_back(TransportResponse {
                    status,
                    body: body.into(),
                });
        }

        /// URLs of every request sent through this transport, in order.
        #[must_use]
        pub fn requests(&self) -> Vec<String> {
            let inner = self
                .inner
                .lock()
                .expect("mock transport lock should not be poisoned");
            inner.requests.clone()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn get(
            &self,
            url: &str,
            _headers: &Headers,
        ) -> Result<TransportResponse, TransportError> {
            let mut inner = self
                .inner
                .lock()
                .expect("mock transport lock should not be poisoned");
            inner.requests.push(url.to_string());

            match inner.routes.get_mut(url).and_then(|q| q.pop_front()) {
                Some(resp) => Ok(resp),
                None => Err(TransportError::NoMockResponse {
                    url: url.to_string(),
                }),
            }
        }
    }
}
