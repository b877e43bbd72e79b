//! Remote catalog access.
//!
//! The remote side is stateless: one page of a keyword search and one
//! single-item fetch. All HTTP I/O goes through the [`Transport`] seam so the
//! client can be exercised without sockets in tests.

mod client;
mod error;
pub mod transport;
pub mod types;

pub use client::SearchClient;
pub use error::RemoteError;
pub use transport::{ReqwestTransport, Transport, TransportError, TransportResponse};
