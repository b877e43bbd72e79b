use thiserror::Error;

/// Errors that can occur when talking to the remote catalog.
///
/// The two variants are deliberately distinguishable: `Network` means the
/// request never produced a response (no connectivity, DNS failure, transport
/// timeout), `Api` means the remote answered with a failure status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// Transport or connectivity failure.
    #[error("network error: {message}")]
    Network { message: String },

    /// The remote rejected the request.
    #[error("API error: HTTP {status}: {message}")]
    Api { status: u16, message: String },
}

impl RemoteError {
    /// Create a network error.
    #[inline]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create an API error.
    #[inline]
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Check whether this is a connectivity failure (as opposed to a remote
    /// rejection).
    #[inline]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// The HTTP status, when the remote actually answered.
    #[inline]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Network { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_and_api_are_distinguishable() {
        let net = RemoteError::network("connection refused");
        assert!(net.is_network());
        assert_eq!(net.status(), None);

        let api = RemoteError::api(422, "Validation Failed");
        assert!(!api.is_network());
        assert_eq!(api.status(), Some(422));
        assert!(api.to_string().contains("422"));
        assert!(api.to_string().contains("Validation Failed"));
    }
}
