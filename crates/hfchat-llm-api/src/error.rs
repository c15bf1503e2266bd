use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Failures talking to the inference service.
///
/// Every variant is terminal for the turn that produced it; nothing here is
/// retried.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to inference service failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("inference service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response stream interrupted: {0}")]
    Stream(#[source] reqwest::Error),

    #[error("inference service reported an error: {0}")]
    Remote(String),

    #[error("malformed stream event: {source} (payload: {payload})")]
    Decode {
        payload: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// HTTP status of the failed call, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Request(e) | ApiError::Stream(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for 401/403, which usually means a bad or expired token
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }
}
