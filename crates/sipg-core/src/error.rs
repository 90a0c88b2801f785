use thiserror::Error;

/// Result type alias for sipg operations
pub type Result<T> = std::result::Result<T, SipgError>;

/// Errors that can occur while searching or managing credentials
#[derive(Error, Debug)]
pub enum SipgError {
    /// No API key is configured
    #[error("no API key configured, run `sipg configure` to set one")]
    NotConfigured,

    /// A request to the search API failed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Configuration or credential store error
    #[error("configuration error: {0}")]
    Config(String),

    /// Local I/O failure (output file, credential file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SipgError {
    /// Returns true if the error is due to missing credentials
    #[must_use]
    pub const fn is_not_configured(&self) -> bool {
        matches!(self, Self::NotConfigured)
    }

    /// Returns the transport failure, if this is one
    #[must_use]
    pub const fn as_transport(&self) -> Option<&TransportError> {
        match self {
            Self::Transport(err) => Some(err),
            _ => None,
        }
    }
}

/// Failures of a single request against the remote API
#[derive(Error, Debug)]
pub enum TransportError {
    /// Authentication failed - invalid API key
    #[error("authentication failed: invalid API key")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("rate limit exceeded")]
    RateLimited,

    /// API returned a non-success status
    #[error("API error ({code}): {message}")]
    Status {
        /// HTTP status code
        code: u16,
        /// Error message from the API
        message: String,
    },

    /// Request timed out
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Connection failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// Any other request failure
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The response body was not the expected JSON
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl TransportError {
    /// Returns true if retrying the same request may succeed
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited | Self::Timeout(_) | Self::Connection(_) => true,
            Self::Status { code, .. } => *code >= 500,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}
