use std::fmt;

/// Unified error type for catalog API and cache I/O operations
#[derive(Debug)]
pub enum TcgError {
    /// HTTP request failed (network error, timeout, etc.)
    Network(reqwest::Error),
    /// Failed to parse JSON response or cache blob
    Parse(serde_json::Error),
    /// HTTP error status code
    HttpStatus(reqwest::StatusCode),
    /// File I/O error
    Io(std::io::Error),
}

impl fmt::Display for TcgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TcgError::Network(e) => write!(f, "Network error: {}", e),
            TcgError::Parse(e) => write!(f, "Parse error: {}", e),
            TcgError::HttpStatus(status) => write!(f, "HTTP error: {}", status),
            TcgError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for TcgError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TcgError::Network(e) => Some(e),
            TcgError::Parse(e) => Some(e),
            TcgError::Io(e) => Some(e),
            TcgError::HttpStatus(_) => None,
        }
    }
}

impl From<reqwest::Error> for TcgError {
    fn from(err: reqwest::Error) -> Self {
        TcgError::Network(err)
    }
}

impl From<serde_json::Error> for TcgError {
    fn from(err: serde_json::Error) -> Self {
        TcgError::Parse(err)
    }
}

impl From<std::io::Error> for TcgError {
    fn from(err: std::io::Error) -> Self {
        TcgError::Io(err)
    }
}

/// Result type alias for catalog and cache operations
pub type TcgResult<T> = Result<T, TcgError>;
