//! Simulated-call error types and classification.

/// Failure categories, matched by substring on the underlying message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Auth,
    RateLimit,
    Server,
    Unknown,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Network => "network",
            ErrorKind::Auth => "auth",
            ErrorKind::RateLimit => "rate_limit",
            ErrorKind::Server => "server",
            ErrorKind::Unknown => "unknown",
        }
    }
}

/// A classified API failure. At most one is retained by the simulator at a
/// time; a new error replaces the previous one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ApiError {
    /// Classify a raw error message by substring.
    pub fn classify(message: impl Into<String>) -> Self {
        let message = message.into();
        let kind = if message.contains("401") {
            ErrorKind::Auth
        } else if message.contains("429") {
            ErrorKind::RateLimit
        } else if message.contains("network") {
            ErrorKind::Network
        } else if message.contains("server") {
            ErrorKind::Server
        } else {
            ErrorKind::Unknown
        };
        Self { kind, message }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.kind.as_str())
    }
}

impl std::error::Error for ApiError {}

/// Errors from a simulated completion.
#[derive(Clone, Debug)]
pub enum ChatError {
    /// The request was cancelled by the caller.
    Cancelled,
    Api(ApiError),
}

impl std::fmt::Display for ChatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatError::Cancelled => write!(f, "Request cancelled"),
            ChatError::Api(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ChatError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_401_as_auth() {
        let err = ApiError::classify("Request failed with status 401 Unauthorized");
        assert_eq!(err.kind, ErrorKind::Auth);
    }

    #[test]
    fn classify_429_as_rate_limit() {
        let err = ApiError::classify("429 Too Many Requests");
        assert_eq!(err.kind, ErrorKind::RateLimit);
    }

    #[test]
    fn classify_network_as_network() {
        let err = ApiError::classify("network unreachable");
        assert_eq!(err.kind, ErrorKind::Network);
    }

    #[test]
    fn classify_server_as_server() {
        let err = ApiError::classify("internal server error");
        assert_eq!(err.kind, ErrorKind::Server);
    }

    #[test]
    fn classify_anything_else_as_unknown() {
        let err = ApiError::classify("something odd happened");
        assert_eq!(err.kind, ErrorKind::Unknown);
        assert_eq!(err.message, "something odd happened");
    }

    #[test]
    fn status_code_wins_over_generic_words() {
        // "401" is checked before "server", matching the upstream ordering.
        let err = ApiError::classify("server said 401");
        assert_eq!(err.kind, ErrorKind::Auth);
    }
}
