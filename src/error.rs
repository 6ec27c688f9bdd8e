use reqwest::StatusCode;

/// Failures talking to the upstream submissions API. Every variant is
/// recovered at the call site and surfaced to the user as a transient
/// notice; none of them takes the portal down.
#[derive(Debug)]
pub enum ApiError {
    /// The request never completed: DNS failure, refused connection, reset.
    Transport(reqwest::Error),
    /// The upstream answered with a non-success status.
    Status(StatusCode),
    /// The upstream answered 2xx but the body did not decode into the
    /// expected shape (a record without an identifier lands here).
    MalformedBody(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport(err) => write!(f, "Transport error: {err}"),
            ApiError::Status(status) => write!(f, "Upstream returned {status}"),
            ApiError::MalformedBody(msg) => write!(f, "Malformed response body: {msg}"),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err)
    }
}
