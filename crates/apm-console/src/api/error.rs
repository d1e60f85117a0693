/// Failure of a single remote call.
///
/// The variants keep enough detail for logs; callers collapse them into a
/// per-operation message before anything reaches the user.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request to remote API failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("remote API answered {status} for {url}")]
    Status { status: u16, url: String },
    #[error("unexpected response body: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("invalid API url: {0}")]
    Url(#[from] url::ParseError),
}
