use thiserror::Error;

/// Failure on the remote generation path.
///
/// Never escapes the service: every variant triggers the synthetic fallback.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no API key configured for the generation endpoint")]
    MissingCredential,

    /// Carries no URL: the request URL holds the API key.
    #[error("request to the generation endpoint failed: {0}")]
    Http(reqwest::Error),

    #[error("generation endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response format: {0}")]
    UnexpectedShape(String),

    #[error("generated text is not a valid question batch: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Http(err.without_url())
    }
}

/// The one error the sourcing service surfaces to callers.
#[derive(Debug, Error)]
pub enum SourcingError {
    #[error("could not fetch questions: {0}")]
    Exhausted(String),
}
