use thiserror::Error;

/// Failure of a single call to an upstream service.
///
/// Callers in the resolution pipeline never propagate these past the
/// component boundary; they downgrade them to "no data from this source".
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid endpoint URL \"{url}\": {reason}")]
    InvalidEndpoint { url: String, reason: String },
}

impl LookupError {
    /// Short failure-kind label for structured log fields.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Http(_) => "network",
            Self::UnexpectedStatus { .. } => "status",
            Self::Deserialize { .. } => "parse",
            Self::InvalidEndpoint { .. } => "config",
        }
    }
}
