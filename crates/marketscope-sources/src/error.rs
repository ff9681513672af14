use marketscope_core::CapabilityError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid feed URL {url}: {reason}")]
    InvalidFeedUrl { url: String, reason: String },
}

impl From<SourceError> for CapabilityError {
    fn from(e: SourceError) -> Self {
        const CAPABILITY: &str = "news feed";
        match e {
            SourceError::Http(e) if e.is_timeout() => CapabilityError::Timeout {
                capability: CAPABILITY,
            },
            SourceError::Http(e) => CapabilityError::Request {
                capability: CAPABILITY,
                message: e.to_string(),
            },
            SourceError::Xml(e) => CapabilityError::Malformed {
                capability: CAPABILITY,
                message: e.to_string(),
            },
            SourceError::UnexpectedStatus { status, .. } => CapabilityError::Status {
                capability: CAPABILITY,
                status,
            },
            err @ SourceError::InvalidFeedUrl { .. } => CapabilityError::Request {
                capability: CAPABILITY,
                message: err.to_string(),
            },
        }
    }
}
