use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("request failed with status {status}")]
    Rejected { status: u16, detail: Option<String> },

    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),

    #[error(transparent)]
    SerdeJSONError(#[from] serde_json::Error),

    #[error(transparent)]
    URLParseError(#[from] url::ParseError),

    #[error("base url cannot carry a path")]
    InvalidBaseURL,

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl Error {
    /// Message supplied by the server, if the exchange got that far.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Error::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}
