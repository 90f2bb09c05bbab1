/// Everything that can go wrong talking to the activities backend.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BoardError {
    /// The fetch rejected, or the body could not be read.
    #[error("request to {url} failed: {reason}")]
    Network { url: String, reason: String },

    /// Non-2xx response. `detail` is the server's explanation, if it sent one.
    #[error("server answered {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Server { status: u16, detail: Option<String> },

    /// The body was not the JSON we expected.
    #[error("malformed response: {reason}")]
    Malformed { reason: String },
}

impl BoardError {
    /// Text shown to the user. `generic` covers failures the server did not explain.
    pub fn notice_text(&self, generic: &str) -> String {
        match self {
            BoardError::Server {
                detail: Some(detail),
                ..
            } => detail.clone(),
            BoardError::Server { detail: None, .. } => "An error occurred".to_string(),
            BoardError::Network { .. } | BoardError::Malformed { .. } => generic.to_string(),
        }
    }
}

impl From<serde_json::Error> for BoardError {
    fn from(e: serde_json::Error) -> Self {
        BoardError::Malformed {
            reason: e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BoardError>;
