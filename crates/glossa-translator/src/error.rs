#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// Endpoint answered with a non-success status
    #[error("Translation API Error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    Parse(String),
}

impl TranslateError {
    pub fn status(&self) -> Option<u16> {
        match self {
            TranslateError::Api { status, .. } => Some(*status),
            TranslateError::Network(e) => e.status().map(|s| s.as_u16()),
            TranslateError::Parse(_) => None,
        }
    }
}
