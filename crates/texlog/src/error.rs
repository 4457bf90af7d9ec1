use thiserror::Error;

/// Failures while loading [`ParseOptions`](crate::ParseOptions) from
/// configuration. Parsing a log itself never fails.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("invalid options document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("wrap width must be at least 2 columns, got {0}")]
    InvalidWrapWidth(usize),
}
