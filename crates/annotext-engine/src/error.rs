use thiserror::Error;

/// Errors produced while constructing an [`AnnotatedText`](crate::AnnotatedText).
///
/// Editing operations (`add_markup`, `replace`, `substr`, ...) never fail;
/// only construction from untrusted input does.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown markup type: {0}")]
    UnknownMarkupType(i64),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
