use thiserror::Error;

pub type AiResult<T> = std::result::Result<T, AiError>;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("http error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("model returned no content")]
    EmptyCompletion,
    #[error("model returned malformed content: {0}")]
    MalformedCompletion(String),
}
