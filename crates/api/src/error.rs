#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Status code: {0}")]
    StatusCode(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
