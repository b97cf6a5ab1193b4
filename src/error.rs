use thiserror::Error;

#[derive(Debug, Error)]
pub enum DlHubError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("cannot extract media id from url: {0}")]
    UnextractableId(String),
    #[error("malformed data island: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DlHubError>;
