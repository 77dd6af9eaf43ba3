use cpath::api::RequestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid settings file: {0}")]
    Config(#[from] toml::de::Error),
    #[error(transparent)]
    Request(#[from] RequestError),
}
