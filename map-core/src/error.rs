use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown draw mode `{0}`")]
    UnknownDrawMode(String),
    #[error("invalid map config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
