use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid word chain {chain:?}: {reason}")]
    InvalidChain { chain: Vec<String>, reason: String },
    #[error("terminal too small for the board: {width}x{height}")]
    SurfaceTooSmall { width: u16, height: u16 },
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
