use thiserror::Error;

pub type ExplorerResult<T> = Result<T, ExplorerError>;

#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid distribution parameters: {0}")]
    InvalidParameters(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("distribution construction failed: {0}")]
    Distribution(String),
}
