use thiserror::Error;

#[derive(Error, Debug)]
pub enum CipherForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Invalid Quadgram Asset: {0}")]
    InvalidAsset(String),

    #[error("Invalid Cipher Key: {0}")]
    InvalidKey(String),
}

pub type CfResult<T> = Result<T, CipherForgeError>;
