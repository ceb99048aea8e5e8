use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChiTieuError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown wallet: {0}")]
    UnknownWallet(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown transaction: {0}")]
    UnknownTransaction(i64),

    #[error("Unknown icon: {0}")]
    UnknownIcon(String),

    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, ChiTieuError>;
