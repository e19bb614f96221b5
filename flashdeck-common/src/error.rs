//! Error type shared by the flashdeck crates

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Creating the database directory or reading the config file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// No card with this id; carries the id, not a message
    #[error("Flashcard not found: {0}")]
    CardNotFound(String),

    /// Request content failed validation; the text is shown to the client
    #[error("{0}")]
    InvalidInput(String),
}

impl Error {
    /// True when the error came from the client's input rather than the server
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::CardNotFound(_) | Error::InvalidInput(_))
    }
}
