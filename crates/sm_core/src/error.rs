use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid event payload: {0}")]
    InvalidEventPayload(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
