use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrewlogError {
    #[error("{0}")]
    Validation(String),

    #[error("Batches are still loading; try again once the store is ready")]
    NotReady,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl BrewlogError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// True for failures the user can fix by changing their input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, BrewlogError>;
