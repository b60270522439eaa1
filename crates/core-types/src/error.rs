use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Amount overflow while accumulating {0}")]
    Overflow(String),

    #[error("Failed to parse data bundle: {0}")]
    Parse(#[from] serde_json::Error),
}
