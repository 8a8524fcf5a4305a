use thiserror::Error;

#[derive(Error, Debug)]
pub enum SalonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Validation(String),

    #[error("Employee not found: {0}")]
    EmployeeNotFound(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SalonError>;
