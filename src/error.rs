//! Error types for the library core

use thiserror::Error;

/// Numeric error codes handed to presentation layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NoSuchItem = 5,
    ItemNotAvailable = 7,
    ItemNotBorrowed = 13,
    ItemAlreadyExists = 16,
    BadValue = 18,
    UserIdentificationAlreadyExists = 19,
}

/// Main application error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Item with identifier {0} already exists")]
    DuplicateIdentifier(String),

    #[error("User {0} is already registered")]
    DuplicateUsername(String),

    #[error("Item {0} not found")]
    ItemNotFound(String),

    #[error("Item {0} is already lent")]
    AlreadyLent(String),

    #[error("Item {0} is not lent")]
    NotLent(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::DuplicateIdentifier(_) => ErrorCode::ItemAlreadyExists,
            AppError::DuplicateUsername(_) => ErrorCode::UserIdentificationAlreadyExists,
            AppError::ItemNotFound(_) => ErrorCode::NoSuchItem,
            AppError::AlreadyLent(_) => ErrorCode::ItemNotAvailable,
            AppError::NotLent(_) => ErrorCode::ItemNotBorrowed,
            AppError::Validation(_) => ErrorCode::BadValue,
            AppError::Internal(_) => ErrorCode::Failure,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
