//! Error types for the catalog core

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// Stable error codes handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(u32)]
pub enum ErrorCode {
    NotAuthorized = 2,
    StoreFailure = 3,
    NoSuchData = 5,
    BadValue = 18,
    InvalidTransition = 22,
    InvalidState = 23,
    InvalidRenewalDate = 24,
}

/// Which side of the renewal window a requested date falls outside of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RenewalBound {
    /// Requested date is today or earlier
    Past,
    /// Requested date is later than today plus the renewal horizon
    BeyondHorizon { latest: NaiveDate },
}

impl std::fmt::Display for RenewalBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenewalBound::Past => write!(f, "renewal in past"),
            RenewalBound::BeyondHorizon { latest } => {
                write!(f, "renewal later than {}", latest)
            }
        }
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Invalid date {requested} - {bound}")]
    InvalidRenewalDate {
        bound: RenewalBound,
        requested: NaiveDate,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store failure: {0}")]
    StoreFailure(String),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::NotFound(_) => ErrorCode::NoSuchData,
            AppError::InvalidTransition(_) => ErrorCode::InvalidTransition,
            AppError::InvalidState(_) => ErrorCode::InvalidState,
            AppError::InvalidRenewalDate { .. } => ErrorCode::InvalidRenewalDate,
            AppError::Unauthorized(_) => ErrorCode::NotAuthorized,
            AppError::Validation(_) => ErrorCode::BadValue,
            AppError::StoreFailure(_) => ErrorCode::StoreFailure,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", e);
        AppError::StoreFailure(e.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        tracing::error!("Migration error: {:?}", e);
        AppError::StoreFailure(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
