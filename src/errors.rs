//! Unified application error type.
//! Stores, flow and CLI all return AppError so that every failure can be
//! turned into the same kind of transient notice at the screen boundary.

use std::io;
use thiserror::Error;

use crate::core::forms::FieldErrors;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Preferences / session file
    // ---------------------------
    #[error("Preferences file error: {0}")]
    Prefs(#[from] serde_json::Error),

    // ---------------------------
    // Account logic
    // ---------------------------
    #[error("{0}")]
    Validation(FieldErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Background task failed: {0}")]
    Task(String),

    /// A screen refused the action and stayed put; the text is its notice.
    #[error("{0}")]
    Refused(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

/// The four kinds of failure a screen knows how to surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Storage,
    DuplicateEmail,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::DuplicateEmail(_) => ErrorKind::DuplicateEmail,
            AppError::Refused(_) => ErrorKind::Validation,
            _ => ErrorKind::Storage,
        }
    }

    /// Message shown to the user as a transient, dismissible notice.
    pub fn notice(&self) -> String {
        match self {
            AppError::Validation(fields) => fields.summary().to_string(),
            AppError::NotFound(_) => "Email not found!".to_string(),
            AppError::DuplicateEmail(_) => "Email already registered!".to_string(),
            AppError::Refused(notice) => notice.clone(),
            other => format!("Error: {}", other),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
