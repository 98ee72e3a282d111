//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Resource not found
    NotFound,
    /// Request rejected before reaching storage
    Validation {
        /// Entity name reported back to the client (e.g. `course`)
        entity: &'static str,
        /// Machine-readable key (e.g. `idexists`)
        key: &'static str,
        message: String,
    },
    /// Database/persistence error, including constraint violations
    Storage(String),
}

impl DomainError {
    pub fn validation(entity: &'static str, key: &'static str, message: impl Into<String>) -> Self {
        DomainError::Validation {
            entity,
            key,
            message: message.into(),
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NotFound => write!(f, "Resource not found"),
            DomainError::Validation {
                entity,
                key,
                message,
            } => write!(f, "Validation error on {} ({}): {}", entity, key, message),
            DomainError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Storage(e.to_string())
    }
}
