//! Error types for the inventory store
//!
//! [`ErrorDetail`] is the serializable form handed to the browser.

use serde::Serialize;
use thiserror::Error;

use crate::validation::FieldErrors;

/// Store operation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(FieldErrors),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Error: No se puede eliminar la categoría porque está siendo utilizada por una o más materias primas.")]
    CategoryInUse { name: String },
}

/// Session storage backend failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage write failed for key {key}: {message}")]
    Write { key: String, message: String },

    #[error("Storage read failed for key {key}: {message}")]
    Read { key: String, message: String },
}

/// Serializable error body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<FieldErrors>,
}

impl ErrorDetail {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            field_errors: None,
        }
    }
}

impl From<&StoreError> for ErrorDetail {
    fn from(err: &StoreError) -> Self {
        match err {
            StoreError::Validation(fields) => ErrorDetail {
                code: "VALIDATION_ERROR".to_string(),
                message: err.to_string(),
                field_errors: Some(fields.clone()),
            },
            StoreError::NotFound { .. } => ErrorDetail::new("NOT_FOUND", err.to_string()),
            StoreError::CategoryInUse { .. } => {
                ErrorDetail::new("CATEGORY_IN_USE", err.to_string())
            }
        }
    }
}

impl From<FieldErrors> for StoreError {
    fn from(fields: FieldErrors) -> Self {
        StoreError::Validation(fields)
    }
}
