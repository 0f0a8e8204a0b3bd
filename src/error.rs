//! Error taxonomy for catalog operations.
//!
//! Every business-rule rejection and persistence failure surfaces as a
//! `CatalogError`; `anyhow` is used only at the CLI boundary.

use std::path::PathBuf;

use thiserror::Error;

use crate::library::BookStatus;

/// Errors raised by the catalog core
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A required field was empty or whitespace-only
    #[error("{field} must not be blank")]
    InvalidInput { field: &'static str },

    /// Illegal lending-state transition (issue an issued book, return an available one)
    #[error("Book {isbn} is already {current}")]
    InvalidState { isbn: String, current: BookStatus },

    /// A book with this ISBN is already in the catalog
    #[error("A book with ISBN {isbn} already exists")]
    DuplicateIsbn { isbn: String },

    /// No book with this ISBN where one was required
    #[error("No book with ISBN {isbn}")]
    NotFound { isbn: String },

    /// A persisted entry is missing a field or holds an unrecognized status
    #[error("Malformed catalog entry: {reason}")]
    MalformedRecord { reason: String },

    /// The catalog file could not be read, parsed, or written
    #[error("Catalog persistence failed for {}: {reason}", .path.display())]
    Persistence {
        path: PathBuf,
        reason: String,
        #[source]
        source: Option<std::io::Error>,
    },
}

impl CatalogError {
    /// Persistence failure without an I/O source (corruption, bad version)
    pub fn persistence(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Persistence {
            path: path.into(),
            reason: reason.into(),
            source: None,
        }
    }

    /// Persistence failure wrapping an I/O error
    pub fn persistence_io(
        path: impl Into<PathBuf>,
        reason: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::Persistence {
            path: path.into(),
            reason: reason.into(),
            source: Some(source),
        }
    }
}

/// Convenience alias for catalog results
pub type Result<T, E = CatalogError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_isbn() {
        let err = CatalogError::DuplicateIsbn {
            isbn: "9781593279288".to_string(),
        };
        assert!(err.to_string().contains("9781593279288"));

        let err = CatalogError::NotFound {
            isbn: "0000000000".to_string(),
        };
        assert!(err.to_string().contains("0000000000"));
    }

    #[test]
    fn test_invalid_state_message_names_current_status() {
        let err = CatalogError::InvalidState {
            isbn: "123".to_string(),
            current: BookStatus::Issued,
        };
        assert!(err.to_string().contains("issued"));
    }

    #[test]
    fn test_persistence_error_carries_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = CatalogError::persistence_io("/tmp/catalog.json", "write failed", io);
        assert!(std::error::Error::source(&err).is_some());

        let err = CatalogError::persistence("/tmp/catalog.json", "duplicate ISBN");
        assert!(std::error::Error::source(&err).is_none());
    }
}
