//! Error types for the Startpage plugin.
//!
//! This module defines the centralized error type [`StartpageError`] and a type alias
//! [`Result`] used throughout the crate. All variants derive their `Error` and
//! `Display` implementations through `thiserror`.

use thiserror::Error;

/// The main error type for Startpage operations.
///
/// Most failures in this crate are recoverable: storage problems fall back to
/// defaults and import problems are reported to the user as notices. This type
/// carries the details up to the point where that decision is made.
///
/// # Examples
///
/// ```
/// use startpage::StartpageError;
///
/// fn validate_import() -> Result<(), StartpageError> {
///     Err(StartpageError::Import("expected a JSON object".to_string()))
/// }
///
/// assert!(validate_import().is_err());
/// ```
#[derive(Debug, Error)]
pub enum StartpageError {
    /// Storage operation failed.
    ///
    /// Occurs when a storage bucket cannot be read, written, or removed for a
    /// reason other than plain I/O.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An import file was rejected before any state was touched.
    ///
    /// The string describes why the file is not a valid export document.
    #[error("Import error: {0}")]
    Import(String),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),
}

/// A specialized `Result` type for Startpage operations.
pub type Result<T> = std::result::Result<T, StartpageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert() {
        fn open() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }

        let err = open().expect_err("io error should propagate");
        assert!(matches!(err, StartpageError::Io(_)));
        assert_eq!(err.to_string(), "IO error: gone");
    }

    #[test]
    fn import_error_message() {
        let err = StartpageError::Import("not an object".to_string());
        assert_eq!(err.to_string(), "Import error: not an object");
    }
}
