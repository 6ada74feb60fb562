//! Error types for rtfprint library.

use std::io;
use thiserror::Error;

/// Result type alias for rtfprint operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while decoding or paginating a document.
///
/// Malformed group nesting and truncated control words are tolerated by the
/// parser and never show up here; they are only written to the log.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input does not start with an RTF header.
    #[error("Unknown file format: not a valid RTF document")]
    UnknownFormat,

    /// The RTF header is present but unusable.
    #[error("RTF format error: {0}")]
    Format(String),

    /// The requested output medium is not in the paper size table.
    #[error("Unknown output medium: {0}")]
    UnknownMedium(String),

    /// Page geometry leaves no room for content.
    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),

    /// Encoding error.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Error during rendering (text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error belongs to the format family (bad header or
    /// unrecognized medium).
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Error::UnknownFormat | Error::Format(_) | Error::UnknownMedium(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownFormat;
        assert_eq!(
            err.to_string(),
            "Unknown file format: not a valid RTF document"
        );

        let err = Error::UnknownMedium("quarto".to_string());
        assert_eq!(err.to_string(), "Unknown output medium: quarto");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_format_family() {
        assert!(Error::UnknownFormat.is_format_error());
        assert!(Error::UnknownMedium("x".into()).is_format_error());
        assert!(!Error::InvalidGeometry("x".into()).is_format_error());
    }
}
