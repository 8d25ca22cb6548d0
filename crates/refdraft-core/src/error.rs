//! Error types for refdraft-core.

use camino::Utf8PathBuf;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors reported by the generation pipeline, reference loading and export.
///
/// The pure transforms ([`crate::analyzer::analyze`],
/// [`crate::humanizer::humanize`], [`crate::detection::estimate_score`]) never
/// return these; they only surface at the pipeline and file boundaries.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// The reference text is empty or whitespace only.
    #[error("no reference text: upload a document or paste reference text first")]
    EmptyInput,

    /// The input exceeds the configured size limit.
    #[error("input too large: {size} bytes (limit: {limit} bytes)")]
    InputTooLarge {
        /// Size of the rejected input in bytes.
        size: usize,
        /// The configured limit in bytes.
        limit: usize,
    },

    /// The content is too short to check or export.
    #[error("insufficient content: {length} characters (need at least {minimum})")]
    InsufficientContent {
        /// Character count of the rejected content.
        length: usize,
        /// Minimum character count required.
        minimum: usize,
    },

    /// The reference file extension is not one of the accepted types.
    #[error("unsupported file type: {name}. Use a PDF, DOCX, or TXT file")]
    UnsupportedFileType {
        /// The rejected file name.
        name: String,
    },

    /// A reference file could not be read.
    #[error("failed to read {path}")]
    FileRead {
        /// Path that failed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An export file could not be written.
    #[error("failed to write {path}")]
    Write {
        /// Path that failed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Analysis or humanization failed unexpectedly.
    #[error("processing failed: {0}")]
    Processing(String),
}

/// Coarse error categories shown to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Empty, oversized, too short or wrongly typed input.
    InvalidInput,
    /// Reading or writing a file failed.
    FileReadFailure,
    /// Unexpected failure while processing.
    ProcessingFailure,
}

impl GenerationError {
    /// Returns the category this error belongs to.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInput
            | Self::InputTooLarge { .. }
            | Self::InsufficientContent { .. }
            | Self::UnsupportedFileType { .. } => ErrorKind::InvalidInput,
            Self::FileRead { .. } | Self::Write { .. } => ErrorKind::FileReadFailure,
            Self::Processing(_) => ErrorKind::ProcessingFailure,
        }
    }
}

/// Result type alias using [`GenerationError`].
pub type GenerationResult<T> = Result<T, GenerationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(GenerationError::EmptyInput.kind(), ErrorKind::InvalidInput);
        assert_eq!(
            GenerationError::InputTooLarge { size: 10, limit: 5 }.kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            GenerationError::FileRead {
                path: Utf8PathBuf::from("missing.txt"),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }
            .kind(),
            ErrorKind::FileReadFailure
        );
        assert_eq!(
            GenerationError::Processing("boom".into()).kind(),
            ErrorKind::ProcessingFailure
        );
    }

    #[test]
    fn too_large_message_names_limit() {
        let err = GenerationError::InputTooLarge { size: 10, limit: 5 };
        assert_eq!(err.to_string(), "input too large: 10 bytes (limit: 5 bytes)");
    }
}
