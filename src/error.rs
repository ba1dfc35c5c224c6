//! Error types and result type for the tmx-sort crate.
//!
//! This module defines all error variants that can occur while loading,
//! sorting and writing a TMX document. It uses the `snafu` library for
//! ergonomic error handling with automatic backtrace capture.
//!
//! # Examples
//!
//! ```
//! use tmx_sort::{Result, TmxError};
//!
//! fn load_memory() -> Result<String> {
//!     Err(TmxError::invalid_parameter("Input path cannot be empty"))
//! }
//!
//! match load_memory() {
//!     Ok(data) => println!("Success: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```
//!
//! # Error Variants
//!
//! - [`TmxError::Io`]: I/O errors from stream operations
//! - [`TmxError::OpenInput`]: The input file is missing or unreadable
//! - [`TmxError::WriteOutput`]: The output file could not be written
//! - [`TmxError::ParserError`]: Malformed XML reported by the XML layer
//! - [`TmxError::InvalidDataFormat`]: Well-formed XML with content we cannot map
//! - [`TmxError::UnexpectedRoot`]: The document root is not `<tmx>`
//! - [`TmxError::MissingVariant`]: A translation unit without any `<tuv>`

use std::io;
use std::path::PathBuf;

use snafu::{Backtrace, Snafu};

// Re-export snafu for context providers
pub use snafu;

/// Main error type for the tmx-sort crate.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum TmxError {
    /// I/O error occurred during stream operations.
    #[snafu(display("IO error: {source}"))]
    Io {
        source: io::Error,
        backtrace: Backtrace,
    },

    /// The input document could not be opened or read.
    #[snafu(display("Error opening file {}: {source}", path.display()))]
    OpenInput {
        path: PathBuf,
        source: io::Error,
        backtrace: Backtrace,
    },

    /// The output document could not be written.
    #[snafu(display("Error writing file {}: {source}", path.display()))]
    WriteOutput {
        path: PathBuf,
        source: io::Error,
        backtrace: Backtrace,
    },

    /// Malformed XML reported by the XML parser.
    #[snafu(display("Parser error at byte {position}: {source}"))]
    ParserError {
        position: u64,
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
        backtrace: Backtrace,
    },

    /// The XML is well-formed but its content does not fit the TMX model.
    #[snafu(display("Invalid data format: {message}"))]
    InvalidDataFormat {
        message: String,
        backtrace: Backtrace,
    },

    /// The root element is something other than `<tmx>`.
    #[snafu(display("Expected element type <tmx> but have <{found}>"))]
    UnexpectedRoot {
        found: String,
        backtrace: Backtrace,
    },

    /// A translation unit has no variants, so it has no sort key.
    #[snafu(display(
        "Translation unit #{index}{} has no <tuv> variants",
        tuid.as_deref().map(|id| format!(" (tuid {id})")).unwrap_or_default()
    ))]
    MissingVariant {
        index: usize,
        tuid: Option<String>,
        backtrace: Backtrace,
    },

    /// Function was called with invalid parameters.
    #[snafu(display("Invalid parameter: {message}"))]
    InvalidParameter {
        message: String,
        backtrace: Backtrace,
    },
}

// For automatic conversions from standard error types
impl From<io::Error> for TmxError {
    fn from(source: io::Error) -> Self {
        Self::Io { source, backtrace: Backtrace::capture() }
    }
}

impl From<std::string::FromUtf8Error> for TmxError {
    fn from(source: std::string::FromUtf8Error) -> Self {
        Self::InvalidDataFormat { message: format!("Invalid UTF-8 (String): {}", source), backtrace: Backtrace::capture() }
    }
}

/// Helper methods for creating errors without context providers.
impl TmxError {
    /// Creates an `InvalidParameter` error with the given message.
    ///
    /// # Examples
    ///
    /// ```
    /// use tmx_sort::TmxError;
    ///
    /// let error = TmxError::invalid_parameter("Path cannot be empty");
    /// ```
    pub fn invalid_parameter<S: Into<String>>(message: S) -> Self {
        Self::InvalidParameter {
            message: message.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates an `InvalidDataFormat` error with the given message.
    pub fn invalid_data_format<S: Into<String>>(message: S) -> Self {
        Self::InvalidDataFormat {
            message: message.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates a `ParserError` for a failure at byte `position` of the input.
    pub fn parser_error<E>(position: u64, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        Self::ParserError {
            position,
            source: source.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates an `UnexpectedRoot` error for the element name that was found.
    pub fn unexpected_root<S: Into<String>>(found: S) -> Self {
        Self::UnexpectedRoot {
            found: found.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates a `MissingVariant` error for the unit at `index`.
    pub fn missing_variant(index: usize, tuid: Option<String>) -> Self {
        Self::MissingVariant {
            index,
            tuid,
            backtrace: Backtrace::capture(),
        }
    }

    /// Checks if this error is a `MissingVariant` variant.
    pub fn is_missing_variant(&self) -> bool {
        matches!(self, TmxError::MissingVariant { .. })
    }
}

/// A specialized `Result` type for tmx-sort operations.
///
/// This is a convenience type alias that uses [`TmxError`] as the error type.
pub type Result<T> = std::result::Result<T, TmxError>;
