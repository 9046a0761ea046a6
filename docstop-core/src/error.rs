//! Error types
//!
//! The check itself never fails; errors only come from the edges of the
//! crate: loading configuration and reading markup text.

use thiserror::Error;

/// Malformed documentation markup, with the absolute offset of the problem
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    /// The text ended inside a tag, attribute or comment
    #[error("unexpected end of markup at offset {offset}")]
    UnexpectedEof {
        /// Offset where more input was expected
        offset: usize,
    },

    /// A tag could not be parsed
    #[error("malformed tag at offset {offset}")]
    MalformedTag {
        /// Offset of the tag's `<`
        offset: usize,
    },

    /// An end tag does not match the innermost open element
    #[error("expected </{expected}> but found </{found}> at offset {offset}")]
    MismatchedTag {
        /// Tag of the innermost open element
        expected: String,
        /// Tag that was closed instead
        found: String,
        /// Offset of the end tag
        offset: usize,
    },

    /// An end tag appeared with no open element
    #[error("closing tag </{tag}> at offset {offset} has no opening tag")]
    UnexpectedClose {
        /// Tag that was closed
        tag: String,
        /// Offset of the end tag
        offset: usize,
    },

    /// An element is still open at the end of the text
    #[error("element <{tag}> opened at offset {offset} is never closed")]
    Unclosed {
        /// Tag of the open element
        tag: String,
        /// Offset of its start tag
        offset: usize,
    },

    /// Markup the reader deliberately does not handle
    #[error("{what} at offset {offset} is not supported")]
    Unsupported {
        /// Kind of construct
        what: &'static str,
        /// Offset of the construct
        offset: usize,
    },
}

impl ReadError {
    /// Absolute offset the error points at
    pub fn offset(&self) -> usize {
        match self {
            ReadError::UnexpectedEof { offset }
            | ReadError::MalformedTag { offset }
            | ReadError::MismatchedTag { offset, .. }
            | ReadError::UnexpectedClose { offset, .. }
            | ReadError::Unclosed { offset, .. }
            | ReadError::Unsupported { offset, .. } => *offset,
        }
    }
}

/// Errors raised by configuration loading and markup reading
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration values
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Configuration text is not valid TOML for the expected schema
    #[error("Invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    /// Reading a file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Markup could not be read
    #[error("Markup error: {0}")]
    Read(#[from] ReadError),
}

/// Result type for fallible operations
pub type Result<T> = std::result::Result<T, Error>;
