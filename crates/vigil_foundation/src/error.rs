//! Error types for Vigil.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::types::Type;

/// The main error type for Vigil operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: Type, actual: Type) -> Self {
        Self::new(ErrorKind::TypeMismatch { expected, actual })
    }

    /// Creates an error for a value that is neither a sequence nor keyed.
    #[must_use]
    pub fn unclassifiable(actual: Type) -> Self {
        Self::new(ErrorKind::Unclassifiable(actual))
    }

    /// Creates an error for a key the container cannot be addressed by.
    #[must_use]
    pub fn unsupported_key(key: impl Into<String>, container: &'static str) -> Self {
        Self::new(ErrorKind::UnsupportedKey {
            key: key.into(),
            container,
        })
    }

    /// Creates a missing key error.
    #[must_use]
    pub fn missing_key() -> Self {
        Self::new(ErrorKind::MissingKey)
    }

    /// Creates an index out of bounds error.
    #[must_use]
    pub fn index_out_of_bounds(index: usize, length: usize) -> Self {
        Self::new(ErrorKind::IndexOutOfBounds { index, length })
    }

    /// Creates an error for removing an element other than the last.
    #[must_use]
    pub fn not_last_index(index: usize, length: usize) -> Self {
        Self::new(ErrorKind::NotLastIndex { index, length })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A value of the wrong type was supplied.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected type.
        expected: Type,
        /// The actual type encountered.
        actual: Type,
    },

    /// The value cannot be tracked as either a sequence or a keyed container.
    #[error("cannot track a {0}: expected a vec or map")]
    Unclassifiable(Type),

    /// The key is not usable with this container.
    #[error("unsupported key {key} for {container} container")]
    UnsupportedKey {
        /// Rendering of the rejected key.
        key: String,
        /// The container kind that rejected it.
        container: &'static str,
    },

    /// A key is required but none was given.
    #[error("a key is required to remove from a keyed container")]
    MissingKey,

    /// Index past the end of a sequence.
    #[error("index out of bounds: {index} (length {length})")]
    IndexOutOfBounds {
        /// The index that was accessed.
        index: usize,
        /// The actual length of the sequence.
        length: usize,
    },

    /// Only the last element of a sequence can be removed.
    #[error("cannot remove index {index}: only the last element (of {length}) is removable")]
    NotLastIndex {
        /// The index that was requested.
        index: usize,
        /// The actual length of the sequence.
        length: usize,
    },
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Label of the container that raised the error.
    pub source: Option<String>,
    /// Operations that were running, outermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source label.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
