//! Error types for datacite-rs
//!
//! This module defines all error types used throughout the library.
//! Mapping errors (wrong shapes, missing required sub-fields) are kept
//! distinct from schema violations reported by validators.

use std::fmt;
use thiserror::Error;

/// Result type alias using the datacite Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for datacite operations
#[derive(Error, Debug)]
pub enum Error {
    /// A field value has the wrong JSON shape for its mapper
    #[error("type mismatch at '{path}': expected {expected}, found {found}")]
    TypeMismatch {
        /// Location of the offending value, e.g. `creators` or `dates[2]`
        path: String,
        /// Shape the mapper expects
        expected: &'static str,
        /// Shape that was supplied
        found: &'static str,
    },

    /// An entry lacks a sub-field the schema mandates
    #[error("missing required field '{field}' in '{path}'")]
    MissingField {
        /// Name of the missing JSON key
        field: String,
        /// Entry that lacks it, e.g. `dates[0]`
        path: String,
    },

    /// Schema violations reported by a validator
    #[error("validation error: {0}")]
    Validation(#[from] Violations),

    /// Value error (well-shaped but unusable input)
    #[error("value error: {0}")]
    Value(String),

    /// Namespace error
    #[error("namespace error: {0}")]
    Namespace(String),

    /// Decoding error (XML to record conversion)
    #[error("decoding error: {0}")]
    Decode(String),

    /// XML parsing error
    #[error("XML parse error: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// XML writing error
    #[error("XML write error: {0}")]
    XmlWrite(#[from] quick_xml::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Serialized output was not valid UTF-8
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl Error {
    /// Create a type mismatch error
    pub fn type_mismatch(
        path: impl Into<String>,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Error::TypeMismatch {
            path: path.into(),
            expected,
            found,
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>, path: impl Into<String>) -> Self {
        Error::MissingField {
            field: field.into(),
            path: path.into(),
        }
    }

    /// Returns the violations if this is a validation error
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Error::Validation(v) => Some(v),
            _ => None,
        }
    }
}

/// A single schema violation with context
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error message
    pub message: String,
    /// Path to the value or element that failed validation
    pub path: Option<String>,
    /// Original reason
    pub reason: Option<String>,
    /// The expected value or structure
    pub expected: Option<String>,
    /// The actual value found
    pub actual: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            reason: None,
            expected: None,
            actual: None,
        }
    }

    /// Set the path where validation failed
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the reason
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Set the expected value
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Set the actual value
    pub fn with_actual(mut self, actual: impl Into<String>) -> Self {
        self.actual = Some(actual.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref path) = self.path {
            write!(f, " (at {})", path)?;
        }

        if let Some(ref reason) = self.reason {
            write!(f, "\n\nReason: {}", reason)?;
        }

        if let Some(ref expected) = self.expected {
            write!(f, "\n\nExpected: {}", expected)?;
        }

        if let Some(ref actual) = self.actual {
            write!(f, "\n\nActual: {}", actual)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// The violations collected by one validation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Violations(Vec<ValidationError>);

impl Violations {
    /// Create an empty collection
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Add a violation
    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    /// Number of violations
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no violation was recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the violations
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    /// Keep only the first violation
    pub fn truncate_to_first(&mut self) {
        self.0.truncate(1);
    }

    /// Whether any violation was reported at the given path
    pub fn has_path(&self, path: &str) -> bool {
        self.0.iter().any(|e| e.path.as_deref() == Some(path))
    }
}

impl From<ValidationError> for Violations {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

impl IntoIterator for Violations {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => write!(f, "no violations"),
            [only] => write!(f, "{}", only),
            [first, rest @ ..] => write!(f, "{} (and {} more)", first, rest.len()),
        }
    }
}

impl std::error::Error for Violations {}
