//! Base validator types and traits
//!
//! This module provides the validation mode shared by both validators, the
//! collaborator contracts for JSON and XML validation, and the report that
//! gathers violations during a run.

use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;

use crate::documents::Element;
use crate::error::{Error, Result, ValidationError, Violations};

/// Validation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValidationMode {
    /// Strict validation - the first violation is reported
    #[default]
    Strict,
    /// Lax validation - every violation is reported
    Lax,
    /// Skip validation - no validation is performed
    Skip,
}

impl ValidationMode {
    /// Get the mode as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationMode::Strict => "strict",
            ValidationMode::Lax => "lax",
            ValidationMode::Skip => "skip",
        }
    }
}

impl FromStr for ValidationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "strict" => Ok(ValidationMode::Strict),
            "lax" => Ok(ValidationMode::Lax),
            "skip" => Ok(ValidationMode::Skip),
            _ => Err(Error::Value(format!(
                "Invalid validation mode: '{}'. Must be 'strict', 'lax', or 'skip'",
                s
            ))),
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Contract of a JSON Schema validator for DataCite records
pub trait JsonSchemaValidator {
    /// Return normally, or fail with every violation found
    fn validate(&self, record: &JsonValue) -> Result<()>;

    /// Whether the record passes validation
    fn is_valid(&self, record: &JsonValue) -> bool {
        self.validate(record).is_ok()
    }
}

/// Contract of an XSD validator for DataCite documents
pub trait XmlSchemaValidator {
    /// Return normally, or fail on the first schema violation
    fn assert_valid(&self, root: &Element) -> Result<()>;

    /// Whether the document passes validation
    fn is_valid(&self, root: &Element) -> bool {
        self.assert_valid(root).is_ok()
    }
}

/// Violations gathered during one validation run
#[derive(Debug, Clone, Default)]
pub struct Report {
    violations: Violations,
}

impl Report {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation
    pub fn push(&mut self, error: ValidationError) {
        self.violations.push(error);
    }

    /// Record a violation if there is one
    pub fn extend(&mut self, error: Option<ValidationError>) {
        if let Some(error) = error {
            self.push(error);
        }
    }

    /// Violations recorded so far
    pub fn violations(&self) -> &Violations {
        &self.violations
    }

    /// Close the run according to `mode`
    pub fn finish(mut self, mode: ValidationMode) -> Result<()> {
        if self.violations.is_empty() || mode == ValidationMode::Skip {
            return Ok(());
        }
        if mode == ValidationMode::Strict {
            self.violations.truncate_to_first();
        }
        Err(Error::Validation(self.violations))
    }
}
