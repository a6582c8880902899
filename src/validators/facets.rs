//! Value constraints
//!
//! The handful of XSD facets DataCite leans on: patterns, enumerations and
//! numeric ranges. Each check returns the violation instead of failing so
//! that callers can collect them into a report.

use regex::Regex;

use crate::error::ValidationError;

/// Pattern facet using regular expressions
#[derive(Debug, Clone)]
pub struct PatternFacet {
    /// Regular expression pattern
    pub pattern: &'static str,
    regex: Regex,
}

impl PatternFacet {
    /// Compile a pattern facet
    pub fn new(pattern: &'static str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern,
            regex: Regex::new(pattern)?,
        })
    }

    /// Whether the value matches
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    /// Check a value found at `path`
    pub fn check(&self, value: &str, path: &str) -> Option<ValidationError> {
        if self.is_match(value) {
            return None;
        }
        Some(
            ValidationError::new(format!("Value does not match pattern '{}'", self.pattern))
                .with_path(path)
                .with_actual(value),
        )
    }
}

/// Enumeration facet restricts values to a controlled vocabulary
#[derive(Debug, Clone, Copy)]
pub struct EnumerationFacet {
    /// Vocabulary name, as the schema calls it
    pub name: &'static str,
    /// Allowed values
    pub values: &'static [&'static str],
}

impl EnumerationFacet {
    /// Whether the value belongs to the vocabulary
    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(&value)
    }

    /// Check a value found at `path`
    pub fn check(&self, value: &str, path: &str) -> Option<ValidationError> {
        if self.contains(value) {
            return None;
        }
        Some(
            ValidationError::new(format!("Value '{}' is not a valid {}", value, self.name))
                .with_path(path)
                .with_reason("not in the controlled vocabulary")
                .with_expected(format!("one of {}", self.values.join(", "))),
        )
    }
}

/// Inclusive numeric range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeFacet {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

/// Longitudes, in degrees
pub const LONGITUDE: RangeFacet = RangeFacet {
    min: -180.0,
    max: 180.0,
};

/// Latitudes, in degrees
pub const LATITUDE: RangeFacet = RangeFacet {
    min: -90.0,
    max: 90.0,
};

impl RangeFacet {
    /// Check a number found at `path`
    pub fn check(&self, value: f64, path: &str) -> Option<ValidationError> {
        if value >= self.min && value <= self.max {
            return None;
        }
        Some(
            ValidationError::new(format!("Value must be between {} and {}", self.min, self.max))
                .with_path(path)
                .with_actual(value.to_string()),
        )
    }

    /// Check text that should hold a number in range
    pub fn check_text(&self, text: &str, path: &str) -> Option<ValidationError> {
        match text.trim().parse::<f64>() {
            Ok(value) => self.check(value, path),
            Err(_) => Some(
                ValidationError::new("Value is not a number")
                    .with_path(path)
                    .with_actual(text),
            ),
        }
    }
}
