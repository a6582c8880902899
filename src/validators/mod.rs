//! DataCite validators
//!
//! This module contains the validation contracts for both representations
//! and built-in structural checkers implementing them:
//!
//! - [`RecordValidator`] for JSON records
//! - [`ResourceValidator`] for `<resource>` element trees
//!
//! Both honour a [`ValidationMode`]: strict runs stop at the first
//! violation, lax runs report all of them.

pub mod base;
pub mod facets;
pub mod json;
pub mod vocabularies;
pub mod xml;

// Re-exports
pub use base::{JsonSchemaValidator, Report, ValidationMode, XmlSchemaValidator};
pub use facets::{EnumerationFacet, PatternFacet, RangeFacet};
pub use json::RecordValidator;
pub use xml::ResourceValidator;
