//! # datacite-rs
//!
//! Mapping between the JSON and XML forms of the DataCite Metadata Schema 4.5.
//!
//! ## Features
//!
//! - JSON record to `<resource>` element tree, field by field
//! - Element tree to namespaced XML text
//! - XML back to a JSON record, through the same rename tables
//! - Structural validators for both forms
//! - Schema-equivalence comparison of element trees
//!
//! ## Example
//!
//! ```rust,ignore
//! use datacite::{to_xml, from_xml};
//! use serde_json::json;
//!
//! let record = json!({
//!     "doi": "10.1234/foo.bar",
//!     "titles": [{"title": "Test", "lang": "en"}],
//!     "publicationYear": "2016"
//! });
//!
//! let xml = to_xml(&record)?;
//! let back = from_xml(&xml)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod error;
pub mod namespaces;
pub mod documents;

// Mapping
pub mod converters;
pub mod serializer;

// Validators
pub mod validators;

// Testing support
pub mod comparison;

// Re-exports for convenience
pub use converters::{dump_tree, from_xml, load_tree, to_xml, to_xml_with};
pub use documents::Element;
pub use error::{Error, Result, ValidationError, Violations};
pub use serializer::{tostring, Serializer, SerializerConfig};
pub use validators::{
    JsonSchemaValidator, RecordValidator, ResourceValidator, ValidationMode, XmlSchemaValidator,
};

/// Version of the datacite-rs library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// DataCite Metadata Schema version implemented by the mappers
pub const SCHEMA_VERSION: &str = "4.5";

pub use namespaces::{DATACITE_NAMESPACE, SCHEMA_LOCATION, XML_NAMESPACE, XSI_NAMESPACE};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_schema_location_names_45() {
        assert!(SCHEMA_LOCATION.starts_with(DATACITE_NAMESPACE));
        assert!(SCHEMA_LOCATION.contains(&format!("kernel-{}", SCHEMA_VERSION)));
    }
}
