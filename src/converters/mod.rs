//! DataCite JSON/XML converters
//!
//! This module maps DataCite 4.5 JSON records onto `<resource>` element
//! trees and back.
//!
//! The forward direction is driven by [`RULES`], a static table pairing each
//! top-level JSON key with its field mapper. Mappers run in table order and
//! their output is then arranged in the order the XSD sequence requires, so
//! neither JSON key order nor table order leaks into the document.
//!
//! The inverse direction, [`load_tree`], reads the same rename tables
//! backwards.

mod base;
mod decode;
mod fields;
mod geolocations;
mod persons;
mod related_items;
pub mod tables;

pub use base::{Entry, MapContext};
pub use decode::load_tree;
pub use geolocations::number_or_text;
pub use persons::{Role, CONTRIBUTOR, CREATOR, RELATED_ITEM_CONTRIBUTOR, RELATED_ITEM_CREATOR};

use serde_json::Value as JsonValue;

use crate::documents::Element;
use crate::error::{Error, Result};
use crate::namespaces::{QName, SCHEMA_LOCATION, XSI_NAMESPACE};
use crate::serializer::{Serializer, SerializerConfig};

use base::json_type_name;

/// A field mapper: the field's JSON value in, elements for `<resource>` out
pub type FieldMapper = fn(&JsonValue, &mut MapContext) -> Result<Vec<Element>>;

/// One entry of the dispatch table
#[derive(Clone, Copy)]
pub struct Rule {
    /// Top-level JSON key
    pub key: &'static str,
    /// Mapper invoked when the key is present
    pub mapper: FieldMapper,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("key", &self.key).finish()
    }
}

const fn rule(key: &'static str, mapper: FieldMapper) -> Rule {
    Rule { key, mapper }
}

/// Field mappers, keyed by top-level JSON field
pub static RULES: &[Rule] = &[
    rule("doi", fields::doi),
    rule("identifiers", fields::identifiers),
    rule("creators", persons::creators),
    rule("titles", fields::titles),
    rule("publisher", fields::publisher),
    rule("publicationYear", fields::publication_year),
    rule("types", fields::resource_type),
    rule("subjects", fields::subjects),
    rule("contributors", persons::contributors),
    rule("dates", fields::dates),
    rule("language", fields::language),
    rule("relatedIdentifiers", fields::related_identifiers),
    rule("sizes", fields::sizes),
    rule("formats", fields::formats),
    rule("version", fields::version),
    rule("rightsList", fields::rights_list),
    rule("descriptions", fields::descriptions),
    rule("geoLocations", geolocations::geo_locations),
    rule("fundingReferences", fields::funding_references),
    rule("relatedItems", related_items::related_items),
];

/// Children of `<resource>` in XSD sequence order
pub const ELEMENT_ORDER: &[&str] = &[
    "identifier",
    "creators",
    "titles",
    "publisher",
    "publicationYear",
    "resourceType",
    "subjects",
    "contributors",
    "dates",
    "language",
    "alternateIdentifiers",
    "relatedIdentifiers",
    "sizes",
    "formats",
    "version",
    "rightsList",
    "descriptions",
    "geoLocations",
    "fundingReferences",
    "relatedItems",
];

/// Look up the rule for a top-level key
pub fn rule_for(key: &str) -> Option<&'static Rule> {
    RULES.iter().find(|r| r.key == key)
}

fn element_rank(element: &Element) -> usize {
    ELEMENT_ORDER
        .iter()
        .position(|name| *name == element.local_name())
        .unwrap_or(ELEMENT_ORDER.len())
}

/// Map a JSON record to a `<resource>` element tree.
///
/// Keys without a rule (`schemaVersion`, `url`, ...) are ignored. The first
/// shape error or missing required sub-field aborts the whole document.
pub fn dump_tree(record: &JsonValue) -> Result<Element> {
    let fields = record
        .as_object()
        .ok_or_else(|| Error::type_mismatch("$", "object", json_type_name(record)))?;

    let mut root = Element::datacite("resource");
    root.set_attribute(QName::namespaced(XSI_NAMESPACE, "schemaLocation"), SCHEMA_LOCATION);

    let mut ctx = MapContext::new();
    for rule in RULES {
        let Some(value) = fields.get(rule.key) else {
            continue;
        };
        tracing::trace!(field = rule.key, "mapping field");
        let elements = ctx.scoped(rule.key, |ctx| (rule.mapper)(value, ctx))?;
        root.children.extend(elements);
    }

    // Stable, so repeated elements keep their relative order
    root.children.sort_by_key(element_rank);

    tracing::debug!(children = root.children.len(), "assembled resource");
    Ok(root)
}

/// Map a JSON record to an XML string with the default serializer settings
pub fn to_xml(record: &JsonValue) -> Result<String> {
    to_xml_with(record, &SerializerConfig::default())
}

/// Map a JSON record to an XML string
pub fn to_xml_with(record: &JsonValue, config: &SerializerConfig) -> Result<String> {
    let tree = dump_tree(record)?;
    Serializer::with_config(config.clone()).tostring(&tree)
}

/// Parse DataCite XML and decode it into a JSON record
pub fn from_xml(xml: &str) -> Result<JsonValue> {
    let root = Element::parse(xml)?;
    load_tree(&root)
}
