//! XML to JSON decoding
//!
//! The inverse of the field mappers. Decoding reads the same rename tables in
//! reverse, so an attribute is only ever recognised under the name the
//! encoder writes.

use serde_json::{Map, Value as JsonValue};

use crate::documents::Element;
use crate::error::{Error, Result};

use super::fields::{decode_funding_references, decode_identifiers, decode_text_list};
use super::geolocations::decode_geo_locations;
use super::persons::{decode_people, CONTRIBUTOR, CREATOR};
use super::related_items::decode_related_items;
use super::tables::{
    AttributeRule, EntrySpec, DATE, DESCRIPTION, PUBLISHER, RELATED_IDENTIFIER, RESOURCE_TYPE,
    RIGHTS, SUBJECT, TITLE,
};

/// Insert an element's text under `key` when it has any
pub fn insert_text(entry: &mut Map<String, JsonValue>, key: &str, element: &Element) {
    if let Some(text) = element.text().filter(|t| !t.is_empty()) {
        entry.insert(key.to_string(), JsonValue::String(text.to_string()));
    }
}

/// Insert every attribute named by `rules` under its JSON key
pub fn insert_attributes(
    entry: &mut Map<String, JsonValue>,
    element: &Element,
    rules: &[AttributeRule],
) {
    for rule in rules {
        if let Some(value) = element.get_attribute_qname(&rule.name.qname()) {
            entry.insert(rule.key.to_string(), JsonValue::String(value.to_string()));
        }
    }
}

/// Read one "text plus attributes" element back into an entry
pub fn decode_entry(spec: &EntrySpec, element: &Element) -> JsonValue {
    let mut entry = Map::new();
    insert_text(&mut entry, spec.text.key(), element);
    insert_attributes(&mut entry, element, spec.attributes);
    JsonValue::Object(entry)
}

/// Read a list of elements back into entries
pub fn decode_entries(spec: &EntrySpec, elements: Vec<&Element>) -> Vec<JsonValue> {
    elements.into_iter().map(|e| decode_entry(spec, e)).collect()
}

fn entries_of(spec: &EntrySpec, wrapper: &Element) -> Vec<JsonValue> {
    decode_entries(spec, wrapper.find_children(spec.tag))
}

/// Decode a `<resource>` tree into a JSON record
pub fn load_tree(root: &Element) -> Result<JsonValue> {
    if root.local_name() != "resource" {
        return Err(Error::Decode(format!(
            "expected root element 'resource', found '{}'",
            root.local_name()
        )));
    }

    let mut record = Map::new();
    if let Some(namespace) = root.namespace() {
        record.insert(
            "schemaVersion".to_string(),
            JsonValue::String(namespace.to_string()),
        );
    }

    let identifiers = decode_identifiers(root);
    if !identifiers.is_empty() {
        record.insert("identifiers".to_string(), JsonValue::Array(identifiers));
    }

    for child in &root.children {
        let name = child.local_name();
        tracing::trace!(element = name, "decoding element");

        let (key, value) = match name {
            // Folded into `identifiers` above
            "identifier" | "alternateIdentifiers" => continue,
            "creators" => ("creators", decode_people(&CREATOR, child)),
            "contributors" => ("contributors", decode_people(&CONTRIBUTOR, child)),
            "titles" => ("titles", JsonValue::Array(entries_of(&TITLE, child))),
            "publisher" => ("publisher", decode_entry(&PUBLISHER, child)),
            "publicationYear" => match child.text() {
                Some(year) => ("publicationYear", JsonValue::String(year.to_string())),
                None => continue,
            },
            "resourceType" => ("types", decode_entry(&RESOURCE_TYPE, child)),
            "subjects" => ("subjects", JsonValue::Array(entries_of(&SUBJECT, child))),
            "dates" => ("dates", JsonValue::Array(entries_of(&DATE, child))),
            "language" | "version" => match child.text() {
                Some(text) => (name, JsonValue::String(text.to_string())),
                None => continue,
            },
            "relatedIdentifiers" => (
                "relatedIdentifiers",
                JsonValue::Array(entries_of(&RELATED_IDENTIFIER, child)),
            ),
            "sizes" => ("sizes", JsonValue::Array(decode_text_list(child, "size"))),
            "formats" => ("formats", JsonValue::Array(decode_text_list(child, "format"))),
            "rightsList" => ("rightsList", JsonValue::Array(entries_of(&RIGHTS, child))),
            "descriptions" => (
                "descriptions",
                JsonValue::Array(entries_of(&DESCRIPTION, child)),
            ),
            "geoLocations" => (
                "geoLocations",
                JsonValue::Array(decode_geo_locations(child)),
            ),
            "fundingReferences" => (
                "fundingReferences",
                JsonValue::Array(decode_funding_references(child)),
            ),
            "relatedItems" => (
                "relatedItems",
                JsonValue::Array(decode_related_items(child)),
            ),
            other => {
                tracing::warn!(element = other, "skipping element with no decoding rule");
                continue;
            }
        };

        if matches!(&value, JsonValue::Array(items) if items.is_empty()) {
            continue;
        }
        record.insert(key.to_string(), value);
    }

    tracing::debug!(fields = record.len(), "decoded resource");
    Ok(JsonValue::Object(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespaces::{QName, DATACITE_NAMESPACE};
    use serde_json::json;

    #[test]
    fn test_decode_entry_reads_renamed_attributes() {
        let mut subject = Element::datacite("subject").with_text("test");
        subject.set_attribute(QName::local("schemeURI"), "dewey-uri");
        subject.set_attribute(QName::local("schemeUri"), "ignored");
        subject.set_attribute(QName::xml_lang(), "en");

        assert_eq!(
            decode_entry(&SUBJECT, &subject),
            json!({"subject": "test", "schemeUri": "dewey-uri", "lang": "en"})
        );
    }

    #[test]
    fn test_plain_lang_is_not_xml_lang() {
        let mut title = Element::datacite("title").with_text("Test");
        title.set_attribute(QName::local("lang"), "en");
        assert_eq!(decode_entry(&TITLE, &title), json!({"title": "Test"}));
    }

    #[test]
    fn test_load_tree_rejects_other_roots() {
        let root = Element::datacite("record");
        assert!(matches!(load_tree(&root), Err(Error::Decode(_))));
    }

    #[test]
    fn test_load_tree_minimal() {
        let xml = r#"<resource xmlns="http://datacite.org/schema/kernel-4">
            <identifier identifierType="DOI">10.1234/foo.bar</identifier>
            <creators><creator><creatorName>Nielsen, Lars Holm</creatorName></creator></creators>
            <titles><title>Minimal Test Case</title></titles>
            <publisher>Invenio Software</publisher>
            <publicationYear>2016</publicationYear>
            <resourceType resourceTypeGeneral="Software"></resourceType>
            <sizes/>
            <unknown>x</unknown>
        </resource>"#;
        let record = load_tree(&Element::parse(xml).unwrap()).unwrap();

        assert_eq!(
            record,
            json!({
                "schemaVersion": DATACITE_NAMESPACE,
                "identifiers": [{"identifier": "10.1234/foo.bar", "identifierType": "DOI"}],
                "creators": [{"name": "Nielsen, Lars Holm"}],
                "titles": [{"title": "Minimal Test Case"}],
                "publisher": {"name": "Invenio Software"},
                "publicationYear": "2016",
                "types": {"resourceTypeGeneral": "Software"}
            })
        );
    }
}
