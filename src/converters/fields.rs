//! Top-level field mappers
//!
//! One function per JSON field. Each takes the field's value and returns the
//! elements to append under `<resource>`; absent or empty input yields none.

use serde_json::{Map, Value as JsonValue};

use crate::documents::Element;
use crate::error::{Error, Result};
use crate::namespaces::QName;

use super::base::{
    as_list, as_object, encode_entries, encode_entry, json_type_name, push_text_child, required_text,
    scalar_element, scalar_text, wrap_list, MapContext,
};
use super::decode::{decode_entries, decode_entry, insert_text};
use super::tables::{
    ALTERNATE_IDENTIFIER, AWARD_NUMBER, DATE, DESCRIPTION, FUNDER_IDENTIFIER, PUBLISHER,
    RELATED_IDENTIFIER, RESOURCE_TYPE, RIGHTS, SUBJECT, TITLE,
};

/// Identifier type carried by the primary `<identifier>`
pub const DOI: &str = "DOI";

fn identifier_element(ctx: &mut MapContext, doi: String) -> Result<Option<Element>> {
    match ctx.identifier.as_deref() {
        Some(existing) if existing == doi => Ok(None),
        Some(existing) => Err(Error::Value(format!(
            "{}: second DOI '{}' conflicts with '{}'",
            ctx.path(),
            doi,
            existing
        ))),
        None => {
            ctx.identifier = Some(doi.clone());
            let mut element = Element::datacite("identifier").with_text(doi);
            element.set_attribute(QName::local("identifierType"), DOI);
            Ok(Some(element))
        }
    }
}

/// `doi`: the primary identifier, always typed DOI
pub fn doi(value: &JsonValue, ctx: &mut MapContext) -> Result<Vec<Element>> {
    match scalar_text(value, ctx)? {
        Some(doi) => Ok(identifier_element(ctx, doi)?.into_iter().collect()),
        None => Ok(Vec::new()),
    }
}

/// `identifiers`: the DOI entry becomes `<identifier>`, every other entry an
/// `<alternateIdentifier>`
pub fn identifiers(value: &JsonValue, ctx: &mut MapContext) -> Result<Vec<Element>> {
    let mut out = Vec::new();
    let mut alternates = Vec::new();

    let items = as_list(value, ctx)?;
    for (index, item) in items.iter().enumerate() {
        ctx.indexed(index, |ctx| {
            let entry = as_object(item, ctx)?;
            let kind = required_text(entry, "identifierType", ctx)?;
            if kind == DOI {
                let doi = required_text(entry, "identifier", ctx)?;
                out.extend(identifier_element(ctx, doi)?);
            } else {
                alternates.push((index, entry));
            }
            Ok(())
        })?;
    }

    if !alternates.is_empty() {
        let mut wrapper = Element::datacite("alternateIdentifiers");
        for (index, entry) in alternates {
            let child = ctx.indexed(index, |ctx| encode_entry(&ALTERNATE_IDENTIFIER, entry, ctx))?;
            wrapper.add_child(child);
        }
        out.push(wrapper);
    }

    Ok(out)
}

/// `titles`
pub fn titles(value: &JsonValue, ctx: &mut MapContext) -> Result<Vec<Element>> {
    encode_entries("titles", &TITLE, value, ctx)
}

/// `publisher`: a plain name or a 4.5 publisher object
pub fn publisher(value: &JsonValue, ctx: &mut MapContext) -> Result<Vec<Element>> {
    match value {
        JsonValue::Object(entry) => Ok(vec![encode_entry(&PUBLISHER, entry, ctx)?]),
        JsonValue::String(_) | JsonValue::Null => scalar_element(PUBLISHER.tag, value, ctx),
        other => Err(Error::type_mismatch(
            ctx.path(),
            "string or object",
            json_type_name(other),
        )),
    }
}

/// `publicationYear`
pub fn publication_year(value: &JsonValue, ctx: &mut MapContext) -> Result<Vec<Element>> {
    scalar_element("publicationYear", value, ctx)
}

/// `types`: the `<resourceType>` element
pub fn resource_type(value: &JsonValue, ctx: &mut MapContext) -> Result<Vec<Element>> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    let entry = as_object(value, ctx)?;
    Ok(vec![encode_entry(&RESOURCE_TYPE, entry, ctx)?])
}

/// `subjects`
pub fn subjects(value: &JsonValue, ctx: &mut MapContext) -> Result<Vec<Element>> {
    encode_entries("subjects", &SUBJECT, value, ctx)
}

/// `dates`
pub fn dates(value: &JsonValue, ctx: &mut MapContext) -> Result<Vec<Element>> {
    encode_entries("dates", &DATE, value, ctx)
}

/// `language`
pub fn language(value: &JsonValue, ctx: &mut MapContext) -> Result<Vec<Element>> {
    scalar_element("language", value, ctx)
}

/// `relatedIdentifiers`
pub fn related_identifiers(value: &JsonValue, ctx: &mut MapContext) -> Result<Vec<Element>> {
    encode_entries("relatedIdentifiers", &RELATED_IDENTIFIER, value, ctx)
}

/// An empty string entry still takes its place as an empty element
fn text_list(wrapper: &str, tag: &str, value: &JsonValue, ctx: &mut MapContext) -> Result<Vec<Element>> {
    wrap_list(wrapper, value, ctx, |item, ctx| {
        let mut element = Element::datacite(tag);
        element.text = scalar_text(item, ctx)?;
        Ok(element)
    })
}

/// `sizes`
pub fn sizes(value: &JsonValue, ctx: &mut MapContext) -> Result<Vec<Element>> {
    text_list("sizes", "size", value, ctx)
}

/// `formats`
pub fn formats(value: &JsonValue, ctx: &mut MapContext) -> Result<Vec<Element>> {
    text_list("formats", "format", value, ctx)
}

/// `version`
pub fn version(value: &JsonValue, ctx: &mut MapContext) -> Result<Vec<Element>> {
    scalar_element("version", value, ctx)
}

/// `rightsList`
pub fn rights_list(value: &JsonValue, ctx: &mut MapContext) -> Result<Vec<Element>> {
    encode_entries("rightsList", &RIGHTS, value, ctx)
}

/// `descriptions`
pub fn descriptions(value: &JsonValue, ctx: &mut MapContext) -> Result<Vec<Element>> {
    encode_entries("descriptions", &DESCRIPTION, value, ctx)
}

/// `fundingReferences`: nested child elements rather than attributes
pub fn funding_references(value: &JsonValue, ctx: &mut MapContext) -> Result<Vec<Element>> {
    wrap_list("fundingReferences", value, ctx, |item, ctx| {
        let entry = as_object(item, ctx)?;
        let mut reference = Element::datacite("fundingReference");

        let name = required_text(entry, "funderName", ctx)?;
        reference.add_child(Element::datacite("funderName").with_text(name));

        for spec in [&FUNDER_IDENTIFIER, &AWARD_NUMBER] {
            let element = encode_entry(spec, entry, ctx)?;
            if element.text.is_some() {
                reference.add_child(element);
            }
        }

        push_text_child(&mut reference, "awardTitle", entry, "awardTitle", ctx)?;
        Ok(reference)
    })
}

/// Read `<fundingReference>` elements back into entries
pub fn decode_funding_references(wrapper: &Element) -> Vec<JsonValue> {
    wrapper
        .find_children("fundingReference")
        .into_iter()
        .map(|reference| {
            let mut entry = Map::new();
            if let Some(name) = reference.child("funderName") {
                insert_text(&mut entry, "funderName", name);
            }
            for spec in [&FUNDER_IDENTIFIER, &AWARD_NUMBER] {
                if let Some(child) = reference.child(spec.tag) {
                    if let JsonValue::Object(fields) = decode_entry(spec, child) {
                        entry.extend(fields);
                    }
                }
            }
            if let Some(title) = reference.child("awardTitle") {
                insert_text(&mut entry, "awardTitle", title);
            }
            JsonValue::Object(entry)
        })
        .collect()
}

/// Read `<identifier>` and `<alternateIdentifiers>` back into one
/// `identifiers` list, the primary identifier first
pub fn decode_identifiers(root: &Element) -> Vec<JsonValue> {
    let mut out = Vec::new();
    for identifier in root.find_children("identifier") {
        let mut entry = Map::new();
        insert_text(&mut entry, "identifier", identifier);
        let kind = identifier.get_attribute("identifierType").unwrap_or(DOI);
        entry.insert("identifierType".to_string(), JsonValue::String(kind.to_string()));
        out.push(JsonValue::Object(entry));
    }
    for wrapper in root.find_children("alternateIdentifiers") {
        out.extend(decode_entries(
            &ALTERNATE_IDENTIFIER,
            wrapper.find_children(ALTERNATE_IDENTIFIER.tag),
        ));
    }
    out
}

/// Read a wrapper of text-only elements back into a list of strings
pub fn decode_text_list(wrapper: &Element, tag: &str) -> Vec<JsonValue> {
    wrapper
        .find_children(tag)
        .into_iter()
        .map(|e| JsonValue::String(e.text().unwrap_or_default().to_string()))
        .collect()
}
