//! Creators and contributors
//!
//! Both entry types share one shape: a name with its type, optional given
//! and family names, name identifiers and affiliations. They differ only in
//! tag names and the `contributorType` attribute, which a [`Role`] describes.

use serde_json::{Map, Value as JsonValue};

use crate::documents::Element;
use crate::error::Result;
use crate::namespaces::QName;

use super::base::{
    apply_attributes, as_list, as_object, encode_entry, optional_text, push_text_child, required_text,
    wrap_list, Entry, MapContext,
};
use super::decode::{decode_entries, insert_attributes, insert_text};
use super::tables::{AFFILIATION, NAME_IDENTIFIER, PERSON_NAME};

/// Tag names and options for one kind of person entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Role {
    /// Wrapper element, e.g. `creators`
    pub wrapper: &'static str,
    /// Entry element, e.g. `creator`
    pub tag: &'static str,
    /// Name element, e.g. `creatorName`
    pub name_tag: &'static str,
    /// Attribute carried on the entry element itself
    pub type_attribute: Option<&'static str>,
    /// Whether name identifiers and affiliations are mapped
    pub identifiers: bool,
}

/// Creators of the resource
pub const CREATOR: Role = Role {
    wrapper: "creators",
    tag: "creator",
    name_tag: "creatorName",
    type_attribute: None,
    identifiers: true,
};

/// Contributors to the resource
pub const CONTRIBUTOR: Role = Role {
    wrapper: "contributors",
    tag: "contributor",
    name_tag: "contributorName",
    type_attribute: Some("contributorType"),
    identifiers: true,
};

/// Creators of a related item (names only)
pub const RELATED_ITEM_CREATOR: Role = Role {
    identifiers: false,
    ..CREATOR
};

/// Contributors of a related item (names only)
pub const RELATED_ITEM_CONTRIBUTOR: Role = Role {
    identifiers: false,
    ..CONTRIBUTOR
};

/// `creators` field mapper
pub fn creators(value: &JsonValue, ctx: &mut MapContext) -> Result<Vec<Element>> {
    encode_people(&CREATOR, value, ctx)
}

/// `contributors` field mapper
pub fn contributors(value: &JsonValue, ctx: &mut MapContext) -> Result<Vec<Element>> {
    encode_people(&CONTRIBUTOR, value, ctx)
}

/// Map a list of person entries under the role's wrapper element
pub fn encode_people(role: &Role, value: &JsonValue, ctx: &mut MapContext) -> Result<Vec<Element>> {
    wrap_list(role.wrapper, value, ctx, |entry, ctx| {
        let entry = as_object(entry, ctx)?;
        encode_person(role, entry, ctx)
    })
}

/// Map one person entry
pub fn encode_person(role: &Role, entry: &Entry, ctx: &mut MapContext) -> Result<Element> {
    let mut person = Element::datacite(role.tag);
    if let Some(attribute) = role.type_attribute {
        if let Some(value) = optional_text(entry, attribute, ctx)? {
            person.set_attribute(QName::local(attribute), value);
        }
    }

    let mut name = Element::datacite(role.name_tag).with_text(required_text(entry, "name", ctx)?);
    apply_attributes(&mut name, entry, PERSON_NAME, ctx)?;
    person.add_child(name);

    push_text_child(&mut person, "givenName", entry, "givenName", ctx)?;
    push_text_child(&mut person, "familyName", entry, "familyName", ctx)?;

    if role.identifiers {
        for (key, spec) in [("nameIdentifiers", &NAME_IDENTIFIER), ("affiliation", &AFFILIATION)] {
            let Some(list) = entry.get(key) else {
                continue;
            };
            ctx.scoped(key, |ctx| {
                let items = as_list(list, ctx)?;
                for (index, item) in items.iter().enumerate() {
                    let child = ctx.indexed(index, |ctx| {
                        let item = as_object(item, ctx)?;
                        encode_entry(spec, item, ctx)
                    })?;
                    person.add_child(child);
                }
                Ok(())
            })?;
        }
    }

    Ok(person)
}

/// Read a role's wrapper element back into a list of person entries
pub fn decode_people(role: &Role, wrapper: &Element) -> JsonValue {
    JsonValue::Array(
        wrapper
            .find_children(role.tag)
            .into_iter()
            .map(|person| decode_person(role, person))
            .collect(),
    )
}

/// Read one person element back into an entry
pub fn decode_person(role: &Role, person: &Element) -> JsonValue {
    let mut entry = Map::new();

    if let Some(name) = person.child(role.name_tag) {
        insert_text(&mut entry, "name", name);
        insert_attributes(&mut entry, name, PERSON_NAME);
    }
    for key in ["givenName", "familyName"] {
        if let Some(child) = person.child(key) {
            insert_text(&mut entry, key, child);
        }
    }
    if let Some(attribute) = role.type_attribute {
        if let Some(value) = person.get_attribute(attribute) {
            entry.insert(attribute.to_string(), JsonValue::String(value.to_string()));
        }
    }

    if role.identifiers {
        for (key, spec) in [("nameIdentifiers", &NAME_IDENTIFIER), ("affiliation", &AFFILIATION)] {
            let items = decode_entries(spec, person.find_children(spec.tag));
            if !items.is_empty() {
                entry.insert(key.to_string(), JsonValue::Array(items));
            }
        }
    }

    JsonValue::Object(entry)
}
