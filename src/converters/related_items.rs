//! Related items
//!
//! A related item describes a resource that has no DOI of its own, such as
//! the journal an article appeared in. Its creators and contributors carry
//! names only.

use serde_json::{Map, Value as JsonValue};

use crate::documents::Element;
use crate::error::Result;

use super::base::{
    apply_attributes, as_object, encode_entries, encode_entry, optional_text, push_text_child,
    wrap_list, Entry, MapContext,
};
use super::decode::{decode_entries, decode_entry, insert_attributes, insert_text};
use super::persons::{decode_people, encode_people, RELATED_ITEM_CONTRIBUTOR, RELATED_ITEM_CREATOR};
use super::tables::{RELATED_ITEM, RELATED_ITEM_IDENTIFIER, RELATED_ITEM_NUMBER, TITLE};

/// Text children written between `titles` and `contributors`, in schema order.
/// `number` is handled separately because it carries `numberType`.
const TEXT_CHILDREN: &[&str] = &[
    "publicationYear",
    "volume",
    "issue",
    "number",
    "firstPage",
    "lastPage",
    "publisher",
    "edition",
];

/// `relatedItems` field mapper
pub fn related_items(value: &JsonValue, ctx: &mut MapContext) -> Result<Vec<Element>> {
    wrap_list("relatedItems", value, ctx, |item, ctx| {
        let entry = as_object(item, ctx)?;
        encode_related_item(entry, ctx)
    })
}

fn encode_related_item(entry: &Entry, ctx: &mut MapContext) -> Result<Element> {
    let mut item = Element::datacite("relatedItem");
    apply_attributes(&mut item, entry, RELATED_ITEM, ctx)?;

    if let Some(identifier) = entry.get("relatedItemIdentifier").filter(|v| !v.is_null()) {
        let identifier = ctx.scoped("relatedItemIdentifier", |ctx| {
            let identifier = as_object(identifier, ctx)?;
            encode_entry(&RELATED_ITEM_IDENTIFIER, identifier, ctx)
        })?;
        item.add_child(identifier);
    }

    if let Some(creators) = entry.get("creators") {
        let creators =
            ctx.scoped("creators", |ctx| encode_people(&RELATED_ITEM_CREATOR, creators, ctx))?;
        item.children.extend(creators);
    }

    if let Some(titles) = entry.get("titles") {
        let titles = ctx.scoped("titles", |ctx| encode_entries("titles", &TITLE, titles, ctx))?;
        item.children.extend(titles);
    }

    for key in TEXT_CHILDREN {
        if *key == RELATED_ITEM_NUMBER.tag {
            if optional_text(entry, key, ctx)?.is_some() {
                item.add_child(encode_entry(&RELATED_ITEM_NUMBER, entry, ctx)?);
            }
        } else {
            push_text_child(&mut item, key, entry, key, ctx)?;
        }
    }

    if let Some(contributors) = entry.get("contributors") {
        let contributors = ctx.scoped("contributors", |ctx| {
            encode_people(&RELATED_ITEM_CONTRIBUTOR, contributors, ctx)
        })?;
        item.children.extend(contributors);
    }

    Ok(item)
}

/// Read `<relatedItem>` elements back into entries
pub fn decode_related_items(wrapper: &Element) -> Vec<JsonValue> {
    wrapper
        .find_children("relatedItem")
        .into_iter()
        .map(|item| {
            let mut entry = Map::new();
            insert_attributes(&mut entry, item, RELATED_ITEM);

            if let Some(identifier) = item.child(RELATED_ITEM_IDENTIFIER.tag) {
                entry.insert(
                    "relatedItemIdentifier".to_string(),
                    decode_entry(&RELATED_ITEM_IDENTIFIER, identifier),
                );
            }
            if let Some(creators) = item.child("creators") {
                entry.insert("creators".to_string(), decode_people(&RELATED_ITEM_CREATOR, creators));
            }
            if let Some(titles) = item.child("titles") {
                entry.insert(
                    "titles".to_string(),
                    JsonValue::Array(decode_entries(&TITLE, titles.find_children(TITLE.tag))),
                );
            }
            for key in TEXT_CHILDREN {
                if let Some(child) = item.child(key) {
                    insert_text(&mut entry, key, child);
                    if *key == RELATED_ITEM_NUMBER.tag {
                        insert_attributes(&mut entry, child, RELATED_ITEM_NUMBER.attributes);
                    }
                }
            }
            if let Some(contributors) = item.child("contributors") {
                entry.insert(
                    "contributors".to_string(),
                    decode_people(&RELATED_ITEM_CONTRIBUTOR, contributors),
                );
            }

            JsonValue::Object(entry)
        })
        .collect()
}
