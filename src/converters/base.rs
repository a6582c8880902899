//! Base mapping context and value accessors
//!
//! Every field mapper reads its JSON input through these accessors so that
//! shape errors and missing required sub-fields are reported uniformly,
//! with the path of the offending entry.

use serde_json::{Map, Value as JsonValue};

use crate::documents::Element;
use crate::error::{Error, Result};

use super::tables::{AttributeRule, EntrySpec, TextRule};

/// A JSON object entry
pub type Entry = Map<String, JsonValue>;

/// State carried through one document mapping
#[derive(Debug, Default)]
pub struct MapContext {
    /// Path segments of the value being mapped
    path: Vec<String>,
    /// DOI of the `<identifier>` already emitted, if any
    pub(crate) identifier: Option<String>,
}

impl MapContext {
    /// Create a fresh context
    pub fn new() -> Self {
        Self::default()
    }

    /// Current path, e.g. `creators[0].affiliation[1]`
    pub fn path(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            if !out.is_empty() && !segment.starts_with('[') {
                out.push('.');
            }
            out.push_str(segment);
        }
        out
    }

    /// Run `f` with `segment` appended to the path
    pub fn scoped<T>(
        &mut self,
        segment: impl Into<String>,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.path.push(segment.into());
        let out = f(self);
        self.path.pop();
        out
    }

    /// Run `f` for the entry at `index` of the current list
    pub fn indexed<T>(&mut self, index: usize, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.scoped(format!("[{}]", index), f)
    }
}

/// Name of a JSON value's shape, for error messages
pub fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Read a list-valued field. `null` reads as an empty list.
pub fn as_list<'a>(value: &'a JsonValue, ctx: &MapContext) -> Result<&'a [JsonValue]> {
    match value {
        JsonValue::Array(items) => Ok(items),
        JsonValue::Null => Ok(&[]),
        other => Err(Error::type_mismatch(ctx.path(), "array", json_type_name(other))),
    }
}

/// Read an object-valued field or entry
pub fn as_object<'a>(value: &'a JsonValue, ctx: &MapContext) -> Result<&'a Entry> {
    value
        .as_object()
        .ok_or_else(|| Error::type_mismatch(ctx.path(), "object", json_type_name(value)))
}

/// Render a scalar as element or attribute text.
///
/// Numbers keep their natural decimal form (`67`, `41.09`); `null` and the
/// empty string render as nothing.
pub fn scalar_text(value: &JsonValue, ctx: &MapContext) -> Result<Option<String>> {
    match value {
        JsonValue::Null => Ok(None),
        JsonValue::String(s) if s.is_empty() => Ok(None),
        JsonValue::String(s) => Ok(Some(s.clone())),
        JsonValue::Number(n) => Ok(Some(n.to_string())),
        JsonValue::Bool(b) => Ok(Some(b.to_string())),
        other => Err(Error::type_mismatch(ctx.path(), "scalar", json_type_name(other))),
    }
}

/// Optional scalar sub-field of an entry
pub fn optional_text(entry: &Entry, key: &str, ctx: &mut MapContext) -> Result<Option<String>> {
    match entry.get(key) {
        None => Ok(None),
        Some(value) => ctx.scoped(key, |ctx| scalar_text(value, ctx)),
    }
}

/// Required scalar sub-field of an entry
pub fn required_text(entry: &Entry, key: &str, ctx: &mut MapContext) -> Result<String> {
    optional_text(entry, key, ctx)?.ok_or_else(|| Error::missing_field(key, ctx.path()))
}

/// Copy the attributes described by `rules` from `entry` onto `element`
pub fn apply_attributes(
    element: &mut Element,
    entry: &Entry,
    rules: &[AttributeRule],
    ctx: &mut MapContext,
) -> Result<()> {
    for rule in rules {
        let value = if rule.required {
            Some(required_text(entry, rule.key, ctx)?)
        } else {
            optional_text(entry, rule.key, ctx)?
        };
        if let Some(value) = value {
            element.set_attribute(rule.name.qname(), value);
        }
    }
    Ok(())
}

/// Build one element from an entry according to its spec
pub fn encode_entry(spec: &EntrySpec, entry: &Entry, ctx: &mut MapContext) -> Result<Element> {
    let mut element = Element::datacite(spec.tag);
    element.text = match spec.text {
        TextRule::Required(key) => Some(required_text(entry, key, ctx)?),
        TextRule::Optional(key) => optional_text(entry, key, ctx)?,
    };
    apply_attributes(&mut element, entry, spec.attributes, ctx)?;
    Ok(element)
}

/// Map a list of entries into a wrapper element, one child per entry.
///
/// An empty list produces no wrapper at all.
pub fn encode_entries(
    wrapper: &str,
    spec: &EntrySpec,
    value: &JsonValue,
    ctx: &mut MapContext,
) -> Result<Vec<Element>> {
    wrap_list(wrapper, value, ctx, |entry, ctx| {
        let entry = as_object(entry, ctx)?;
        encode_entry(spec, entry, ctx)
    })
}

/// Map each list item with `f` and collect the results under `wrapper`.
///
/// An empty list produces no wrapper at all.
pub fn wrap_list(
    wrapper: &str,
    value: &JsonValue,
    ctx: &mut MapContext,
    mut f: impl FnMut(&JsonValue, &mut MapContext) -> Result<Element>,
) -> Result<Vec<Element>> {
    let items = as_list(value, ctx)?;
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let mut root = Element::datacite(wrapper);
    for (index, item) in items.iter().enumerate() {
        let child = ctx.indexed(index, |ctx| f(item, ctx))?;
        root.add_child(child);
    }
    Ok(vec![root])
}

/// Append `<tag>text</tag>` when the sub-field has a value
pub fn push_text_child(
    parent: &mut Element,
    tag: &str,
    entry: &Entry,
    key: &str,
    ctx: &mut MapContext,
) -> Result<()> {
    if let Some(text) = optional_text(entry, key, ctx)? {
        parent.add_child(Element::datacite(tag).with_text(text));
    }
    Ok(())
}

/// Single text element for a scalar field, nothing when empty or null
pub fn scalar_element(tag: &str, value: &JsonValue, ctx: &MapContext) -> Result<Vec<Element>> {
    Ok(scalar_text(value, ctx)?
        .map(|text| Element::datacite(tag).with_text(text))
        .into_iter()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_context_path() {
        let mut ctx = MapContext::new();
        let path = ctx
            .scoped("creators", |ctx| {
                ctx.indexed(0, |ctx| {
                    ctx.scoped("affiliation", |ctx| ctx.indexed(1, |ctx| Ok(ctx.path())))
                })
            })
            .unwrap();
        assert_eq!(path, "creators[0].affiliation[1]");
        assert_eq!(ctx.path(), "");
    }

    #[test]
    fn test_scalar_text_numbers() {
        let ctx = MapContext::new();
        assert_eq!(scalar_text(&json!(67), &ctx).unwrap().as_deref(), Some("67"));
        assert_eq!(scalar_text(&json!(31.12), &ctx).unwrap().as_deref(), Some("31.12"));
        assert_eq!(scalar_text(&json!(41.090), &ctx).unwrap().as_deref(), Some("41.09"));
        assert_eq!(scalar_text(&json!(-71.032), &ctx).unwrap().as_deref(), Some("-71.032"));
    }

    #[test]
    fn test_scalar_text_empty() {
        let ctx = MapContext::new();
        assert_eq!(scalar_text(&json!(null), &ctx).unwrap(), None);
        assert_eq!(scalar_text(&json!(""), &ctx).unwrap(), None);
        assert!(matches!(
            scalar_text(&json!([1]), &ctx),
            Err(Error::TypeMismatch { found: "array", .. })
        ));
    }

    #[test]
    fn test_as_list_rejects_object() {
        let ctx = MapContext::new();
        assert!(as_list(&json!([]), &ctx).unwrap().is_empty());
        assert!(as_list(&json!(null), &ctx).unwrap().is_empty());
        assert!(matches!(
            as_list(&json!({"invalid": "data"}), &ctx),
            Err(Error::TypeMismatch { expected: "array", found: "object", .. })
        ));
    }

    #[test]
    fn test_required_text_reports_entry() {
        let mut ctx = MapContext::new();
        let entry = json!({"date": "2011-01-01"});
        let err = ctx
            .scoped("dates", |ctx| {
                ctx.indexed(0, |ctx| required_text(entry.as_object().unwrap(), "dateType", ctx))
            })
            .unwrap_err();
        match err {
            Error::MissingField { field, path } => {
                assert_eq!(field, "dateType");
                assert_eq!(path, "dates[0]");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
