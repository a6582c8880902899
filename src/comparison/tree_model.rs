//! Tree model for comparison testing
//!
//! A [`TreeDump`] is a canonical, serializable snapshot of an element tree.
//! Two documents that the DataCite XSD treats as equal produce equal dumps:
//! formatting whitespace is dropped, decimal coordinates are normalised, and
//! children of `xs:all` / repeated-choice content (`resource`, `geoLocation`)
//! are put in a fixed order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::converters::number_or_text;
use crate::documents::Element;

/// Elements whose children may appear in any order
pub const UNORDERED_CONTENT: &[&str] = &["resource", "geoLocation"];

/// Elements holding `xs:float` / `xs:decimal` values
pub const DECIMAL_ELEMENTS: &[&str] = &[
    "pointLongitude",
    "pointLatitude",
    "westBoundLongitude",
    "eastBoundLongitude",
    "southBoundLatitude",
    "northBoundLatitude",
];

/// Canonical dump of one element and its subtree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct TreeDump {
    /// Element name (qualified format: {namespace}localName)
    pub name: String,

    /// Attributes by qualified name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,

    /// Trimmed text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Child elements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeDump>,
}

impl TreeDump {
    /// Dump an element tree
    pub fn from_element(element: &Element) -> Self {
        let local_name = element.local_name();

        let attributes = element
            .attributes
            .iter()
            .map(|(qname, value)| (qname.to_string(), value.clone()))
            .collect();

        let text = element
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| {
                if DECIMAL_ELEMENTS.contains(&local_name) {
                    match number_or_text(t) {
                        serde_json::Value::Number(n) => n.to_string(),
                        _ => t.to_string(),
                    }
                } else {
                    t.to_string()
                }
            });

        let mut children: Vec<TreeDump> = element.children.iter().map(Self::from_element).collect();
        if UNORDERED_CONTENT.contains(&local_name) {
            children.sort();
        }

        Self {
            name: format_qualified_name(element.namespace(), local_name),
            attributes,
            text,
            children,
        }
    }
}

/// Format a qualified name in the {namespace}localName format
pub fn format_qualified_name(namespace: Option<&str>, local_name: &str) -> String {
    match namespace {
        Some(ns) => format!("{{{}}}{}", ns, local_name),
        None => local_name.to_string(),
    }
}

/// One way in which two dumps disagree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Difference {
    /// Elements at the same position have different names
    Name {
        /// Path of the element
        path: String,
        /// Expected name
        expected: String,
        /// Actual name
        actual: String,
    },
    /// An attribute is missing, unexpected or has another value
    Attribute {
        /// Path of the element
        path: String,
        /// Attribute name
        name: String,
        /// Expected value
        expected: Option<String>,
        /// Actual value
        actual: Option<String>,
    },
    /// Text content differs
    Text {
        /// Path of the element
        path: String,
        /// Expected text
        expected: Option<String>,
        /// Actual text
        actual: Option<String>,
    },
    /// An expected child is absent
    MissingChild {
        /// Path of the parent
        path: String,
        /// Name of the missing child
        name: String,
    },
    /// A child that was not expected
    ExtraChild {
        /// Path of the parent
        path: String,
        /// Name of the extra child
        name: String,
    },
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difference::Name { path, expected, actual } => {
                write!(f, "{}: expected element {}, found {}", path, expected, actual)
            }
            Difference::Attribute {
                path,
                name,
                expected,
                actual,
            } => write!(
                f,
                "{}/@{}: expected {:?}, found {:?}",
                path, name, expected, actual
            ),
            Difference::Text {
                path,
                expected,
                actual,
            } => write!(f, "{}: expected text {:?}, found {:?}", path, expected, actual),
            Difference::MissingChild { path, name } => write!(f, "{}: missing {}", path, name),
            Difference::ExtraChild { path, name } => write!(f, "{}: unexpected {}", path, name),
        }
    }
}

/// List the differences between two dumps
pub fn diff(expected: &TreeDump, actual: &TreeDump) -> Vec<Difference> {
    let mut out = Vec::new();
    diff_into(expected, actual, &format!("/{}", expected.name), &mut out);
    out
}

/// Compare two element trees under schema equivalence
pub fn diff_elements(expected: &Element, actual: &Element) -> Vec<Difference> {
    diff(&TreeDump::from_element(expected), &TreeDump::from_element(actual))
}

fn diff_into(expected: &TreeDump, actual: &TreeDump, path: &str, out: &mut Vec<Difference>) {
    if expected.name != actual.name {
        out.push(Difference::Name {
            path: path.to_string(),
            expected: expected.name.clone(),
            actual: actual.name.clone(),
        });
        return;
    }

    for (name, value) in &expected.attributes {
        let found = actual.attributes.get(name);
        if found != Some(value) {
            out.push(Difference::Attribute {
                path: path.to_string(),
                name: name.clone(),
                expected: Some(value.clone()),
                actual: found.cloned(),
            });
        }
    }
    for (name, value) in &actual.attributes {
        if !expected.attributes.contains_key(name) {
            out.push(Difference::Attribute {
                path: path.to_string(),
                name: name.clone(),
                expected: None,
                actual: Some(value.clone()),
            });
        }
    }

    if expected.text != actual.text {
        out.push(Difference::Text {
            path: path.to_string(),
            expected: expected.text.clone(),
            actual: actual.text.clone(),
        });
    }

    let shared = expected.children.len().min(actual.children.len());
    for index in 0..shared {
        let child = &expected.children[index];
        let child_path = format!("{}/{}[{}]", path, child.name, index + 1);
        diff_into(child, &actual.children[index], &child_path, out);
    }
    for child in &expected.children[shared..] {
        out.push(Difference::MissingChild {
            path: path.to_string(),
            name: child.name.clone(),
        });
    }
    for child in &actual.children[shared..] {
        out.push(Difference::ExtraChild {
            path: path.to_string(),
            name: child.name.clone(),
        });
    }
}
