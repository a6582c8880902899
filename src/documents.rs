//! XML element trees
//!
//! This module provides the in-memory element tree produced by the mapping
//! engine and consumed by the serializer, the validators and the inverse
//! mapping.

use crate::error::Result;
use crate::namespaces::QName;
use indexmap::IndexMap;

/// XML Element in the document tree
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Element qualified name
    pub qname: QName,
    /// Element attributes, in insertion order
    pub attributes: IndexMap<QName, String>,
    /// Text content (if any)
    pub text: Option<String>,
    /// Child elements
    pub children: Vec<Element>,
}

impl Element {
    /// Create a new element
    pub fn new(qname: QName) -> Self {
        Self {
            qname,
            attributes: IndexMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Create an element in the DataCite namespace
    pub fn datacite(local_name: &str) -> Self {
        Self::new(QName::datacite(local_name))
    }

    /// Set text content, builder style
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Get the local name of the element
    pub fn local_name(&self) -> &str {
        &self.qname.local_name
    }

    /// Get the namespace of the element
    pub fn namespace(&self) -> Option<&str> {
        self.qname.namespace.as_deref()
    }

    /// Get the text content
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Get an unqualified attribute value by name
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(qname, _)| qname.namespace.is_none() && qname.local_name == name)
            .map(|(_, value)| value.as_str())
    }

    /// Get an attribute value by qualified name
    pub fn get_attribute_qname(&self, qname: &QName) -> Option<&str> {
        self.attributes.get(qname).map(|s| s.as_str())
    }

    /// Get the reserved `xml:lang` attribute
    pub fn xml_lang(&self) -> Option<&str> {
        self.get_attribute_qname(&QName::xml_lang())
    }

    /// Set an attribute, replacing any previous value of the same name
    pub fn set_attribute(&mut self, qname: QName, value: impl Into<String>) {
        self.attributes.insert(qname, value.into());
    }

    /// Add a child element
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Set text content
    pub fn set_text(&mut self, text: String) {
        self.text = Some(text);
    }

    /// Find child elements by local name
    pub fn find_children(&self, local_name: &str) -> Vec<&Element> {
        self.children
            .iter()
            .filter(|e| e.local_name() == local_name)
            .collect()
    }

    /// First child element with the given local name
    pub fn child(&self, local_name: &str) -> Option<&Element> {
        self.children.iter().find(|e| e.local_name() == local_name)
    }

    /// Select descendants along a `/`-separated path of local names,
    /// relative to this element (`"creators/creator/creatorName"`).
    pub fn select(&self, path: &str) -> Vec<&Element> {
        let mut current: Vec<&Element> = vec![self];
        for step in path.split('/').filter(|s| !s.is_empty()) {
            current = current
                .into_iter()
                .flat_map(|e| e.children.iter().filter(move |c| c.local_name() == step))
                .collect();
        }
        current
    }

    /// Parse an element tree from XML text
    pub fn parse(xml: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(xml)?;
        Ok(Self::from_node(doc.root_element()))
    }

    fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        let tag = node.tag_name();
        let mut element = Element::new(QName::new(tag.namespace(), tag.name()));

        for attr in node.attributes() {
            element
                .attributes
                .insert(QName::new(attr.namespace(), attr.name()), attr.value().to_string());
        }

        let mut text = String::new();
        for child in node.children() {
            if child.is_element() {
                element.add_child(Self::from_node(child));
            } else if child.is_text() {
                text.push_str(child.text().unwrap_or_default());
            }
        }

        // Whitespace between child elements is formatting, not content
        if element.children.is_empty() && !text.trim().is_empty() {
            element.set_text(text);
        }

        element
    }
}
