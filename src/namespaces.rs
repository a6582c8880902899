//! XML namespace handling
//!
//! This module provides qualified names (QNames), the namespaces used by
//! DataCite documents and the prefix mappings the serializer writes.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::fmt;

/// DataCite kernel-4 namespace
pub const DATACITE_NAMESPACE: &str = "http://datacite.org/schema/kernel-4";

/// XML Schema instance namespace
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Reserved XML namespace (bound to the `xml` prefix)
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Location of the DataCite 4.5 XSD
pub const XSD_LOCATION: &str = "http://schema.datacite.org/meta/kernel-4.5/metadata.xsd";

/// `xsi:schemaLocation` value written on `<resource>`
pub const SCHEMA_LOCATION: &str = concat!(
    "http://datacite.org/schema/kernel-4",
    " ",
    "http://schema.datacite.org/meta/kernel-4.5/metadata.xsd"
);

/// XML Namespace URI
pub type NamespaceUri = String;

/// Namespace prefix
pub type Prefix = String;

/// Qualified name (QName) - combination of namespace and local name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QName {
    /// Namespace URI (None for no namespace)
    pub namespace: Option<NamespaceUri>,
    /// Local name
    pub local_name: String,
}

impl QName {
    /// Create a new QName
    pub fn new(namespace: Option<impl Into<String>>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(|s| s.into()),
            local_name: local_name.into(),
        }
    }

    /// Create a QName without a namespace
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
        }
    }

    /// Create a QName with a namespace
    pub fn namespaced(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
        }
    }

    /// Create a QName in the DataCite namespace
    pub fn datacite(local_name: impl Into<String>) -> Self {
        Self::namespaced(DATACITE_NAMESPACE, local_name)
    }

    /// The reserved `xml:lang` attribute name
    pub fn xml_lang() -> Self {
        Self::namespaced(XML_NAMESPACE, "lang")
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => write!(f, "{}", self.local_name),
        }
    }
}

/// Namespace context for resolving prefixes
#[derive(Debug, Clone)]
pub struct NamespaceContext {
    /// Mapping from prefix to namespace URI
    prefixes: IndexMap<Prefix, NamespaceUri>,
    /// Default namespace (no prefix)
    default_namespace: Option<NamespaceUri>,
}

impl NamespaceContext {
    /// Create a new empty namespace context
    pub fn new() -> Self {
        Self {
            prefixes: IndexMap::new(),
            default_namespace: None,
        }
    }

    /// The context of a DataCite document: kernel-4 as default namespace,
    /// `xsi` bound to the schema instance namespace.
    pub fn datacite() -> Self {
        let mut ctx = Self::new();
        ctx.set_default_namespace(DATACITE_NAMESPACE);
        ctx.add_prefix("xsi", XSI_NAMESPACE);
        ctx
    }

    /// Add a namespace prefix mapping
    pub fn add_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Set the default namespace
    pub fn set_default_namespace(&mut self, namespace: impl Into<String>) {
        self.default_namespace = Some(namespace.into());
    }

    /// Get the default namespace
    pub fn get_default_namespace(&self) -> Option<&str> {
        self.default_namespace.as_deref()
    }

    /// Declared prefixes, in the order they were added
    pub fn declarations(&self) -> Vec<(&str, &str)> {
        self.prefixes
            .iter()
            .map(|(p, ns)| (p.as_str(), ns.as_str()))
            .collect()
    }

    /// Find the prefix bound to a namespace
    pub fn prefix_for(&self, namespace: &str) -> Option<&str> {
        if namespace == XML_NAMESPACE {
            return Some("xml");
        }
        self.prefixes
            .iter()
            .find(|(_, ns)| ns.as_str() == namespace)
            .map(|(p, _)| p.as_str())
    }

    /// Render an element name in prefixed form
    pub fn element_name(&self, qname: &QName) -> Result<String> {
        match qname.namespace.as_deref() {
            None => Ok(qname.local_name.clone()),
            Some(ns) if self.default_namespace.as_deref() == Some(ns) => {
                Ok(qname.local_name.clone())
            }
            Some(ns) => self.prefixed(ns, &qname.local_name),
        }
    }

    /// Render an attribute name in prefixed form.
    ///
    /// Unqualified attributes never take the default namespace.
    pub fn attribute_name(&self, qname: &QName) -> Result<String> {
        match qname.namespace.as_deref() {
            None => Ok(qname.local_name.clone()),
            Some(ns) => self.prefixed(ns, &qname.local_name),
        }
    }

    fn prefixed(&self, namespace: &str, local: &str) -> Result<String> {
        let prefix = self
            .prefix_for(namespace)
            .ok_or_else(|| Error::Namespace(format!("No prefix bound to {}", namespace)))?;
        Ok(format!("{}:{}", prefix, local))
    }
}

impl Default for NamespaceContext {
    fn default() -> Self {
        Self::new()
    }
}
