//! XML serialization
//!
//! Renders an [`Element`] tree as a UTF-8 XML string. Namespaces are
//! declared once, on the root element: the DataCite namespace as default and
//! `xsi` for the schema location. Elements in the default namespace are
//! written unprefixed.

use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::documents::Element;
use crate::error::{Error, Result};
use crate::namespaces::NamespaceContext;

/// Serializer settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializerConfig {
    /// Spaces per nesting level; `None` writes everything on one line
    pub indent: Option<usize>,
    /// Whether to emit `<?xml version="1.0" encoding="UTF-8"?>`
    pub xml_declaration: bool,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            indent: Some(2),
            xml_declaration: true,
        }
    }
}

impl SerializerConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set indentation width
    pub fn with_indent(mut self, spaces: usize) -> Self {
        self.indent = Some(spaces);
        self
    }

    /// Write without any whitespace between elements
    pub fn compact(mut self) -> Self {
        self.indent = None;
        self
    }

    /// Enable or disable the XML declaration
    pub fn with_xml_declaration(mut self, enabled: bool) -> Self {
        self.xml_declaration = enabled;
        self
    }
}

/// Whether `c` matches the XML 1.0 `Char` production
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

fn check_xml_text(value: &str, context: &str) -> Result<()> {
    match value.chars().find(|c| !is_xml_char(*c)) {
        Some(c) => Err(Error::Value(format!(
            "{}: character U+{:04X} is not allowed in XML",
            context, c as u32
        ))),
        None => Ok(()),
    }
}

/// Element tree serializer
#[derive(Debug, Clone)]
pub struct Serializer {
    config: SerializerConfig,
    namespaces: NamespaceContext,
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer {
    /// Serializer for DataCite documents with default settings
    pub fn new() -> Self {
        Self::with_config(SerializerConfig::default())
    }

    /// Serializer for DataCite documents
    pub fn with_config(config: SerializerConfig) -> Self {
        Self {
            config,
            namespaces: NamespaceContext::datacite(),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    /// Render a tree to a string
    pub fn tostring(&self, root: &Element) -> Result<String> {
        let cursor = Cursor::new(Vec::new());
        let mut writer = match self.config.indent {
            Some(spaces) => Writer::new_with_indent(cursor, b' ', spaces),
            None => Writer::new(cursor),
        };

        if self.config.xml_declaration {
            writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        }
        self.write_element(&mut writer, root, true)?;

        let bytes = writer.into_inner().into_inner();
        Ok(String::from_utf8(bytes)?)
    }

    fn write_element(
        &self,
        writer: &mut Writer<Cursor<Vec<u8>>>,
        element: &Element,
        is_root: bool,
    ) -> Result<()> {
        let name = self.namespaces.element_name(&element.qname)?;
        let mut start = BytesStart::new(name.as_str());

        if is_root {
            if let Some(default) = self.namespaces.get_default_namespace() {
                start.push_attribute(("xmlns", default));
            }
            for (prefix, namespace) in self.namespaces.declarations() {
                let key = format!("xmlns:{}", prefix);
                start.push_attribute((key.as_str(), namespace));
            }
        }

        for (qname, value) in &element.attributes {
            let key = self.namespaces.attribute_name(qname)?;
            check_xml_text(value, &format!("{}/@{}", name, key))?;
            start.push_attribute((key.as_str(), value.as_str()));
        }

        match (&element.text, element.children.is_empty()) {
            (Some(text), _) => {
                check_xml_text(text, &name)?;
                writer.write_event(Event::Start(start))?;
                writer.write_event(Event::Text(BytesText::new(text)))?;
                writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
            }
            (None, true) => {
                writer.write_event(Event::Empty(start))?;
            }
            (None, false) => {
                writer.write_event(Event::Start(start))?;
                for child in &element.children {
                    self.write_element(writer, child, false)?;
                }
                writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
            }
        }

        Ok(())
    }
}

/// Render a tree with the default DataCite serializer
pub fn tostring(root: &Element) -> Result<String> {
    Serializer::new().tostring(root)
}
