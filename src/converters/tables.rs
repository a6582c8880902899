//! Attribute rename tables
//!
//! Each entry type maps a fixed set of JSON keys onto XML attributes. The
//! XML spelling often differs from the JSON one (`schemeUri` is written as
//! `schemeURI`, `lang` as the reserved `xml:lang`); all of those renames live
//! here and are shared by the JSON to XML mapping and its inverse.

use crate::namespaces::QName;

/// The XML side of an attribute rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeName {
    /// A plain, unqualified attribute
    Plain(&'static str),
    /// The reserved `xml:lang` attribute
    XmlLang,
}

impl AttributeName {
    /// The QName this attribute is written under
    pub fn qname(&self) -> QName {
        match self {
            Self::Plain(name) => QName::local(*name),
            Self::XmlLang => QName::xml_lang(),
        }
    }
}

/// One JSON key to XML attribute mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeRule {
    /// JSON key supplying the value
    pub key: &'static str,
    /// XML attribute receiving it
    pub name: AttributeName,
    /// Whether an entry must supply it
    pub required: bool,
}

const fn attr(key: &'static str, name: &'static str) -> AttributeRule {
    AttributeRule {
        key,
        name: AttributeName::Plain(name),
        required: false,
    }
}

const fn required(key: &'static str, name: &'static str) -> AttributeRule {
    AttributeRule {
        key,
        name: AttributeName::Plain(name),
        required: true,
    }
}

const LANG: AttributeRule = AttributeRule {
    key: "lang",
    name: AttributeName::XmlLang,
    required: false,
};

/// Where an entry's element text comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRule {
    /// Text from this key; entries without it are rejected
    Required(&'static str),
    /// Text from this key when present
    Optional(&'static str),
}

impl TextRule {
    /// JSON key supplying the text
    pub fn key(&self) -> &'static str {
        match self {
            Self::Required(key) | Self::Optional(key) => key,
        }
    }
}

/// Shape of a "text plus attributes" element built from one JSON entry
#[derive(Debug, Clone, Copy)]
pub struct EntrySpec {
    /// Element tag
    pub tag: &'static str,
    /// Text source
    pub text: TextRule,
    /// Attribute sources
    pub attributes: &'static [AttributeRule],
}

impl EntrySpec {
    /// Attribute rule for a JSON key, if the entry type has one
    pub fn rule_for_key(&self, key: &str) -> Option<&AttributeRule> {
        self.attributes.iter().find(|r| r.key == key)
    }
}

/// `<title>` entries
pub const TITLE: EntrySpec = EntrySpec {
    tag: "title",
    text: TextRule::Required("title"),
    attributes: &[attr("titleType", "titleType"), LANG],
};

/// `<subject>` entries
pub const SUBJECT: EntrySpec = EntrySpec {
    tag: "subject",
    text: TextRule::Required("subject"),
    attributes: &[
        attr("subjectScheme", "subjectScheme"),
        attr("schemeUri", "schemeURI"),
        attr("valueUri", "valueURI"),
        attr("classificationCode", "classificationCode"),
        LANG,
    ],
};

/// `<date>` entries
pub const DATE: EntrySpec = EntrySpec {
    tag: "date",
    text: TextRule::Required("date"),
    attributes: &[
        required("dateType", "dateType"),
        attr("dateInformation", "dateInformation"),
    ],
};

/// `<alternateIdentifier>` entries
pub const ALTERNATE_IDENTIFIER: EntrySpec = EntrySpec {
    tag: "alternateIdentifier",
    text: TextRule::Required("identifier"),
    attributes: &[required("identifierType", "alternateIdentifierType")],
};

/// `<relatedIdentifier>` entries
pub const RELATED_IDENTIFIER: EntrySpec = EntrySpec {
    tag: "relatedIdentifier",
    text: TextRule::Required("relatedIdentifier"),
    attributes: &[
        required("relatedIdentifierType", "relatedIdentifierType"),
        required("relationType", "relationType"),
        attr("relatedMetadataScheme", "relatedMetadataScheme"),
        attr("schemeUri", "schemeURI"),
        attr("schemeType", "schemeType"),
        attr("resourceTypeGeneral", "resourceTypeGeneral"),
    ],
};

/// `<rights>` entries
pub const RIGHTS: EntrySpec = EntrySpec {
    tag: "rights",
    text: TextRule::Optional("rights"),
    attributes: &[
        attr("rightsUri", "rightsURI"),
        attr("rightsIdentifier", "rightsIdentifier"),
        attr("rightsIdentifierScheme", "rightsIdentifierScheme"),
        attr("schemeUri", "schemeURI"),
        LANG,
    ],
};

/// `<description>` entries
pub const DESCRIPTION: EntrySpec = EntrySpec {
    tag: "description",
    text: TextRule::Required("description"),
    attributes: &[required("descriptionType", "descriptionType"), LANG],
};

/// `<nameIdentifier>` entries
pub const NAME_IDENTIFIER: EntrySpec = EntrySpec {
    tag: "nameIdentifier",
    text: TextRule::Required("nameIdentifier"),
    attributes: &[
        required("nameIdentifierScheme", "nameIdentifierScheme"),
        attr("schemeUri", "schemeURI"),
    ],
};

/// `<affiliation>` entries
pub const AFFILIATION: EntrySpec = EntrySpec {
    tag: "affiliation",
    text: TextRule::Required("name"),
    attributes: &[
        attr("affiliationIdentifier", "affiliationIdentifier"),
        attr("affiliationIdentifierScheme", "affiliationIdentifierScheme"),
        attr("schemeUri", "schemeURI"),
    ],
};

/// Attributes of `<creatorName>` / `<contributorName>`
pub const PERSON_NAME: &[AttributeRule] = &[attr("nameType", "nameType"), LANG];

/// `<publisher>` entries
pub const PUBLISHER: EntrySpec = EntrySpec {
    tag: "publisher",
    text: TextRule::Required("name"),
    attributes: &[
        attr("publisherIdentifier", "publisherIdentifier"),
        attr("publisherIdentifierScheme", "publisherIdentifierScheme"),
        attr("schemeUri", "schemeURI"),
        LANG,
    ],
};

/// `<resourceType>` entries
pub const RESOURCE_TYPE: EntrySpec = EntrySpec {
    tag: "resourceType",
    text: TextRule::Optional("resourceType"),
    attributes: &[required("resourceTypeGeneral", "resourceTypeGeneral")],
};

/// `<funderIdentifier>` entries
pub const FUNDER_IDENTIFIER: EntrySpec = EntrySpec {
    tag: "funderIdentifier",
    text: TextRule::Optional("funderIdentifier"),
    attributes: &[attr("funderIdentifierType", "funderIdentifierType")],
};

/// `<awardNumber>` entries
pub const AWARD_NUMBER: EntrySpec = EntrySpec {
    tag: "awardNumber",
    text: TextRule::Optional("awardNumber"),
    attributes: &[attr("awardUri", "awardURI")],
};

/// `<relatedItemIdentifier>` entries
pub const RELATED_ITEM_IDENTIFIER: EntrySpec = EntrySpec {
    tag: "relatedItemIdentifier",
    text: TextRule::Required("relatedItemIdentifier"),
    attributes: &[
        required("relatedItemIdentifierType", "relatedItemIdentifierType"),
        attr("relatedMetadataScheme", "relatedMetadataScheme"),
        attr("schemeUri", "schemeURI"),
        attr("schemeType", "schemeType"),
    ],
};

/// Attributes of `<relatedItem>`
pub const RELATED_ITEM: &[AttributeRule] = &[
    required("relatedItemType", "relatedItemType"),
    required("relationType", "relationType"),
];

/// Attributes of a related item's `<number>`
pub const RELATED_ITEM_NUMBER: EntrySpec = EntrySpec {
    tag: "number",
    text: TextRule::Optional("number"),
    attributes: &[attr("numberType", "numberType")],
};

/// Every table, for auditing the renames as a whole
pub const ALL_ENTRY_SPECS: &[&EntrySpec] = &[
    &TITLE,
    &SUBJECT,
    &DATE,
    &ALTERNATE_IDENTIFIER,
    &RELATED_IDENTIFIER,
    &RIGHTS,
    &DESCRIPTION,
    &NAME_IDENTIFIER,
    &AFFILIATION,
    &PUBLISHER,
    &RESOURCE_TYPE,
    &FUNDER_IDENTIFIER,
    &AWARD_NUMBER,
    &RELATED_ITEM_IDENTIFIER,
    &RELATED_ITEM_NUMBER,
];
