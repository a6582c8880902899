//! Structural validation of DataCite XML documents
//!
//! [`ResourceValidator`] checks an element tree against the constraints of
//! the DataCite 4.5 XSD that matter for mapped output: the root element,
//! mandatory and unique top-level elements, required attributes, controlled
//! vocabularies and polygon structure. Paths are XPath-like with 1-based
//! positions (`/resource/dates/date[1]`).

use crate::converters::tables::{
    EntrySpec, TextRule, AFFILIATION, ALTERNATE_IDENTIFIER, DATE, DESCRIPTION, NAME_IDENTIFIER,
    RELATED_IDENTIFIER, RELATED_ITEM_IDENTIFIER, SUBJECT, TITLE,
};
use crate::converters::ELEMENT_ORDER;
use crate::documents::Element;
use crate::error::{Result, ValidationError};
use crate::namespaces::DATACITE_NAMESPACE;

use super::base::{Report, ValidationMode, XmlSchemaValidator};
use super::facets::{EnumerationFacet, RangeFacet, LATITUDE, LONGITUDE};
use super::vocabularies::{
    CONTRIBUTOR_TYPE, DATE_TYPE, DESCRIPTION_TYPE, DOI, FUNDER_IDENTIFIER_TYPE, NAME_TYPE,
    NUMBER_TYPE, RELATED_IDENTIFIER_TYPE, RELATION_TYPE, RESOURCE_TYPE_GENERAL, TITLE_TYPE, YEAR,
};

/// Top-level elements every document must contain
pub const MANDATORY_ELEMENTS: &[&str] = &[
    "identifier",
    "creators",
    "titles",
    "publisher",
    "publicationYear",
    "resourceType",
];

/// Wrappers whose entries are described by a rename table
const ENTRY_LISTS: &[(&str, &EntrySpec)] = &[
    ("titles", &TITLE),
    ("subjects", &SUBJECT),
    ("dates", &DATE),
    ("alternateIdentifiers", &ALTERNATE_IDENTIFIER),
    ("relatedIdentifiers", &RELATED_IDENTIFIER),
    ("descriptions", &DESCRIPTION),
];

/// Attributes restricted to a vocabulary, per entry element
const VOCABULARY_ATTRIBUTES: &[(&str, &str, EnumerationFacet)] = &[
    ("creatorName", "nameType", NAME_TYPE),
    ("contributorName", "nameType", NAME_TYPE),
    ("contributor", "contributorType", CONTRIBUTOR_TYPE),
    ("title", "titleType", TITLE_TYPE),
    ("resourceType", "resourceTypeGeneral", RESOURCE_TYPE_GENERAL),
    ("date", "dateType", DATE_TYPE),
    ("relatedIdentifier", "relatedIdentifierType", RELATED_IDENTIFIER_TYPE),
    ("relatedIdentifier", "relationType", RELATION_TYPE),
    ("relatedIdentifier", "resourceTypeGeneral", RESOURCE_TYPE_GENERAL),
    ("description", "descriptionType", DESCRIPTION_TYPE),
    ("funderIdentifier", "funderIdentifierType", FUNDER_IDENTIFIER_TYPE),
    ("relatedItem", "relatedItemType", RESOURCE_TYPE_GENERAL),
    ("relatedItem", "relationType", RELATION_TYPE),
    ("relatedItemIdentifier", "relatedItemIdentifierType", RELATED_IDENTIFIER_TYPE),
    ("number", "numberType", NUMBER_TYPE),
];

/// Validator for DataCite 4.5 `<resource>` trees
#[derive(Debug, Clone, Default)]
pub struct ResourceValidator {
    mode: ValidationMode,
}

impl ResourceValidator {
    /// Create a strict validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with the given mode
    pub fn with_mode(mode: ValidationMode) -> Self {
        Self { mode }
    }

    /// Get the validation mode
    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Collect every violation in the tree
    pub fn check(&self, root: &Element) -> Report {
        let mut report = Report::new();

        if root.local_name() != "resource" || root.namespace() != Some(DATACITE_NAMESPACE) {
            report.push(
                ValidationError::new("Root element must be DataCite 'resource'")
                    .with_path(format!("/{}", root.local_name()))
                    .with_expected(format!("{{{}}}resource", DATACITE_NAMESPACE))
                    .with_actual(root.qname.to_string()),
            );
            return report;
        }

        check_top_level(root, &mut report);
        check_entries(root, &mut report);
        walk(root, "/resource", &mut report);
        report
    }
}

impl XmlSchemaValidator for ResourceValidator {
    fn assert_valid(&self, root: &Element) -> Result<()> {
        if self.mode == ValidationMode::Skip {
            return Ok(());
        }
        let report = self.check(root);
        tracing::debug!(
            violations = report.violations().len(),
            mode = %self.mode,
            "validated resource"
        );
        report.finish(self.mode)
    }
}

fn missing_element(path: &str, name: &str) -> ValidationError {
    ValidationError::new(format!("Missing required element '{}'", name)).with_path(path)
}

fn check_top_level(root: &Element, report: &mut Report) {
    for name in MANDATORY_ELEMENTS {
        if root.child(name).is_none() {
            report.push(missing_element("/resource", name));
        }
    }

    for (index, child) in root.children.iter().enumerate() {
        let name = child.local_name();
        let path = format!("/resource/{}", name);
        if child.namespace() != Some(DATACITE_NAMESPACE) || !ELEMENT_ORDER.contains(&name) {
            report.push(
                ValidationError::new(format!("Unexpected element '{}'", child.qname))
                    .with_path(path),
            );
            continue;
        }
        if root.children[..index].iter().any(|c| c.qname == child.qname) {
            report.push(
                ValidationError::new(format!("Element '{}' may occur only once", name))
                    .with_path(path),
            );
        }
    }

    if let Some(identifier) = root.child("identifier") {
        let path = "/resource/identifier";
        if identifier.get_attribute("identifierType") != Some("DOI") {
            report.push(
                ValidationError::new("identifierType must be 'DOI'")
                    .with_path(path)
                    .with_actual(identifier.get_attribute("identifierType").unwrap_or_default()),
            );
        }
        report.extend(DOI.check(identifier.text().unwrap_or_default(), path));
    }

    for wrapper in ["creators", "titles"] {
        if let Some(list) = root.child(wrapper) {
            if list.children.is_empty() {
                report.push(
                    ValidationError::new("At least one entry is required")
                        .with_path(format!("/resource/{}", wrapper)),
                );
            }
        }
    }

    if let Some(publisher) = root.child("publisher") {
        if publisher.text().map_or(true, |t| t.trim().is_empty()) {
            report.push(
                ValidationError::new("publisher must not be empty").with_path("/resource/publisher"),
            );
        }
    }
    if let Some(year) = root.child("publicationYear") {
        report.extend(YEAR.check(year.text().unwrap_or_default(), "/resource/publicationYear"));
    }
    if let Some(kind) = root.child("resourceType") {
        if kind.get_attribute("resourceTypeGeneral").is_none() {
            report.push(
                ValidationError::new("Missing required attribute 'resourceTypeGeneral'")
                    .with_path("/resource/resourceType"),
            );
        }
    }
}

/// Required text and attributes of table-described entries
fn check_entries(root: &Element, report: &mut Report) {
    for (wrapper, spec) in ENTRY_LISTS {
        for list in root.find_children(wrapper) {
            for (index, entry) in list.find_children(spec.tag).into_iter().enumerate() {
                let path = format!("/resource/{}/{}[{}]", wrapper, spec.tag, index + 1);
                check_entry(entry, spec, &path, report);
            }
        }
    }

    for (role, name) in [("creator", "creatorName"), ("contributor", "contributorName")] {
        let people = root.select(&format!("{}s/{}", role, role));
        for (index, person) in people.into_iter().enumerate() {
            let path = format!("/resource/{}s/{}[{}]", role, role, index + 1);
            if person.child(name).and_then(Element::text).is_none() {
                report.push(missing_element(&path, name));
            }
            if role == "contributor" && person.get_attribute("contributorType").is_none() {
                report.push(
                    ValidationError::new("Missing required attribute 'contributorType'")
                        .with_path(&path),
                );
            }
            for spec in [&NAME_IDENTIFIER, &AFFILIATION] {
                for (position, child) in person.find_children(spec.tag).into_iter().enumerate() {
                    let child_path = format!("{}/{}[{}]", path, spec.tag, position + 1);
                    check_entry(child, spec, &child_path, report);
                }
            }
        }
    }

    for (index, item) in root.select("relatedItems/relatedItem").into_iter().enumerate() {
        let path = format!("/resource/relatedItems/relatedItem[{}]", index + 1);
        for attribute in ["relatedItemType", "relationType"] {
            if item.get_attribute(attribute).is_none() {
                report.push(
                    ValidationError::new(format!("Missing required attribute '{}'", attribute))
                        .with_path(&path),
                );
            }
        }
        if let Some(identifier) = item.child(RELATED_ITEM_IDENTIFIER.tag) {
            let identifier_path = format!("{}/{}", path, RELATED_ITEM_IDENTIFIER.tag);
            check_entry(identifier, &RELATED_ITEM_IDENTIFIER, &identifier_path, report);
        }
        if item.select("titles/title").is_empty() {
            report.push(missing_element(&path, "titles"));
        }
    }

    for (index, reference) in root
        .select("fundingReferences/fundingReference")
        .into_iter()
        .enumerate()
    {
        if reference.child("funderName").and_then(Element::text).is_none() {
            let path = format!("/resource/fundingReferences/fundingReference[{}]", index + 1);
            report.push(missing_element(&path, "funderName"));
        }
    }
}

fn check_entry(entry: &Element, spec: &EntrySpec, path: &str, report: &mut Report) {
    if let TextRule::Required(_) = spec.text {
        if entry.text().map_or(true, |t| t.trim().is_empty()) {
            report.push(
                ValidationError::new(format!("'{}' must not be empty", spec.tag)).with_path(path),
            );
        }
    }
    for rule in spec.attributes.iter().filter(|r| r.required) {
        if entry.get_attribute_qname(&rule.name.qname()).is_none() {
            report.push(
                ValidationError::new(format!(
                    "Missing required attribute '{}'",
                    rule.name.qname().local_name
                ))
                .with_path(path),
            );
        }
    }
}

/// Vocabulary and geometry checks over the whole tree
fn walk(element: &Element, path: &str, report: &mut Report) {
    let name = element.local_name();

    for (tag, attribute, facet) in VOCABULARY_ATTRIBUTES {
        if *tag == name {
            if let Some(value) = element.get_attribute(attribute) {
                report.extend(facet.check(value, &format!("{}/@{}", path, attribute)));
            }
        }
    }

    match name {
        "geoLocationPoint" | "polygonPoint" | "inPolygonPoint" => check_coordinates(
            element,
            path,
            &[("pointLongitude", LONGITUDE), ("pointLatitude", LATITUDE)],
            report,
        ),
        "geoLocationBox" => check_coordinates(
            element,
            path,
            &[
                ("westBoundLongitude", LONGITUDE),
                ("eastBoundLongitude", LONGITUDE),
                ("southBoundLatitude", LATITUDE),
                ("northBoundLatitude", LATITUDE),
            ],
            report,
        ),
        "geoLocationPolygon" => {
            let boundary = element.find_children("polygonPoint").len();
            if boundary < 4 {
                report.push(
                    ValidationError::new("A polygon needs at least 4 points")
                        .with_path(path)
                        .with_actual(boundary.to_string()),
                );
            }
            if element.find_children("inPolygonPoint").len() > 1 {
                report.push(
                    ValidationError::new("A polygon has at most one inPolygonPoint").with_path(path),
                );
            }
        }
        _ => {}
    }

    let mut seen: Vec<(&str, usize)> = Vec::new();
    for child in &element.children {
        let child_name = child.local_name();
        let position = match seen.iter_mut().find(|(n, _)| *n == child_name) {
            Some((_, count)) => {
                *count += 1;
                *count
            }
            None => {
                seen.push((child_name, 1));
                1
            }
        };
        walk(child, &format!("{}/{}[{}]", path, child_name, position), report);
    }
}

fn check_coordinates(
    element: &Element,
    path: &str,
    names: &[(&str, RangeFacet)],
    report: &mut Report,
) {
    for (name, range) in names {
        match element.child(name).and_then(Element::text) {
            Some(text) => report.extend(range.check_text(text, &format!("{}/{}", path, name))),
            None => report.push(missing_element(path, name)),
        }
    }
}
