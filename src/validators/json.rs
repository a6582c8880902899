//! Structural validation of DataCite JSON records
//!
//! [`RecordValidator`] checks what the DataCite 4.5 JSON Schema checks:
//! required properties, value shapes, controlled vocabularies, the year and
//! DOI patterns and coordinate ranges. Violations are reported with the same
//! dotted paths the mapper uses in its errors (`dates[0].dateType`).

use serde_json::{Map, Value as JsonValue};

use crate::converters::Entry;
use crate::error::{Result, ValidationError};

use super::base::{JsonSchemaValidator, Report, ValidationMode};
use super::facets::{EnumerationFacet, RangeFacet, LATITUDE, LONGITUDE};
use super::vocabularies::{
    CONTRIBUTOR_TYPE, DATE_TYPE, DESCRIPTION_TYPE, DOI, FUNDER_IDENTIFIER_TYPE, NAME_TYPE,
    NUMBER_TYPE, RELATED_IDENTIFIER_TYPE, RELATION_TYPE, RESOURCE_TYPE_GENERAL, TITLE_TYPE, YEAR,
};

/// Top-level properties every record must carry
pub const REQUIRED_PROPERTIES: &[&str] =
    &["creators", "titles", "publisher", "publicationYear", "types"];

const BOX_BOUNDS: [(&str, RangeFacet); 4] = [
    ("westBoundLongitude", LONGITUDE),
    ("eastBoundLongitude", LONGITUDE),
    ("southBoundLatitude", LATITUDE),
    ("northBoundLatitude", LATITUDE),
];

const POINT: [(&str, RangeFacet); 2] = [("pointLongitude", LONGITUDE), ("pointLatitude", LATITUDE)];

/// Validator for DataCite 4.5 JSON records
#[derive(Debug, Clone, Default)]
pub struct RecordValidator {
    mode: ValidationMode,
}

impl RecordValidator {
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

    /// Collect every violation in `record`
    pub fn check(&self, record: &JsonValue) -> Report {
        let mut walker = Walker {
            report: Report::new(),
        };
        match record.as_object() {
            Some(fields) => walker.record(fields),
            None => walker.report.push(
                ValidationError::new("Record must be a JSON object")
                    .with_path("$")
                    .with_actual(type_name(record)),
            ),
        }
        walker.report
    }
}

impl JsonSchemaValidator for RecordValidator {
    fn validate(&self, record: &JsonValue) -> Result<()> {
        if self.mode == ValidationMode::Skip {
            return Ok(());
        }
        let report = self.check(record);
        tracing::debug!(
            violations = report.violations().len(),
            mode = %self.mode,
            "validated record"
        );
        report.finish(self.mode)
    }
}

fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// `null` and `""` count as absent, as in the mapper
fn is_blank(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::String(s) => s.is_empty(),
        _ => false,
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

struct Walker {
    report: Report,
}

impl Walker {
    fn wrong_type(&mut self, path: &str, expected: &str, value: &JsonValue) {
        self.report.push(
            ValidationError::new(format!("Value must be {}", expected))
                .with_path(path)
                .with_expected(expected)
                .with_actual(type_name(value)),
        );
    }

    /// Reported at the entry lacking the property; top-level misses at the key
    fn missing(&mut self, entry_path: &str, key: &str) {
        let path = if entry_path.is_empty() { key } else { entry_path };
        self.report.push(
            ValidationError::new(format!("Missing required property '{}'", key)).with_path(path),
        );
    }

    /// A string property; `required` reports absence
    fn string<'v>(
        &mut self,
        entry: &'v Entry,
        key: &str,
        path: &str,
        required: bool,
    ) -> Option<&'v str> {
        match entry.get(key) {
            None | Some(JsonValue::Null) => {
                if required {
                    self.missing(path, key);
                }
                None
            }
            Some(JsonValue::String(s)) if s.is_empty() && required => {
                self.missing(path, key);
                None
            }
            Some(JsonValue::String(s)) => Some(s),
            Some(other) => {
                self.wrong_type(&join(path, key), "a string", other);
                None
            }
        }
    }

    fn vocabulary(
        &mut self,
        entry: &Entry,
        key: &str,
        path: &str,
        facet: &EnumerationFacet,
        required: bool,
    ) {
        if let Some(value) = self.string(entry, key, path, required) {
            self.report.extend(facet.check(value, &join(path, key)));
        }
    }

    /// Object entries of a list property, with their paths
    fn entries<'v>(
        &mut self,
        entry: &'v Entry,
        key: &str,
        path: &str,
    ) -> Vec<(String, &'v Entry)> {
        let list_path = join(path, key);
        let items = match entry.get(key) {
            None | Some(JsonValue::Null) => return Vec::new(),
            Some(JsonValue::Array(items)) => items,
            Some(other) => {
                self.wrong_type(&list_path, "an array", other);
                return Vec::new();
            }
        };

        let mut out = Vec::new();
        for (index, item) in items.iter().enumerate() {
            let item_path = format!("{}[{}]", list_path, index);
            match item.as_object() {
                Some(object) => out.push((item_path, object)),
                None => self.wrong_type(&item_path, "an object", item),
            }
        }
        out
    }

    fn object<'v>(&mut self, entry: &'v Entry, key: &str, path: &str) -> Option<&'v Entry> {
        match entry.get(key) {
            None | Some(JsonValue::Null) => None,
            Some(JsonValue::Object(object)) => Some(object),
            Some(other) => {
                self.wrong_type(&join(path, key), "an object", other);
                None
            }
        }
    }

    fn record(&mut self, record: &Map<String, JsonValue>) {
        for key in REQUIRED_PROPERTIES {
            if record.get(*key).map_or(true, is_blank) {
                self.missing("", key);
            }
        }
        for key in ["creators", "titles"] {
            if matches!(record.get(key), Some(JsonValue::Array(items)) if items.is_empty()) {
                self.report.push(
                    ValidationError::new("At least one entry is required").with_path(key),
                );
            }
        }

        if let Some(doi) = self.string(record, "doi", "", false) {
            self.report.extend(DOI.check(doi, "doi"));
        }
        for (path, entry) in self.entries(record, "identifiers", "") {
            let identifier = self.string(entry, "identifier", &path, true);
            let kind = self.string(entry, "identifierType", &path, true);
            if let (Some(identifier), Some("DOI")) = (identifier, kind) {
                self.report.extend(DOI.check(identifier, &join(&path, "identifier")));
            }
        }

        for (path, entry) in self.entries(record, "creators", "") {
            self.person(entry, &path, false, true);
        }
        for (path, entry) in self.entries(record, "contributors", "") {
            self.person(entry, &path, true, true);
        }
        for (path, entry) in self.entries(record, "titles", "") {
            self.title(entry, &path);
        }

        self.publisher(record);
        self.publication_year(record.get("publicationYear"), "publicationYear");

        if let Some(types) = self.object(record, "types", "") {
            self.vocabulary(types, "resourceTypeGeneral", "types", &RESOURCE_TYPE_GENERAL, true);
            self.string(types, "resourceType", "types", false);
        }

        for (path, entry) in self.entries(record, "subjects", "") {
            self.string(entry, "subject", &path, true);
        }
        for (path, entry) in self.entries(record, "dates", "") {
            self.string(entry, "date", &path, true);
            self.vocabulary(entry, "dateType", &path, &DATE_TYPE, true);
        }
        self.string(record, "language", "", false);
        self.string(record, "version", "", false);

        for (path, entry) in self.entries(record, "relatedIdentifiers", "") {
            self.string(entry, "relatedIdentifier", &path, true);
            self.vocabulary(entry, "relatedIdentifierType", &path, &RELATED_IDENTIFIER_TYPE, true);
            self.vocabulary(entry, "relationType", &path, &RELATION_TYPE, true);
            self.vocabulary(entry, "resourceTypeGeneral", &path, &RESOURCE_TYPE_GENERAL, false);
        }

        for key in ["sizes", "formats"] {
            self.strings(record, key);
        }

        for (path, entry) in self.entries(record, "rightsList", "") {
            self.string(entry, "rights", &path, false);
        }
        for (path, entry) in self.entries(record, "descriptions", "") {
            self.string(entry, "description", &path, true);
            self.vocabulary(entry, "descriptionType", &path, &DESCRIPTION_TYPE, true);
        }
        for (path, entry) in self.entries(record, "geoLocations", "") {
            self.geo_location(entry, &path);
        }
        for (path, entry) in self.entries(record, "fundingReferences", "") {
            self.string(entry, "funderName", &path, true);
            self.vocabulary(entry, "funderIdentifierType", &path, &FUNDER_IDENTIFIER_TYPE, false);
        }
        for (path, entry) in self.entries(record, "relatedItems", "") {
            self.related_item(entry, &path);
        }
    }

    fn strings(&mut self, record: &Entry, key: &str) {
        match record.get(key) {
            None | Some(JsonValue::Null) => {}
            Some(JsonValue::Array(items)) => {
                for (index, item) in items.iter().enumerate() {
                    if !item.is_string() {
                        self.wrong_type(&format!("{}[{}]", key, index), "a string", item);
                    }
                }
            }
            Some(other) => self.wrong_type(key, "an array", other),
        }
    }

    fn person(&mut self, entry: &Entry, path: &str, contributor: bool, identifiers: bool) {
        self.string(entry, "name", path, true);
        self.vocabulary(entry, "nameType", path, &NAME_TYPE, false);
        self.string(entry, "givenName", path, false);
        self.string(entry, "familyName", path, false);
        if contributor {
            self.vocabulary(entry, "contributorType", path, &CONTRIBUTOR_TYPE, true);
        }
        if identifiers {
            for (item_path, item) in self.entries(entry, "nameIdentifiers", path) {
                self.string(item, "nameIdentifier", &item_path, true);
                self.string(item, "nameIdentifierScheme", &item_path, true);
            }
            for (item_path, item) in self.entries(entry, "affiliation", path) {
                self.string(item, "name", &item_path, true);
            }
        }
    }

    fn title(&mut self, entry: &Entry, path: &str) {
        self.string(entry, "title", path, true);
        self.vocabulary(entry, "titleType", path, &TITLE_TYPE, false);
    }

    fn publisher(&mut self, record: &Entry) {
        match record.get("publisher") {
            None | Some(JsonValue::Null) | Some(JsonValue::String(_)) => {}
            Some(JsonValue::Object(publisher)) => {
                self.string(publisher, "name", "publisher", true);
            }
            Some(other) => self.wrong_type("publisher", "a string or an object", other),
        }
    }

    fn publication_year(&mut self, value: Option<&JsonValue>, path: &str) {
        let year = match value {
            None | Some(JsonValue::Null) => return,
            Some(JsonValue::String(s)) if s.is_empty() => return,
            Some(JsonValue::String(s)) => s.clone(),
            Some(JsonValue::Number(n)) => n.to_string(),
            Some(other) => {
                self.wrong_type(path, "a string or an integer", other);
                return;
            }
        };
        self.report.extend(YEAR.check(&year, path));
    }

    fn coordinates(&mut self, entry: &Entry, path: &str, names: &[(&str, RangeFacet)]) {
        for (name, range) in names {
            let coordinate_path = join(path, name);
            match entry.get(*name) {
                None | Some(JsonValue::Null) => self.missing(path, name),
                Some(JsonValue::Number(n)) => {
                    let value = n.as_f64().unwrap_or(f64::NAN);
                    self.report.extend(range.check(value, &coordinate_path));
                }
                Some(JsonValue::String(s)) => {
                    self.report.extend(range.check_text(s, &coordinate_path));
                }
                Some(other) => self.wrong_type(&coordinate_path, "a number", other),
            }
        }
    }

    fn geo_location(&mut self, entry: &Entry, path: &str) {
        self.string(entry, "geoLocationPlace", path, false);
        if let Some(point) = self.object(entry, "geoLocationPoint", path) {
            self.coordinates(point, &join(path, "geoLocationPoint"), &POINT);
        }
        if let Some(bounds) = self.object(entry, "geoLocationBox", path) {
            self.coordinates(bounds, &join(path, "geoLocationBox"), &BOX_BOUNDS);
        }
        if let Some(polygon) = entry.get("geoLocationPolygon").filter(|v| !v.is_null()) {
            self.polygon(polygon, &join(path, "geoLocationPolygon"));
        }
        let polygons_path = join(path, "geoLocationPolygons");
        match entry.get("geoLocationPolygons") {
            None | Some(JsonValue::Null) => {}
            Some(JsonValue::Array(polygons)) => {
                for (index, polygon) in polygons.iter().enumerate() {
                    self.polygon(polygon, &format!("{}[{}]", polygons_path, index));
                }
            }
            Some(other) => self.wrong_type(&polygons_path, "an array", other),
        }
    }

    /// One polygon's point list; `path` names the polygon
    fn polygon(&mut self, value: &JsonValue, path: &str) {
        let JsonValue::Array(items) = value else {
            self.wrong_type(path, "an array", value);
            return;
        };

        let mut boundary = 0;
        let mut interior = 0;
        for (index, item) in items.iter().enumerate() {
            let item_path = format!("{}[{}]", path, index);
            let Some(point) = item.as_object() else {
                self.wrong_type(&item_path, "an object", item);
                continue;
            };
            if let Some(p) = self.object(point, "polygonPoint", &item_path) {
                boundary += 1;
                self.coordinates(p, &join(&item_path, "polygonPoint"), &POINT);
            }
            if let Some(p) = self.object(point, "inPolygonPoint", &item_path) {
                interior += 1;
                self.coordinates(p, &join(&item_path, "inPolygonPoint"), &POINT);
            }
        }

        if boundary < 4 {
            self.report.push(
                ValidationError::new("A polygon needs at least 4 points")
                    .with_path(path)
                    .with_actual(boundary.to_string()),
            );
        }
        if interior > 1 {
            self.report.push(
                ValidationError::new("A polygon has at most one inPolygonPoint")
                    .with_path(path)
                    .with_actual(interior.to_string()),
            );
        }
    }

    fn related_item(&mut self, entry: &Entry, path: &str) {
        self.vocabulary(entry, "relatedItemType", path, &RESOURCE_TYPE_GENERAL, true);
        self.vocabulary(entry, "relationType", path, &RELATION_TYPE, true);

        if let Some(identifier) = self.object(entry, "relatedItemIdentifier", path) {
            let identifier_path = join(path, "relatedItemIdentifier");
            self.string(identifier, "relatedItemIdentifier", &identifier_path, true);
            self.vocabulary(
                identifier,
                "relatedItemIdentifierType",
                &identifier_path,
                &RELATED_IDENTIFIER_TYPE,
                true,
            );
        }
        for (item_path, item) in self.entries(entry, "creators", path) {
            self.person(item, &item_path, false, false);
        }
        for (item_path, item) in self.entries(entry, "titles", path) {
            self.title(item, &item_path);
        }
        self.publication_year(entry.get("publicationYear"), &join(path, "publicationYear"));
        self.vocabulary(entry, "numberType", path, &NUMBER_TYPE, false);
        for key in ["volume", "issue", "number", "firstPage", "lastPage", "publisher", "edition"] {
            self.string(entry, key, path, false);
        }
        for (item_path, item) in self.entries(entry, "contributors", path) {
            self.person(item, &item_path, true, false);
        }
    }
}
