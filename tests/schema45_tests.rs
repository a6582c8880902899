//! Field-by-field tests for the DataCite 4.5 mappers
//!
//! Each test maps a small JSON fragment, looks at the resulting element tree
//! and, where the fragment is a complete property, checks that a minimal
//! record extended with it passes the record validator.

use datacite::validators::{
    JsonSchemaValidator, RecordValidator, ResourceValidator, ValidationMode, XmlSchemaValidator,
};
use datacite::{dump_tree, Element, Error};
use serde_json::{json, Value};

const MINIMAL_JSON: &str = include_str!("data/minimal.json");
const MINIMAL_XML: &str = include_str!("data/minimal.xml");
const FULL_EXAMPLE_JSON: &str = include_str!("data/datacite-v4.5-full-example.json");

/// List properties that may be given as empty arrays
const FIELD_NAMES: &[&str] = &[
    "dates",
    "subjects",
    "contributors",
    "relatedIdentifiers",
    "relatedItems",
    "sizes",
    "formats",
    "rightsList",
    "descriptions",
    "geoLocations",
    "fundingReferences",
];

fn minimal() -> Value {
    serde_json::from_str(MINIMAL_JSON).unwrap()
}

/// Validate the minimal record with `extra` merged over it
fn validate_json(extra: &Value) {
    let mut record = minimal();
    let fields = record.as_object_mut().unwrap();
    for (key, value) in extra.as_object().unwrap() {
        fields.insert(key.clone(), value.clone());
    }
    if let Err(e) = RecordValidator::new().validate(&record) {
        panic!("record should validate: {}", e);
    }
}

fn dump(record: Value) -> Element {
    dump_tree(&record).unwrap()
}

fn count(tree: &Element, path: &str) -> usize {
    tree.select(path).len()
}

#[test]
fn test_identifier() {
    let data = json!({"doi": "10.1234/foo.bar"});
    validate_json(&data);

    let tree = dump(data);
    let elem = tree.select("identifier")[0];
    assert_eq!(elem.text(), Some("10.1234/foo.bar"));
    assert_eq!(elem.get_attribute("identifierType"), Some("DOI"));
}

#[test]
fn test_creators() {
    let err = dump_tree(&json!({"creators": {"invalid": "data"}})).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { ref path, .. } if path == "creators"));

    assert_eq!(count(&dump(json!({"creators": []})), "creators"), 0);

    let tree = dump(json!({"creators": [{"name": "Smith, John"}]}));
    assert_eq!(count(&tree, "creators/creator"), 1);
    assert_eq!(count(&tree, "creators/creator/creatorName"), 1);
    assert_eq!(count(&tree, "creators/creator/nameIdentifier"), 0);
    assert_eq!(count(&tree, "creators/creator/affiliation"), 0);

    let data = json!({
        "creators": [{
            "name": "Smith, John",
            "familyName": "Smith",
            "givenName": "John",
            "affiliation": [
                {
                    "name": "DataCite",
                    "affiliationIdentifier": "https://ror.org/04wxnsj81",
                    "affiliationIdentifierScheme": "ROR"
                },
                {
                    "name": "DataCite2",
                    "affiliationIdentifier": "https://ror.org/04wxnsj81",
                    "affiliationIdentifierScheme": "ROR"
                }
            ],
            "nameIdentifiers": [{
                "nameIdentifier": "1234",
                "schemeUri": "http://orcid.org",
                "nameIdentifierScheme": "orcid"
            }]
        }]
    });
    validate_json(&data);

    let tree = dump(data);
    assert_eq!(count(&tree, "creators/creator/creatorName"), 1);
    assert_eq!(count(&tree, "creators/creator/familyName"), 1);
    assert_eq!(count(&tree, "creators/creator/givenName"), 1);
    assert_eq!(count(&tree, "creators/creator/nameIdentifier"), 1);
    assert_eq!(count(&tree, "creators/creator/affiliation"), 2);

    let identifier = tree.select("creators/creator/nameIdentifier")[0];
    assert_eq!(identifier.get_attribute("schemeURI"), Some("http://orcid.org"));
    assert_eq!(identifier.get_attribute("schemeUri"), None);

    let affiliations = tree.select("creators/creator/affiliation");
    assert_eq!(affiliations[0].text(), Some("DataCite"));
    assert_eq!(
        affiliations[0].get_attribute("affiliationIdentifier"),
        Some("https://ror.org/04wxnsj81")
    );
    assert_eq!(affiliations[1].text(), Some("DataCite2"));
    assert_eq!(
        affiliations[1].get_attribute("affiliationIdentifier"),
        Some("https://ror.org/04wxnsj81")
    );
}

#[test]
fn test_creator_without_name() {
    let err = dump_tree(&json!({"creators": [{"givenName": "John"}]})).unwrap_err();
    match err {
        Error::MissingField { field, path } => {
            assert_eq!(field, "name");
            assert_eq!(path, "creators[0]");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_titles() {
    assert!(matches!(
        dump_tree(&json!({"titles": {"invalid": "data"}})),
        Err(Error::TypeMismatch { .. })
    ));

    assert_eq!(count(&dump(json!({"titles": []})), "titles"), 0);

    let tree = dump(json!({"titles": [{"title": "Test"}]}));
    assert_eq!(count(&tree, "titles"), 1);
    assert_eq!(count(&tree, "titles/title"), 1);

    let data = json!({"titles": [{"title": "Test", "titleType": "Subtitle"}]});
    validate_json(&data);

    let tree = dump(data);
    let elem = tree.select("titles/title")[0];
    assert_eq!(elem.text(), Some("Test"));
    assert_eq!(elem.get_attribute("titleType"), Some("Subtitle"));

    let tree = dump(json!({"titles": [{"title": "Test", "lang": "en"}]}));
    let elem = tree.select("titles/title")[0];
    assert_eq!(elem.xml_lang(), Some("en"));
    assert_eq!(elem.get_attribute("lang"), None);
}

#[test]
fn test_publisher() {
    let data = json!({"publisher": {"name": "test"}});
    validate_json(&data);
    let tree = dump(data);
    assert_eq!(tree.select("publisher")[0].text(), Some("test"));

    let tree = dump(json!({"publisher": "Plain Publisher"}));
    assert_eq!(tree.select("publisher")[0].text(), Some("Plain Publisher"));

    assert_eq!(count(&dump(json!({"publisher": ""})), "publisher"), 0);
}

#[test]
fn test_empty_required_scalars_fail_both_validators() {
    for key in ["publisher", "publicationYear"] {
        let mut record = minimal();
        record[key] = json!("");

        let report = RecordValidator::with_mode(ValidationMode::Lax).check(&record);
        assert!(report.violations().has_path(key), "{} = \"\" accepted", key);

        let report = ResourceValidator::with_mode(ValidationMode::Lax).check(&dump(record));
        let message = format!("Missing required element '{}'", key);
        assert!(report.violations().iter().any(|v| v.message == message));
    }
}

#[test]
fn test_publication_year() {
    let data = json!({"publicationYear": "2002"});
    validate_json(&data);
    let tree = dump(data);
    assert_eq!(tree.select("publicationYear")[0].text(), Some("2002"));

    let tree = dump(json!({"publicationYear": 2002}));
    assert_eq!(tree.select("publicationYear")[0].text(), Some("2002"));

    assert_eq!(count(&dump(json!({"publicationYear": null})), "publicationYear"), 0);
}

#[test]
fn test_subjects() {
    assert!(matches!(
        dump_tree(&json!({"subjects": {"invalid": "data"}})),
        Err(Error::TypeMismatch { .. })
    ));

    assert_eq!(count(&dump(json!({"subjects": []})), "subjects"), 0);

    let tree = dump(json!({"subjects": [{"subject": "test"}]}));
    assert_eq!(count(&tree, "subjects/subject"), 1);

    let data = json!({
        "subjects": [{
            "subject": "test",
            "subjectScheme": "dewey",
            "schemeUri": "dewey-uri",
            "valueUri": "https://cern.ch"
        }]
    });
    validate_json(&data);

    let tree = dump(data);
    let elem = tree.select("subjects/subject")[0];
    assert_eq!(elem.text(), Some("test"));
    assert_eq!(elem.get_attribute("subjectScheme"), Some("dewey"));
    assert_eq!(elem.get_attribute("schemeURI"), Some("dewey-uri"));
    assert_eq!(elem.get_attribute("valueURI"), Some("https://cern.ch"));
}

#[test]
fn test_contributors() {
    assert!(matches!(
        dump_tree(&json!({"contributors": {"invalid": "data"}})),
        Err(Error::TypeMismatch { .. })
    ));

    assert_eq!(count(&dump(json!({"contributors": []})), "contributors"), 0);

    let tree = dump(json!({
        "contributors": [{
            "name": "CERN",
            "nameType": "Organisational",
            "contributorType": "HostingInstitution"
        }]
    }));
    assert_eq!(count(&tree, "contributors/contributor"), 1);
    assert_eq!(count(&tree, "contributors/contributor/contributorName"), 1);
    let contributor = tree.select("contributors/contributor")[0];
    assert_eq!(contributor.get_attribute("contributorType"), Some("HostingInstitution"));
    let name = tree.select("contributors/contributor/contributorName")[0];
    assert_eq!(name.get_attribute("nameType"), Some("Organisational"));
    assert_eq!(count(&tree, "contributors/contributor/nameIdentifier"), 0);
    assert_eq!(count(&tree, "contributors/contributor/affiliation"), 0);

    let data = json!({
        "contributors": [{
            "name": "Smith, John",
            "nameType": "Personal",
            "familyName": "Smith",
            "givenName": "John",
            "contributorType": "ContactPerson",
            "affiliation": [{
                "name": "DataCite",
                "affiliationIdentifier": "https://ror.org/04wxnsj81",
                "affiliationIdentifierScheme": "ROR"
            }],
            "nameIdentifiers": [{
                "nameIdentifier": "1234",
                "schemeUri": "http://orcid.org",
                "nameIdentifierScheme": "orcid"
            }]
        }]
    });
    validate_json(&data);

    let tree = dump(data);
    assert_eq!(count(&tree, "contributors/contributor/contributorName"), 1);
    let name = tree.select("contributors/contributor/contributorName")[0];
    assert_eq!(name.get_attribute("nameType"), Some("Personal"));
    assert_eq!(count(&tree, "contributors/contributor/familyName"), 1);
    assert_eq!(count(&tree, "contributors/contributor/givenName"), 1);
    assert_eq!(count(&tree, "contributors/contributor/nameIdentifier"), 1);
    assert_eq!(count(&tree, "contributors/contributor/affiliation"), 1);
}

#[test]
fn test_dates() {
    assert_eq!(count(&dump(json!({"dates": []})), "dates"), 0);

    let err = dump_tree(&json!({"dates": [{"date": "2011-01-01"}]})).unwrap_err();
    assert!(matches!(
        err,
        Error::MissingField { ref field, ref path } if field == "dateType" && path == "dates[0]"
    ));

    let data = json!({
        "dates": [{
            "date": "2011-01-01",
            "dateType": "Accepted",
            "dateInformation": "Date of paper acceptance."
        }]
    });
    validate_json(&data);

    let tree = dump(data);
    let elem = tree.select("dates/date")[0];
    assert_eq!(elem.text(), Some("2011-01-01"));
    assert_eq!(elem.get_attribute("dateType"), Some("Accepted"));
    assert_eq!(elem.get_attribute("dateInformation"), Some("Date of paper acceptance."));
}

#[test]
fn test_language() {
    let data = json!({"language": "en"});
    validate_json(&data);
    let tree = dump(data);
    assert_eq!(tree.select("language")[0].text(), Some("en"));

    assert_eq!(count(&dump(json!({"language": ""})), "language"), 0);
}

#[test]
fn test_resource_type() {
    let data = json!({
        "types": {"resourceTypeGeneral": "Software", "resourceType": "Science Software"}
    });
    validate_json(&data);

    let tree = dump(data);
    let elem = tree.select("resourceType")[0];
    assert_eq!(elem.get_attribute("resourceTypeGeneral"), Some("Software"));
    assert_eq!(elem.text(), Some("Science Software"));
}

#[test]
fn test_related_identifiers() {
    assert_eq!(count(&dump(json!({"relatedIdentifiers": []})), "relatedIdentifiers"), 0);

    let data = json!({
        "relatedIdentifiers": [{
            "relatedIdentifier": "10.1234/foo",
            "relatedIdentifierType": "DOI",
            "relationType": "Cites"
        }]
    });
    validate_json(&data);
    let tree = dump(data);
    let elem = tree.select("relatedIdentifiers/relatedIdentifier")[0];
    assert_eq!(elem.get_attribute("relatedIdentifierType"), Some("DOI"));
    assert_eq!(elem.get_attribute("relationType"), Some("Cites"));
    assert_eq!(elem.text(), Some("10.1234/foo"));

    let data = json!({
        "relatedIdentifiers": [{
            "relatedIdentifier": "10.1234/foo",
            "relatedIdentifierType": "DOI",
            "relationType": "HasMetadata",
            "relatedMetadataScheme": "MARC21",
            "schemeUri": "http://loc.gov",
            "schemeType": "XSD",
            "resourceTypeGeneral": "Software"
        }]
    });
    validate_json(&data);
    let tree = dump(data);
    let elem = tree.select("relatedIdentifiers/relatedIdentifier")[0];
    assert_eq!(elem.get_attribute("relatedMetadataScheme"), Some("MARC21"));
    assert_eq!(elem.get_attribute("schemeURI"), Some("http://loc.gov"));
    assert_eq!(elem.get_attribute("schemeType"), Some("XSD"));
    assert_eq!(elem.get_attribute("resourceTypeGeneral"), Some("Software"));
}

#[test]
fn test_sizes() {
    assert_eq!(count(&dump(json!({"sizes": []})), "sizes"), 0);

    let data = json!({"sizes": ["123"]});
    validate_json(&data);
    let tree = dump(data);
    assert_eq!(tree.select("sizes/size")[0].text(), Some("123"));
}

#[test]
fn test_sizes_with_empty_entry() {
    let data = json!({"sizes": ["1 MB", ""]});
    validate_json(&data);

    let mut record = minimal();
    record["sizes"] = data["sizes"].clone();
    let tree = dump(record);
    let sizes = tree.select("sizes/size");
    assert_eq!(sizes.len(), 2);
    assert_eq!(sizes[0].text(), Some("1 MB"));
    assert_eq!(sizes[1].text(), None);
    ResourceValidator::new().assert_valid(&tree).unwrap();
}

#[test]
fn test_formats() {
    assert_eq!(count(&dump(json!({"formats": []})), "formats"), 0);

    let data = json!({"formats": ["abc"]});
    validate_json(&data);
    let tree = dump(data);
    assert_eq!(tree.select("formats/format")[0].text(), Some("abc"));
}

#[test]
fn test_version() {
    assert_eq!(count(&dump(json!({"version": ""})), "version"), 0);

    let data = json!({"version": "v4.5"});
    validate_json(&data);
    let tree = dump(data);
    assert_eq!(tree.select("version")[0].text(), Some("v4.5"));
}

#[test]
fn test_rights() {
    assert_eq!(count(&dump(json!({"rightsList": []})), "rightsList"), 0);

    let data = json!({
        "rightsList": [{"rights": "CC", "rightsUri": "http://cc.org", "lang": "en"}]
    });
    validate_json(&data);
    let tree = dump(data);
    let elem = tree.select("rightsList/rights")[0];
    assert_eq!(elem.get_attribute("rightsURI"), Some("http://cc.org"));
    assert_eq!(elem.xml_lang(), Some("en"));
    assert_eq!(elem.text(), Some("CC"));
}

#[test]
fn test_descriptions() {
    assert_eq!(count(&dump(json!({"descriptions": []})), "descriptions"), 0);

    let data = json!({
        "descriptions": [{"description": "Test", "descriptionType": "Abstract"}]
    });
    validate_json(&data);
    let tree = dump(data);
    let elem = tree.select("descriptions/description")[0];
    assert_eq!(elem.get_attribute("descriptionType"), Some("Abstract"));
    assert_eq!(elem.text(), Some("Test"));
}

#[test]
fn test_funding_references() {
    assert_eq!(count(&dump(json!({"fundingReferences": []})), "fundingReferences"), 0);

    let data = json!({
        "fundingReferences": [{
            "funderName": "funderName",
            "funderIdentifier": "id",
            "funderIdentifierType": "ISNI",
            "awardNumber": "282625",
            "awardUri": "https://cern.ch",
            "awardTitle": "title"
        }]
    });
    validate_json(&data);

    let tree = dump(data);
    let elem = tree.select("fundingReferences/fundingReference")[0];
    assert_eq!(elem.select("funderName")[0].text(), Some("funderName"));
    let identifier = elem.select("funderIdentifier")[0];
    assert_eq!(identifier.text(), Some("id"));
    assert_eq!(identifier.get_attribute("funderIdentifierType"), Some("ISNI"));
    let award = elem.select("awardNumber")[0];
    assert_eq!(award.text(), Some("282625"));
    assert_eq!(award.get_attribute("awardURI"), Some("https://cern.ch"));
    assert_eq!(elem.select("awardTitle")[0].text(), Some("title"));
}

#[test]
fn test_geo_locations() {
    assert_eq!(count(&dump(json!({"geoLocations": []})), "geoLocations"), 0);

    let data = json!({
        "geoLocations": [{
            "geoLocationPoint": {"pointLongitude": 31.12, "pointLatitude": 67},
            "geoLocationBox": {
                "westBoundLongitude": 31.12,
                "eastBoundLongitude": 67,
                "southBoundLatitude": 32,
                "northBoundLatitude": 68
            },
            "geoLocationPlace": "Atlantic Ocean",
            "geoLocationPolygon": [
                {"polygonPoint": {"pointLongitude": -71.032, "pointLatitude": 41.090}},
                {"polygonPoint": {"pointLongitude": -68.211, "pointLatitude": 42.893}},
                {"polygonPoint": {"pointLongitude": -72.032, "pointLatitude": 39.090}},
                {"polygonPoint": {"pointLongitude": -71.032, "pointLatitude": 41.090}},
                {"inPolygonPoint": {"pointLongitude": -52.032, "pointLatitude": 12.090}}
            ]
        }]
    });
    validate_json(&data);

    let tree = dump(data);
    let elem = tree.select("geoLocations/geoLocation")[0];
    let text = |path: &str| elem.select(path)[0].text().map(str::to_string);

    assert_eq!(text("geoLocationPoint/pointLongitude").as_deref(), Some("31.12"));
    assert_eq!(text("geoLocationPoint/pointLatitude").as_deref(), Some("67"));
    assert_eq!(text("geoLocationBox/westBoundLongitude").as_deref(), Some("31.12"));
    assert_eq!(text("geoLocationBox/eastBoundLongitude").as_deref(), Some("67"));
    assert_eq!(text("geoLocationBox/southBoundLatitude").as_deref(), Some("32"));
    assert_eq!(text("geoLocationBox/northBoundLatitude").as_deref(), Some("68"));
    assert_eq!(text("geoLocationPlace").as_deref(), Some("Atlantic Ocean"));

    let polygon = elem.select("geoLocationPolygon")[0];
    let points = polygon.select("polygonPoint");
    assert_eq!(points.len(), 4);
    let expected = [
        ("-71.032", "41.09"),
        ("-68.211", "42.893"),
        ("-72.032", "39.09"),
        ("-71.032", "41.09"),
    ];
    for (point, (longitude, latitude)) in points.iter().zip(expected) {
        assert_eq!(point.select("pointLongitude")[0].text(), Some(longitude));
        assert_eq!(point.select("pointLatitude")[0].text(), Some(latitude));
    }

    let inner = polygon.select("inPolygonPoint")[0];
    assert_eq!(inner.select("pointLatitude")[0].text(), Some("12.09"));
    assert_eq!(inner.select("pointLongitude")[0].text(), Some("-52.032"));
    assert_eq!(
        polygon.children.last().map(|c| c.local_name()),
        Some("inPolygonPoint")
    );
}

#[test]
fn test_related_items() {
    assert_eq!(count(&dump(json!({"relatedItems": []})), "relatedItems"), 0);

    let data = json!({
        "relatedItems": [{
            "relatedItemType": "Journal",
            "relationType": "IsPublishedIn",
            "relatedItemIdentifier": {
                "relatedItemIdentifier": "10.1016/j.epsl.2011.11.037",
                "relatedItemIdentifierType": "DOI"
            },
            "titles": [{"title": "Journal of Examples"}],
            "volume": "776",
            "number": "1",
            "numberType": "Chapter"
        }]
    });
    validate_json(&data);

    let tree = dump(data);
    let item = tree.select("relatedItems/relatedItem")[0];
    assert_eq!(item.get_attribute("relatedItemType"), Some("Journal"));
    assert_eq!(item.get_attribute("relationType"), Some("IsPublishedIn"));
    let identifier = item.select("relatedItemIdentifier")[0];
    assert_eq!(identifier.get_attribute("relatedItemIdentifierType"), Some("DOI"));
    assert_eq!(item.select("titles/title")[0].text(), Some("Journal of Examples"));
    assert_eq!(item.select("volume")[0].text(), Some("776"));
    assert_eq!(item.select("number")[0].get_attribute("numberType"), Some("Chapter"));
}

#[test]
fn test_minimal_record_validates() {
    let record = minimal();
    RecordValidator::new().validate(&record).unwrap();
    ResourceValidator::new()
        .assert_valid(&dump_tree(&record).unwrap())
        .unwrap();
}

#[test]
fn test_minimal_xml() {
    let root = Element::parse(MINIMAL_XML).unwrap();
    ResourceValidator::new().assert_valid(&root).unwrap();
}

#[test]
fn test_full_example_validates() {
    let record: Value = serde_json::from_str(FULL_EXAMPLE_JSON).unwrap();
    RecordValidator::new().validate(&record).unwrap();
    ResourceValidator::new()
        .assert_valid(&dump_tree(&record).unwrap())
        .unwrap();
}

#[test]
fn test_empty_arrays() {
    for field in FIELD_NAMES {
        let mut record = minimal();
        record[*field] = json!([]);

        assert!(
            RecordValidator::new().is_valid(&record),
            "empty {} should validate",
            field
        );

        let tree = dump_tree(&record).unwrap();
        assert!(tree.child(field).is_none(), "empty {} wrote a wrapper", field);
        assert!(ResourceValidator::new().is_valid(&tree));
    }
}
