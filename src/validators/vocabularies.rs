//! DataCite 4.5 controlled vocabularies and value patterns

use once_cell::sync::Lazy;

use super::facets::{EnumerationFacet, PatternFacet};

/// `resourceTypeGeneral`, also used for `relatedItemType`
pub const RESOURCE_TYPE_GENERAL: EnumerationFacet = EnumerationFacet {
    name: "resourceTypeGeneral",
    values: &[
        "Audiovisual",
        "Book",
        "BookChapter",
        "Collection",
        "ComputationalNotebook",
        "ConferencePaper",
        "ConferenceProceeding",
        "DataPaper",
        "Dataset",
        "Dissertation",
        "Event",
        "Image",
        "Instrument",
        "InteractiveResource",
        "Journal",
        "JournalArticle",
        "Model",
        "OutputManagementPlan",
        "PeerReview",
        "PhysicalObject",
        "Preprint",
        "Report",
        "Service",
        "Software",
        "Sound",
        "Standard",
        "StudyRegistration",
        "Text",
        "Workflow",
        "Other",
    ],
};

/// `nameType`
pub const NAME_TYPE: EnumerationFacet = EnumerationFacet {
    name: "nameType",
    values: &["Organizational", "Personal"],
};

/// `titleType`
pub const TITLE_TYPE: EnumerationFacet = EnumerationFacet {
    name: "titleType",
    values: &["AlternativeTitle", "Subtitle", "TranslatedTitle", "Other"],
};

/// `contributorType`
pub const CONTRIBUTOR_TYPE: EnumerationFacet = EnumerationFacet {
    name: "contributorType",
    values: &[
        "ContactPerson",
        "DataCollector",
        "DataCurator",
        "DataManager",
        "Distributor",
        "Editor",
        "HostingInstitution",
        "Producer",
        "ProjectLeader",
        "ProjectManager",
        "ProjectMember",
        "RegistrationAgency",
        "RegistrationAuthority",
        "RelatedPerson",
        "Researcher",
        "ResearchGroup",
        "RightsHolder",
        "Sponsor",
        "Supervisor",
        "WorkPackageLeader",
        "Other",
    ],
};

/// `dateType`
pub const DATE_TYPE: EnumerationFacet = EnumerationFacet {
    name: "dateType",
    values: &[
        "Accepted",
        "Available",
        "Copyrighted",
        "Collected",
        "Created",
        "Issued",
        "Submitted",
        "Updated",
        "Valid",
        "Withdrawn",
        "Other",
    ],
};

/// `descriptionType`
pub const DESCRIPTION_TYPE: EnumerationFacet = EnumerationFacet {
    name: "descriptionType",
    values: &[
        "Abstract",
        "Methods",
        "SeriesInformation",
        "TableOfContents",
        "TechnicalInfo",
        "Other",
    ],
};

/// `relatedIdentifierType`, also used for `relatedItemIdentifierType`
pub const RELATED_IDENTIFIER_TYPE: EnumerationFacet = EnumerationFacet {
    name: "relatedIdentifierType",
    values: &[
        "ARK", "arXiv", "bibcode", "DOI", "EAN13", "EISSN", "Handle", "IGSN", "ISBN", "ISSN",
        "ISTC", "LISSN", "LSID", "PMID", "PURL", "UPC", "URL", "URN", "w3id",
    ],
};

/// `relationType`
pub const RELATION_TYPE: EnumerationFacet = EnumerationFacet {
    name: "relationType",
    values: &[
        "IsCitedBy",
        "Cites",
        "IsSupplementTo",
        "IsSupplementedBy",
        "IsContinuedBy",
        "Continues",
        "IsDescribedBy",
        "Describes",
        "HasMetadata",
        "IsMetadataFor",
        "HasVersion",
        "IsVersionOf",
        "IsNewVersionOf",
        "IsPreviousVersionOf",
        "IsPartOf",
        "HasPart",
        "IsPublishedIn",
        "IsReferencedBy",
        "References",
        "IsDocumentedBy",
        "Documents",
        "IsCompiledBy",
        "Compiles",
        "IsVariantFormOf",
        "IsOriginalFormOf",
        "IsIdenticalTo",
        "IsReviewedBy",
        "Reviews",
        "IsDerivedFrom",
        "IsSourceOf",
        "IsRequiredBy",
        "Requires",
        "IsObsoletedBy",
        "Obsoletes",
        "IsCollectedBy",
        "Collects",
    ],
};

/// `funderIdentifierType`
pub const FUNDER_IDENTIFIER_TYPE: EnumerationFacet = EnumerationFacet {
    name: "funderIdentifierType",
    values: &["ISNI", "GRID", "ROR", "Crossref Funder ID", "Other"],
};

/// `numberType` of a related item
pub const NUMBER_TYPE: EnumerationFacet = EnumerationFacet {
    name: "numberType",
    values: &["Article", "Chapter", "Report", "Other"],
};

/// Four digit publication year
pub static YEAR: Lazy<PatternFacet> = Lazy::new(|| {
    PatternFacet::new(r"^[0-9]{4}$").expect("year pattern is a valid regex")
});

/// DOI name: directory indicator `10.`, registrant code, suffix
pub static DOI: Lazy<PatternFacet> = Lazy::new(|| {
    PatternFacet::new(r"^10\.\S+/\S+$").expect("DOI pattern is a valid regex")
});
