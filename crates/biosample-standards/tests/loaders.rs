use std::fs;

use biosample_model::AttributeType;
use biosample_standards::{LocationVocabulary, SchemaRegistry, StandardsError};

#[test]
fn loads_default_attribute_definitions() {
    let registry = SchemaRegistry::load_default().expect("load attributes");
    assert!(!registry.is_empty());
    assert_eq!(
        registry.type_for_name("geo_loc_name"),
        Some(AttributeType::Term)
    );
    assert_eq!(
        registry.type_for_name("collection_date"),
        Some(AttributeType::Timestamp)
    );
    let host_disease = registry.schema("host_disease").expect("host_disease");
    assert_eq!(host_disease.allowed_values, vec!["DOID", "MESH"]);
    assert!(
        registry
            .schema("lat_lon")
            .expect("lat_lon")
            .has_marker("lat_lon")
    );
    assert!(!registry.types().contains(&AttributeType::Other));
}

#[test]
fn every_default_type_token_is_recognized() {
    let registry = SchemaRegistry::load_default().expect("load attributes");
    assert!(
        registry.schemas_of_type(AttributeType::Other).is_empty(),
        "attributes.csv should only use known type tokens"
    );
    let value_sets = registry.schemas_of_type(AttributeType::ValueSet);
    assert!(value_sets.iter().all(|s| !s.allowed_values.is_empty()));
}

#[test]
fn loads_default_location_vocabulary() {
    let vocabulary = LocationVocabulary::load_default().expect("load country list");
    assert!(vocabulary.contains("Canada"));
    assert!(vocabulary.contains("Pacific Ocean"));
    assert!(!vocabulary.contains("Neverland"));
}

#[test]
fn loads_definitions_from_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("attributes.csv");
    fs::write(&path, "smoker,BOOLEAN\nhost_sex,VALUE_SET,male|female\n").expect("write csv");

    let registry = SchemaRegistry::from_csv_path(&path).expect("load csv");
    assert_eq!(registry.len(), 2);
    let names: Vec<_> = registry.schemas().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["smoker", "host_sex"]);
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.csv");
    let err = SchemaRegistry::from_csv_path(&path).unwrap_err();
    match err {
        StandardsError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
}
