//! Tests for biosample-model types.

use biosample_model::{
    Attribute, AttributeGroupValidationReport, AttributeType, AttributeValidationReport,
    MatchValue, Record, RecordValidationReport,
};

fn sample_record() -> Record {
    Record::new("1001")
        .with_package("Metagenome.environmental.1.0")
        .with_attribute("geo_loc_name", "Canada: Vancouver")
        .with_attribute("host_taxid", "9606")
}

#[test]
fn record_attributes_are_keyed_by_harmonized_name() {
    let mut record = sample_record();
    assert_eq!(
        record.attribute("geo_loc_name").map(|a| a.value.as_str()),
        Some("Canada: Vancouver")
    );

    record.insert_attribute(Attribute::new(
        "host_taxid",
        "host taxonomy id",
        "host taxonomy ID",
        "10090",
    ));
    assert_eq!(record.attributes.len(), 2);
    let taxid = record.attribute("host_taxid").expect("host_taxid");
    assert_eq!(taxid.value, "10090");
    assert_eq!(taxid.submitted_name, "host taxonomy id");
}

#[test]
fn record_report_lookups() {
    let record = sample_record();
    let report = RecordValidationReport::new(
        record,
        vec![
            AttributeGroupValidationReport::new(
                AttributeType::Integer.group_name(),
                vec![AttributeValidationReport::new(
                    Attribute::new("host_taxid", "host_taxid", "host_taxid", "9606"),
                    true,
                    true,
                )],
            ),
            AttributeGroupValidationReport::new(
                AttributeType::ValueSet.group_name(),
                vec![
                    AttributeValidationReport::missing("sex"),
                    AttributeValidationReport::new(
                        Attribute::new("host_sex", "host_sex", "host_sex", "MALE"),
                        true,
                        true,
                    )
                    .with_match(MatchValue::Match("male".to_string())),
                ],
            ),
        ],
    );

    assert_eq!(report.attribute_reports().count(), 3);
    assert!(report.group("integer").is_some());
    assert!(report.group("boolean").is_none());
    let sex = report.find("sex").expect("sex report");
    assert!(!sex.is_filled_in);
    assert!(sex.is_valid());
    let value_set = report.group("value_set").expect("value_set group");
    assert_eq!(value_set.filled_in_count(), 1);
    assert_eq!(value_set.invalid_count(), 0);
    assert!(value_set.is_valid());
}

#[test]
fn report_serializes() {
    let report = AttributeValidationReport::new(
        Attribute::new("host_sex", "sex", "host sex", "Female"),
        true,
        true,
    )
    .with_match(MatchValue::Match("female".to_string()));
    let json = serde_json::to_string(&report).expect("serialize report");
    let round: AttributeValidationReport = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(round, report);
    assert!(json.contains("\"Match\":\"female\""));
}
