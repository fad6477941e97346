//! Package-specific validation for `Metagenome.environmental.1.0`.
//!
//! Follows the NCBI package definition: five required attributes and six
//! optional ones, reported under the `required` and `optional` groups.

use biosample_model::{
    Attribute, AttributeGroupValidationReport, AttributeValidationReport, MatchValue, Record,
    RecordValidationReport,
};
use biosample_standards::LocationVocabulary;

use crate::error::ValidationError;
use crate::rules;
use crate::validator::RecordValidator;

pub const METAGENOME_PACKAGE_NAME: &str = "Metagenome.environmental.1.0";

pub const REQUIRED_GROUP: &str = "required";
pub const OPTIONAL_GROUP: &str = "optional";

const COLLECTION_DATE: &str = "collection_date";
const GEO_LOC_NAME: &str = "geo_loc_name";
const LAT_LON: &str = "lat_lon";
const HOST: &str = "host";
const ISOLATION_SOURCE: &str = "isolation_source";
const REL_TO_OXYGEN: &str = "rel_to_oxygen";

/// Optional attributes that are only checked for presence, in report order
/// around `rel_to_oxygen`.
const OPTIONAL_BEFORE_OXYGEN: &[&str] = &["ref_biomaterial"];
const OPTIONAL_AFTER_OXYGEN: &[&str] = &[
    "samp_collect_device",
    "samp_mat_process",
    "samp_size",
    "source_material_id",
];

pub const REL_TO_OXYGEN_VALUES: &[&str] = &[
    "aerobe",
    "anaerobe",
    "facultative",
    "microaerophilic",
    "microanaerobe",
    "obligate aerobe",
    "obligate anaerobe",
];

#[derive(Debug, Clone)]
pub struct MetagenomePackageValidator {
    vocabulary: LocationVocabulary,
    rel_to_oxygen_values: Vec<String>,
}

impl MetagenomePackageValidator {
    pub fn new(vocabulary: LocationVocabulary) -> Self {
        Self {
            vocabulary,
            rel_to_oxygen_values: REL_TO_OXYGEN_VALUES
                .iter()
                .map(|value| (*value).to_string())
                .collect(),
        }
    }

    pub fn package_name(&self) -> &'static str {
        METAGENOME_PACKAGE_NAME
    }

    fn required_reports(&self, record: &Record) -> Vec<AttributeValidationReport> {
        vec![
            check(record, COLLECTION_DATE, |attr| {
                format_report(attr, rules::is_timestamp(&attr.value))
            }),
            check(record, GEO_LOC_NAME, |attr| {
                format_report(
                    attr,
                    rules::is_geographic_location(&attr.value, &self.vocabulary),
                )
            }),
            check(record, LAT_LON, |attr| {
                format_report(attr, rules::is_coordinate(&attr.value))
            }),
            check(record, HOST, presence_report),
            check(record, ISOLATION_SOURCE, presence_report),
        ]
    }

    fn optional_reports(&self, record: &Record) -> Vec<AttributeValidationReport> {
        let mut reports: Vec<_> = OPTIONAL_BEFORE_OXYGEN
            .iter()
            .map(|name| check(record, name, presence_report))
            .collect();
        reports.push(check(record, REL_TO_OXYGEN, |attr| {
            let matched = rules::value_set_match(&attr.value, &self.rel_to_oxygen_values);
            format_report(attr, matched.is_some()).with_match(
                matched.map_or(MatchValue::NoMatch, |value| MatchValue::Match(value.to_string())),
            )
        }));
        reports.extend(
            OPTIONAL_AFTER_OXYGEN
                .iter()
                .map(|name| check(record, name, presence_report)),
        );
        reports
    }
}

impl RecordValidator for MetagenomePackageValidator {
    fn validate(&self, record: &Record) -> Result<RecordValidationReport, ValidationError> {
        if !record
            .package_name
            .eq_ignore_ascii_case(METAGENOME_PACKAGE_NAME)
        {
            return Err(ValidationError::WrongPackage {
                expected: METAGENOME_PACKAGE_NAME.to_string(),
                actual: record.package_name.clone(),
            });
        }
        let groups = vec![
            AttributeGroupValidationReport::new(REQUIRED_GROUP, self.required_reports(record)),
            AttributeGroupValidationReport::new(OPTIONAL_GROUP, self.optional_reports(record)),
        ];
        Ok(RecordValidationReport::new(record.clone(), groups))
    }

    /// The format-checked required attributes must be valid, and either
    /// `host` or `isolation_source` must be filled in.
    fn is_valid(&self, report: &RecordValidationReport) -> bool {
        let Some(required) = report.group(REQUIRED_GROUP) else {
            return false;
        };
        let find = |name: &str| {
            required
                .reports
                .iter()
                .find(|r| r.attribute.harmonized_name == name)
        };
        let formats_valid = [COLLECTION_DATE, GEO_LOC_NAME, LAT_LON]
            .into_iter()
            .all(|name| find(name).is_some_and(AttributeValidationReport::is_valid));
        let has_source = [HOST, ISOLATION_SOURCE]
            .into_iter()
            .any(|name| find(name).is_some_and(|r| r.is_filled_in));
        formats_valid && has_source
    }
}

fn check(
    record: &Record,
    name: &str,
    rule: impl FnOnce(&Attribute) -> AttributeValidationReport,
) -> AttributeValidationReport {
    match record.attribute(name) {
        Some(attribute) => rule(attribute),
        None => AttributeValidationReport::missing(name),
    }
}

fn format_report(attribute: &Attribute, is_valid_format: bool) -> AttributeValidationReport {
    AttributeValidationReport::new(attribute.clone(), attribute.is_filled_in(), is_valid_format)
}

fn presence_report(attribute: &Attribute) -> AttributeValidationReport {
    format_report(attribute, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> MetagenomePackageValidator {
        MetagenomePackageValidator::new(LocationVocabulary::from_lines(["USA", "Canada"]))
    }

    fn metagenome_record() -> Record {
        Record::new("42")
            .with_package(METAGENOME_PACKAGE_NAME)
            .with_attribute("collection_date", "2014-06-01")
            .with_attribute("geo_loc_name", "USA: Maryland")
            .with_attribute("lat_lon", "38.98 N 77.11 W")
            .with_attribute("isolation_source", "soil")
    }

    #[test]
    fn wrong_package_is_an_error() {
        let record = Record::new("1").with_package("MIGS.ba.5.0");
        let err = validator().validate(&record).unwrap_err();
        assert_eq!(
            err,
            ValidationError::WrongPackage {
                expected: METAGENOME_PACKAGE_NAME.to_string(),
                actual: "MIGS.ba.5.0".to_string(),
            }
        );
    }

    #[test]
    fn package_name_match_ignores_case() {
        let record = metagenome_record().with_package("metagenome.ENVIRONMENTAL.1.0");
        assert!(validator().validate(&record).is_ok());
    }

    #[test]
    fn groups_and_order() {
        let report = validator().validate(&metagenome_record()).expect("validate");
        let names: Vec<_> = report.groups.iter().map(|g| g.group_name.as_str()).collect();
        assert_eq!(names, vec!["required", "optional"]);
        let optional: Vec<_> = report.groups[1]
            .reports
            .iter()
            .map(|r| r.attribute.harmonized_name.as_str())
            .collect();
        assert_eq!(
            optional,
            vec![
                "ref_biomaterial",
                "rel_to_oxygen",
                "samp_collect_device",
                "samp_mat_process",
                "samp_size",
                "source_material_id"
            ]
        );
    }

    #[test]
    fn valid_record() {
        let validator = validator();
        let report = validator.validate(&metagenome_record()).expect("validate");
        assert!(validator.is_valid(&report));
    }

    #[test]
    fn needs_host_or_isolation_source() {
        let mut record = metagenome_record();
        record.attributes.remove("isolation_source");
        let validator = validator();
        let report = validator.validate(&record).expect("validate");
        assert!(!validator.is_valid(&report));

        let report = validator
            .validate(&record.with_attribute("host", "Homo sapiens"))
            .expect("validate");
        assert!(validator.is_valid(&report));
    }

    #[test]
    fn bad_coordinate_invalidates() {
        let record = metagenome_record().with_attribute("lat_lon", "38.98,77.11");
        let validator = validator();
        let report = validator.validate(&record).expect("validate");
        assert!(!validator.is_valid(&report));
        assert!(!report.find("lat_lon").expect("lat_lon").is_valid());
    }

    #[test]
    fn rel_to_oxygen_uses_value_set() {
        let record = metagenome_record().with_attribute("rel_to_oxygen", "Obligate Anaerobe");
        let report = validator().validate(&record).expect("validate");
        let oxygen = report.find("rel_to_oxygen").expect("rel_to_oxygen");
        assert!(oxygen.is_valid());
        assert_eq!(
            oxygen.match_value,
            MatchValue::Match("obligate anaerobe".to_string())
        );
    }
}
