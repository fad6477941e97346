//! Schema-driven attribute validation.

use biosample_model::{
    Attribute, AttributeGroupValidationReport, AttributeSchema, AttributeType,
    AttributeValidationReport, MatchValue, Record, RecordValidationReport,
};
use biosample_ontology::TermResolver;
use biosample_standards::{LocationVocabulary, SchemaRegistry};
use tracing::{debug, warn};

use crate::error::ValidationError;
use crate::rules;
use crate::validator::RecordValidator;

/// `TERM` marker selecting the geographic location rule.
pub const GEO_LOCATION_MARKER: &str = "geo_loc_name";

/// `TERM` marker selecting the coordinate rule.
pub const COORDINATE_MARKER: &str = "lat_lon";

/// Validates every schema-declared attribute of a record.
///
/// One group is emitted per attribute type known to the registry, named by
/// the lower-cased type token. Schema-declared attributes the record lacks
/// get a missing report, which is always valid.
#[derive(Debug, Clone)]
pub struct AttributeValidator {
    registry: SchemaRegistry,
    vocabulary: LocationVocabulary,
    resolver: TermResolver,
}

impl AttributeValidator {
    pub fn new(
        registry: SchemaRegistry,
        vocabulary: LocationVocabulary,
        resolver: TermResolver,
    ) -> Self {
        Self {
            registry,
            vocabulary,
            resolver,
        }
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn vocabulary(&self) -> &LocationVocabulary {
        &self.vocabulary
    }

    pub fn validate_record(&self, record: &Record) -> RecordValidationReport {
        let groups = self
            .registry
            .types()
            .into_iter()
            .map(|attribute_type| {
                let reports = self
                    .registry
                    .schemas_of_type(attribute_type)
                    .into_iter()
                    .map(|schema| match record.attribute(&schema.name) {
                        Some(attribute) => self.validate_attribute(schema, attribute),
                        None => AttributeValidationReport::missing(&schema.name),
                    })
                    .collect();
                AttributeGroupValidationReport::new(attribute_type.group_name(), reports)
            })
            .collect();
        RecordValidationReport::new(record.clone(), groups)
    }

    /// Apply the rule for the schema's type to one present attribute.
    pub fn validate_attribute(
        &self,
        schema: &AttributeSchema,
        attribute: &Attribute,
    ) -> AttributeValidationReport {
        let report = match schema.attribute_type {
            AttributeType::Boolean => {
                format_report(attribute, rules::is_boolean(&attribute.value))
            }
            AttributeType::Integer => {
                format_report(attribute, rules::is_integer(&attribute.value))
            }
            AttributeType::Timestamp => {
                format_report(attribute, rules::is_timestamp(&attribute.value))
            }
            AttributeType::ValueSet => self.validate_value_set(schema, attribute),
            AttributeType::OntologyTerm => {
                self.validate_ontology_term(attribute, &schema.allowed_values)
            }
            AttributeType::Term => self.validate_term(schema, attribute),
            AttributeType::Other => {
                warn!(
                    attribute = %schema.name,
                    attribute_type = %schema.attribute_type,
                    "unsupported schema type"
                );
                AttributeValidationReport::new(attribute.clone(), false, false)
            }
        };
        if !report.is_valid() {
            debug!(
                attribute = %schema.name,
                attribute_type = %schema.attribute_type,
                "attribute has invalid format"
            );
        }
        report
    }

    fn validate_value_set(
        &self,
        schema: &AttributeSchema,
        attribute: &Attribute,
    ) -> AttributeValidationReport {
        let matched = rules::value_set_match(&attribute.value, &schema.allowed_values);
        AttributeValidationReport::new(
            attribute.clone(),
            attribute.is_filled_in(),
            matched.is_some(),
        )
        .with_match(matched.map_or(MatchValue::NoMatch, |value| {
            MatchValue::Match(value.to_string())
        }))
    }

    fn validate_term(
        &self,
        schema: &AttributeSchema,
        attribute: &Attribute,
    ) -> AttributeValidationReport {
        if schema.has_marker(GEO_LOCATION_MARKER) {
            format_report(
                attribute,
                rules::is_geographic_location(&attribute.value, &self.vocabulary),
            )
        } else if schema.has_marker(COORDINATE_MARKER) {
            format_report(attribute, rules::is_coordinate(&attribute.value))
        } else {
            self.validate_ontology_term(attribute, &[])
        }
    }

    fn validate_ontology_term(
        &self,
        attribute: &Attribute,
        ontologies: &[String],
    ) -> AttributeValidationReport {
        let is_filled_in =
            attribute.is_filled_in() && !rules::is_missing_value(&attribute.value);
        if !is_filled_in {
            return AttributeValidationReport::new(attribute.clone(), false, false);
        }
        let term = rules::normalize_term(&attribute.value);
        let report = self.resolver.resolve(&term, true, ontologies);
        AttributeValidationReport::new(
            attribute.clone(),
            true,
            report.is_resolvable_ontology_class(),
        )
        .with_match(report.match_value())
    }
}

impl RecordValidator for AttributeValidator {
    fn validate(&self, record: &Record) -> Result<RecordValidationReport, ValidationError> {
        Ok(self.validate_record(record))
    }
}

fn format_report(attribute: &Attribute, is_valid_format: bool) -> AttributeValidationReport {
    AttributeValidationReport::new(attribute.clone(), attribute.is_filled_in(), is_valid_format)
}
