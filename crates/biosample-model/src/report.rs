//! Validation report value objects.
//!
//! Reports are produced fresh for every validation call and never mutated
//! afterwards. Validity is always derived, never stored:
//!
//! ```text
//! is_valid = (is_filled_in && is_valid_format) || !is_filled_in
//! ```
//!
//! so an absent or blank attribute is valid regardless of its format flag.

use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;
use crate::record::Record;

/// The value an attribute was matched to, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchValue {
    #[default]
    NoMatch,
    Match(String),
}

impl MatchValue {
    /// `Match` for non-blank input, `NoMatch` otherwise.
    pub fn from_non_empty(value: &str) -> Self {
        if value.trim().is_empty() {
            MatchValue::NoMatch
        } else {
            MatchValue::Match(value.to_string())
        }
    }

    pub fn as_deref(&self) -> Option<&str> {
        match self {
            MatchValue::NoMatch => None,
            MatchValue::Match(value) => Some(value.as_str()),
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, MatchValue::Match(_))
    }
}

/// Verdict for a single attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValidationReport {
    pub attribute: Attribute,
    pub is_filled_in: bool,
    pub is_valid_format: bool,
    pub match_value: MatchValue,
}

impl AttributeValidationReport {
    pub fn new(attribute: Attribute, is_filled_in: bool, is_valid_format: bool) -> Self {
        Self {
            attribute,
            is_filled_in,
            is_valid_format,
            match_value: MatchValue::NoMatch,
        }
    }

    #[must_use]
    pub fn with_match(mut self, match_value: MatchValue) -> Self {
        self.match_value = match_value;
        self
    }

    /// Report for a schema-declared attribute the record does not carry.
    pub fn missing(name: &str) -> Self {
        Self::new(Attribute::missing(name), false, false)
    }

    pub fn is_valid(&self) -> bool {
        (self.is_filled_in && self.is_valid_format) || !self.is_filled_in
    }
}

/// Attribute reports sharing a group (one attribute type, or a package section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeGroupValidationReport {
    pub group_name: String,
    pub reports: Vec<AttributeValidationReport>,
}

impl AttributeGroupValidationReport {
    pub fn new(group_name: impl Into<String>, reports: Vec<AttributeValidationReport>) -> Self {
        Self {
            group_name: group_name.into(),
            reports,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.reports.iter().all(AttributeValidationReport::is_valid)
    }

    pub fn filled_in_count(&self) -> usize {
        self.reports.iter().filter(|r| r.is_filled_in).count()
    }

    pub fn invalid_count(&self) -> usize {
        self.reports.iter().filter(|r| !r.is_valid()).count()
    }
}

/// Full verdict for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordValidationReport {
    pub record: Record,
    pub groups: Vec<AttributeGroupValidationReport>,
}

impl RecordValidationReport {
    pub fn new(record: Record, groups: Vec<AttributeGroupValidationReport>) -> Self {
        Self { record, groups }
    }

    /// Iterate every attribute report across all groups, in group order.
    pub fn attribute_reports(&self) -> impl Iterator<Item = &AttributeValidationReport> {
        self.groups.iter().flat_map(|group| group.reports.iter())
    }

    pub fn group(&self, group_name: &str) -> Option<&AttributeGroupValidationReport> {
        self.groups.iter().find(|g| g.group_name == group_name)
    }

    /// Find the report for an attribute by harmonized name.
    pub fn find(&self, harmonized_name: &str) -> Option<&AttributeValidationReport> {
        self.attribute_reports()
            .find(|r| r.attribute.harmonized_name == harmonized_name)
    }
}

/// Outcome of resolving a free-text term against the ontology search service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermValidationReport {
    /// Canonical identifier (IRI) of the best match; empty when unmatched.
    pub match_value: String,
    /// Preferred label of the best match; empty when unmatched.
    pub match_label: String,
    pub is_from_ontology: bool,
    pub is_owl_class: bool,
    pub iri_resolves: bool,
}

impl TermValidationReport {
    /// Report for a lookup that produced no candidate.
    pub fn unresolved() -> Self {
        Self::default()
    }

    pub fn is_resolvable_ontology_class(&self) -> bool {
        self.is_from_ontology && self.is_owl_class && self.iri_resolves
    }

    pub fn match_value(&self) -> MatchValue {
        MatchValue::from_non_empty(&self.match_value)
    }
}
