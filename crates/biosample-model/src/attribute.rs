//! Attribute values and the harmonized attribute schema.
//!
//! An [`Attribute`] is a single named value submitted with a BioSample record.
//! An [`AttributeSchema`] declares what a harmonized attribute name is expected
//! to contain, via its [`AttributeType`] and an ordered list of allowed values
//! whose meaning depends on the type:
//!
//! - `ONTOLOGY_TERM`: ontology acronyms to restrict term lookups to (e.g. `ENVO`)
//! - `VALUE_SET`: the permissible literal values, in canonical casing
//! - `TERM`: sentinel markers selecting a specialised rule (e.g. `geo_loc_name`)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// A single attribute of a BioSample record.
///
/// Identity within a record is the harmonized name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    /// Canonical attribute key shared across records (e.g. `geo_loc_name`).
    pub harmonized_name: String,
    /// Name used by the submitter (e.g. `geographic location`).
    pub submitted_name: String,
    /// Human-readable display name.
    pub display_name: String,
    /// Submitted value, as text.
    pub value: String,
}

impl Attribute {
    pub fn new(
        harmonized_name: impl Into<String>,
        submitted_name: impl Into<String>,
        display_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            harmonized_name: harmonized_name.into(),
            submitted_name: submitted_name.into(),
            display_name: display_name.into(),
            value: value.into(),
        }
    }

    /// Placeholder for a schema-declared attribute that the record does not carry.
    ///
    /// All three names are set to the schema name and the value is empty.
    pub fn missing(name: &str) -> Self {
        Self::new(name, name, name, "")
    }

    /// True when the value contains something other than whitespace.
    pub fn is_filled_in(&self) -> bool {
        !self.value.trim().is_empty()
    }
}

/// The kind of content an attribute is expected to hold.
///
/// Declaration order is the order in which the validation engine emits groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttributeType {
    Integer,
    OntologyTerm,
    Term,
    Boolean,
    ValueSet,
    Timestamp,
    Other,
}

impl AttributeType {
    /// All variants in declaration order.
    pub const ALL: [AttributeType; 7] = [
        AttributeType::Integer,
        AttributeType::OntologyTerm,
        AttributeType::Term,
        AttributeType::Boolean,
        AttributeType::ValueSet,
        AttributeType::Timestamp,
        AttributeType::Other,
    ];

    /// Canonical type token as it appears in the schema definition file.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::Integer => "INTEGER",
            AttributeType::OntologyTerm => "ONTOLOGY_TERM",
            AttributeType::Term => "TERM",
            AttributeType::Boolean => "BOOLEAN",
            AttributeType::ValueSet => "VALUE_SET",
            AttributeType::Timestamp => "TIMESTAMP",
            AttributeType::Other => "OTHER",
        }
    }

    /// Name of the report group holding attributes of this type.
    pub fn group_name(&self) -> String {
        self.as_str().to_lowercase()
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AttributeType {
    type Err = ModelError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_uppercase();
        AttributeType::ALL
            .into_iter()
            .find(|t| t.as_str() == token)
            .ok_or_else(|| ModelError::UnknownAttributeType(s.trim().to_string()))
    }
}

/// Declaration of a harmonized attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSchema {
    pub name: String,
    pub attribute_type: AttributeType,
    pub allowed_values: Vec<String>,
}

impl AttributeSchema {
    pub fn new(
        name: impl Into<String>,
        attribute_type: AttributeType,
        allowed_values: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            attribute_type,
            allowed_values,
        }
    }

    /// Check whether a sentinel marker is declared (case-insensitive).
    pub fn has_marker(&self, marker: &str) -> bool {
        self.allowed_values
            .iter()
            .any(|value| value.trim().eq_ignore_ascii_case(marker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_type_tokens_case_insensitively() {
        assert_eq!(
            "ontology_term".parse::<AttributeType>().unwrap(),
            AttributeType::OntologyTerm
        );
        assert_eq!(
            " Value_Set ".parse::<AttributeType>().unwrap(),
            AttributeType::ValueSet
        );
        assert!("decimal".parse::<AttributeType>().is_err());
    }

    #[test]
    fn group_names_are_lowercase_tokens() {
        assert_eq!(AttributeType::OntologyTerm.group_name(), "ontology_term");
        assert_eq!(AttributeType::Boolean.group_name(), "boolean");
    }

    #[test]
    fn missing_attribute_is_not_filled_in() {
        let attr = Attribute::missing("host_sex");
        assert_eq!(attr.harmonized_name, "host_sex");
        assert_eq!(attr.display_name, "host_sex");
        assert!(!attr.is_filled_in());
        assert!(!Attribute::new("a", "a", "a", "   ").is_filled_in());
    }
}
