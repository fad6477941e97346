//! BioSample record model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;

/// A cross-reference attached to a record (e.g. a BioProject link).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub link_type: String,
    pub target: String,
    pub label: String,
    pub value: String,
}

/// A BioSample record: flat identifying fields plus named attributes.
///
/// Attributes are keyed by harmonized name. Validation only reads records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub accession: String,
    pub access: String,
    pub publication_date: String,
    pub last_update: String,
    pub submission_date: String,
    pub organism_taxonomy_id: String,
    pub organism_taxonomy_name: String,
    pub organism_name: String,
    pub model_name: String,
    pub owner_name: String,
    pub package_display_name: String,
    pub package_name: String,
    pub status: String,
    pub status_date: String,
    pub attributes: BTreeMap<String, Attribute>,
    pub links: Vec<Link>,
}

impl Record {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Look up an attribute by harmonized name.
    pub fn attribute(&self, harmonized_name: &str) -> Option<&Attribute> {
        self.attributes.get(harmonized_name)
    }

    /// Insert an attribute, replacing any previous one with the same harmonized name.
    pub fn insert_attribute(&mut self, attribute: Attribute) {
        self.attributes
            .insert(attribute.harmonized_name.clone(), attribute);
    }

    /// Builder-style helper used when assembling records by hand.
    #[must_use]
    pub fn with_attribute(mut self, harmonized_name: &str, value: &str) -> Self {
        self.insert_attribute(Attribute::new(
            harmonized_name,
            harmonized_name,
            harmonized_name,
            value,
        ));
        self
    }

    #[must_use]
    pub fn with_package(mut self, package_name: &str) -> Self {
        self.package_name = package_name.to_string();
        self
    }
}
