//! Contract for the external ontology search collaborator.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One search request: a prepared query plus restrictions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub exact_match: bool,
    /// Ontology acronyms to search; empty means all ontologies.
    pub ontologies: Vec<String>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, exact_match: bool, ontologies: &[String]) -> Self {
        Self {
            query: query.into(),
            exact_match,
            ontologies: ontologies.to_vec(),
        }
    }

    /// Comma-joined ontology restriction, `None` when unrestricted.
    pub fn ontology_filter(&self) -> Option<String> {
        if self.ontologies.is_empty() {
            None
        } else {
            Some(self.ontologies.join(","))
        }
    }
}

/// A ranked search hit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCandidate {
    /// Resource type URI (e.g. `http://www.w3.org/2002/07/owl#Class`).
    pub type_uri: String,
    /// Category of the source, e.g. `ontology` or `value_set_collection`.
    pub ontology_category: String,
    pub canonical_id: String,
    pub preferred_label: String,
}

/// An ontology search service.
///
/// Implementations carry no per-request mutable state and may be shared
/// across threads.
pub trait OntologySearch: Send + Sync {
    /// Candidates in ranked order. An empty list means no match.
    fn search(&self, request: &SearchRequest) -> Result<Vec<SearchCandidate>>;
}

impl<T: OntologySearch + ?Sized> OntologySearch for &T {
    fn search(&self, request: &SearchRequest) -> Result<Vec<SearchCandidate>> {
        (**self).search(request)
    }
}

impl<T: OntologySearch + ?Sized> OntologySearch for Box<T> {
    fn search(&self, request: &SearchRequest) -> Result<Vec<SearchCandidate>> {
        (**self).search(request)
    }
}

impl<T: OntologySearch + ?Sized> OntologySearch for Arc<T> {
    fn search(&self, request: &SearchRequest) -> Result<Vec<SearchCandidate>> {
        (**self).search(request)
    }
}
