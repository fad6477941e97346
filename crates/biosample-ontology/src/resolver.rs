//! Term resolution against an ontology search service.

use std::sync::Arc;

use biosample_model::TermValidationReport;
use tracing::{debug, warn};

use crate::search::{OntologySearch, SearchCandidate, SearchRequest};

/// Resource type of an OWL class.
pub const OWL_CLASS_URI: &str = "http://www.w3.org/2002/07/owl#Class";

/// Ontology category of hits that come from an ontology proper.
pub const ONTOLOGY_CATEGORY: &str = "ontology";

/// Prepare a free-text term for the search service.
///
/// Spaces become `+`, and `%` and `.` are removed.
pub fn build_query(term: &str) -> String {
    term.chars()
        .filter(|c| !matches!(c, '%' | '.'))
        .map(|c| if c == ' ' { '+' } else { c })
        .collect()
}

/// Resolves terms through an injected [`OntologySearch`].
///
/// No caching and no retries: every call issues at most one search.
#[derive(Clone)]
pub struct TermResolver {
    search: Arc<dyn OntologySearch>,
}

impl std::fmt::Debug for TermResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TermResolver").finish_non_exhaustive()
    }
}

impl TermResolver {
    pub fn new(search: impl OntologySearch + 'static) -> Self {
        Self {
            search: Arc::new(search),
        }
    }

    pub fn from_shared(search: Arc<dyn OntologySearch>) -> Self {
        Self { search }
    }

    /// Resolve `term`, optionally restricted to the given ontology acronyms.
    ///
    /// A blank query short-circuits without calling the search service. A
    /// search failure is logged and yields an unresolved report.
    pub fn resolve(&self, term: &str, exact_match: bool, ontologies: &[String]) -> TermValidationReport {
        let query = build_query(term);
        if query.trim().is_empty() {
            return TermValidationReport::unresolved();
        }
        let request = SearchRequest::new(query, exact_match, ontologies);
        match self.search.search(&request) {
            Ok(candidates) => match candidates.into_iter().next() {
                Some(candidate) => report_for(candidate),
                None => {
                    debug!(exact_match, "no ontology candidates");
                    TermValidationReport::unresolved()
                }
            },
            Err(error) => {
                warn!(%error, "ontology lookup failed, treating term as unresolved");
                TermValidationReport::unresolved()
            }
        }
    }
}

fn report_for(candidate: SearchCandidate) -> TermValidationReport {
    TermValidationReport {
        is_owl_class: candidate.type_uri == OWL_CLASS_URI,
        is_from_ontology: candidate
            .ontology_category
            .eq_ignore_ascii_case(ONTOLOGY_CATEGORY),
        match_value: candidate.canonical_id,
        match_label: candidate.preferred_label,
        // any returned candidate counts as resolving
        iri_resolves: true,
    }
}
