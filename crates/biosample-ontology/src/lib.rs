//! Ontology search for BioSample term validation.
//!
//! [`OntologySearch`] is the collaborator contract, [`BioPortalClient`] its
//! HTTP implementation and [`TermResolver`] turns search hits into a
//! [`biosample_model::TermValidationReport`].

pub mod bioportal;
pub mod error;
pub mod resolver;
pub mod search;

pub use bioportal::{API_KEY_ENV_VAR, BioPortalClient, DEFAULT_BASE_URL, OntologyClientConfig};
pub use error::{OntologyError, Result};
pub use resolver::{TermResolver, build_query};
pub use search::{OntologySearch, SearchCandidate, SearchRequest};
