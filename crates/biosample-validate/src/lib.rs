//! BioSample attribute validation.
//!
//! [`AttributeValidator`] checks every attribute declared in the schema
//! registry; [`MetagenomePackageValidator`] checks one NCBI package. Both
//! implement [`RecordValidator`].

pub mod engine;
pub mod error;
pub mod package;
pub mod rules;
pub mod validator;

pub use engine::{AttributeValidator, COORDINATE_MARKER, GEO_LOCATION_MARKER};
pub use error::ValidationError;
pub use package::{METAGENOME_PACKAGE_NAME, MetagenomePackageValidator};
pub use validator::{RecordValidator, is_valid};
