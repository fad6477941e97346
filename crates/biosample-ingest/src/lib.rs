//! Extraction of BioSample records from `BioSampleSet` XML documents.

pub mod error;
pub mod xml;

pub use error::{IngestError, Result};
pub use xml::{parse_biosample_file, parse_biosample_set};
