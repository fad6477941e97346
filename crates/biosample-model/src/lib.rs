pub mod attribute;
pub mod error;
pub mod record;
pub mod report;

pub use attribute::{Attribute, AttributeSchema, AttributeType};
pub use error::{ModelError, Result};
pub use record::{Link, Record};
pub use report::{
    AttributeGroupValidationReport, AttributeValidationReport, MatchValue,
    RecordValidationReport, TermValidationReport,
};
