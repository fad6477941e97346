#![deny(unsafe_code)]

pub mod error;
pub mod paths;
pub mod registry;
pub mod vocabulary;

pub use crate::error::{Result, StandardsError};
pub use crate::paths::{STANDARDS_ENV_VAR, standards_root};
pub use crate::registry::SchemaRegistry;
pub use crate::vocabulary::LocationVocabulary;
