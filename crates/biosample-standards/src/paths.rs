//! Standards directory path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the standards directory.
pub const STANDARDS_ENV_VAR: &str = "BIOSAMPLE_STANDARDS_DIR";

/// File name of the harmonized attribute definitions.
pub const ATTRIBUTES_FILE: &str = "attributes.csv";

/// File name of the country and ocean vocabulary.
pub const COUNTRY_LIST_FILE: &str = "country-list.txt";

/// Get the standards root directory.
///
/// Resolution order:
/// 1. `BIOSAMPLE_STANDARDS_DIR` environment variable
/// 2. `standards/` directory relative to workspace root
pub fn standards_root() -> PathBuf {
    if let Ok(root) = std::env::var(STANDARDS_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../standards")
}

pub fn attributes_path() -> PathBuf {
    standards_root().join(ATTRIBUTES_FILE)
}

pub fn country_list_path() -> PathBuf {
    standards_root().join(COUNTRY_LIST_FILE)
}
