//! Country and ocean vocabulary for geographic location checks.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, StandardsError};
use crate::paths::country_list_path;

/// Preloaded set of main location tokens. Lookups are case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationVocabulary {
    tokens: BTreeSet<String>,
}

impl LocationVocabulary {
    /// Load `country-list.txt` from the standards root.
    pub fn load_default() -> Result<Self> {
        Self::from_path(&country_list_path())
    }

    /// One token per line; lines are trimmed and blank lines ignored.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
        let vocabulary = Self::from_lines(text.lines());
        debug!(
            path = %path.display(),
            tokens = vocabulary.len(),
            "loaded location vocabulary"
        );
        Ok(vocabulary)
    }

    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let tokens = lines
            .into_iter()
            .map(|line| line.trim().trim_start_matches('\u{feff}'))
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { tokens }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
