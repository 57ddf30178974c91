//! Raw, unvalidated answers

use super::{OrmDatabase, PackageManager};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Answers gathered from an answers file, CLI flags or the prompter.
///
/// Every field is optional so callers can tell which questions are still
/// unanswered. Convert into a [`super::Configuration`] with `try_from`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Answers {
    pub project_name: Option<String>,
    pub package_manager: Option<PackageManager>,
    pub use_container: Option<bool>,
    pub use_document_database: Option<bool>,
    pub use_orm: Option<bool>,
    pub orm_database: Option<OrmDatabase>,
    /// Entries may themselves be space-delimited
    pub extra_libraries: Option<Vec<String>>,
    /// Entries may themselves be space-delimited
    pub cors_origins: Option<Vec<String>>,
    pub open_editor_afterward: Option<bool>,
}

impl Answers {
    /// Load answers from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse answers file {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Fill every unanswered question from `fallback`
    pub fn or(self, fallback: Answers) -> Answers {
        Answers {
            project_name: self.project_name.or(fallback.project_name),
            package_manager: self.package_manager.or(fallback.package_manager),
            use_container: self.use_container.or(fallback.use_container),
            use_document_database: self.use_document_database.or(fallback.use_document_database),
            use_orm: self.use_orm.or(fallback.use_orm),
            orm_database: self.orm_database.or(fallback.orm_database),
            extra_libraries: self.extra_libraries.or(fallback.extra_libraries),
            cors_origins: self.cors_origins.or(fallback.cors_origins),
            open_editor_afterward: self.open_editor_afterward.or(fallback.open_editor_afterward),
        }
    }
}

/// Split a space-delimited answer into its entries
#[cfg_attr(not(feature = "tui"), allow(dead_code))]
pub(crate) fn split_words(input: &str) -> Vec<String> {
    input.split_whitespace().map(str::to_string).collect()
}
