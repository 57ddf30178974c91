//! Product configuration trait for CLI binaries
//!
//! The library does not hard-code which starter repository it clones or where
//! users are sent for help. A binary describes its product through this trait.

use crate::config::PackageManager;
use anyhow::{Context, Result};
use url::Url;

/// Configuration trait for a scaffolding CLI product
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Git URL of the starter repository cloned into every new project
    fn default_template_url(&self) -> &'static str;

    /// Environment variable name for overriding the starter repository URL
    fn template_url_env(&self) -> &'static str;

    /// Where users are pointed for support
    fn support_url(&self) -> &'static str;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// Editor launched in the new project when the user asks for it
    fn editor_command(&self) -> &'static str {
        "code"
    }

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, project_name: &str, package_manager: PackageManager) -> Vec<String> {
        vec![
            format!("cd {} && {}", project_name, package_manager.dev_command()),
            "Check package.json for all available scripts".to_string(),
        ]
    }
}

/// Resolve the starter repository URL, honouring the override variable
pub fn template_url<C: ProductConfig>(config: &C) -> Result<Url> {
    let url_str = std::env::var(config.template_url_env())
        .unwrap_or_else(|_| config.default_template_url().to_string());
    Url::parse(&url_str).with_context(|| format!("Invalid template URL: {}", url_str))
}
