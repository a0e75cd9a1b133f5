//! Product configuration trait for CLI binaries
//!
//! A product supplies the questions to ask, the artifact catalog driven by the
//! answers, and the identity used in banners, template lookup and help text.

use crate::artifacts::ArtifactCatalog;
use crate::questions::{Answers, Question};
use std::path::Path;

/// Configuration trait for scaffolding products
///
/// Each product defines:
/// - Product identity (name, display name)
/// - Template bundle source URL
/// - The question list and the artifact catalog
/// - Documentation links
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Default URL for fetching the template bundle
    fn default_template_url(&self) -> &'static str;

    /// Environment variable name for overriding template URL
    fn template_url_env(&self) -> &'static str;

    /// Questions in the order they are asked
    fn questions(&self) -> Vec<Question>;

    /// Rules turning resolved answers into artifact directives
    fn catalog(&self) -> ArtifactCatalog;

    /// Bundle variant picked by the answers (checked against the bundle's supported list)
    fn template_variant<'a>(&self, answers: &'a Answers) -> Option<&'a str>;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path, compose_command: &str) -> Vec<String>;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}
