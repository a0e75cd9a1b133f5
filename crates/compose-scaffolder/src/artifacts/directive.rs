//! Artifact directives handed to the template renderer

use indexmap::IndexMap;
use serde::Serialize;
use std::path::PathBuf;

/// How a template resource becomes an output file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    /// Replace `${key}` placeholders with the directive's substitutions
    Render,
    /// Copy the resource byte for byte
    RawCopy,
}

/// Placeholder values for a rendered template, in insertion order.
///
/// Booleans are turned into the literal text `true`/`false` here and nowhere else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Substitutions(IndexMap<String, String>);

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn with_flag(self, key: &str, value: bool) -> Self {
        self.with(key, if value { "true" } else { "false" })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One render-or-copy instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactDirective {
    /// Path of the resource inside the template bundle (file or directory)
    pub template_id: String,

    /// Output path, relative to the project directory
    pub destination: PathBuf,

    #[serde(skip_serializing_if = "Substitutions::is_empty")]
    pub substitutions: Substitutions,

    pub mode: Mode,
}

impl ArtifactDirective {
    pub fn render(
        template_id: impl Into<String>,
        destination: impl Into<PathBuf>,
        substitutions: Substitutions,
    ) -> Self {
        Self {
            template_id: template_id.into(),
            destination: destination.into(),
            substitutions,
            mode: Mode::Render,
        }
    }

    pub fn raw_copy(template_id: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        Self {
            template_id: template_id.into(),
            destination: destination.into(),
            substitutions: Substitutions::new(),
            mode: Mode::RawCopy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_become_literal_text() {
        let subs = Substitutions::new()
            .with_flag("sharding", true)
            .with_flag("zeppelin", false);
        assert_eq!(subs.get("sharding"), Some("true"));
        assert_eq!(subs.get("zeppelin"), Some("false"));
    }

    #[test]
    fn test_substitutions_keep_insertion_order() {
        let subs = Substitutions::new().with("b", "2").with("a", "1").with("b", "3");
        let pairs: Vec<_> = subs.iter().collect();
        assert_eq!(pairs, vec![("b", "3"), ("a", "1")]);
    }

    #[test]
    fn test_raw_copy_has_no_substitutions() {
        let directive = ArtifactDirective::raw_copy("6.1/.env", ".env");
        assert_eq!(directive.mode, Mode::RawCopy);
        assert!(directive.substitutions.is_empty());
    }
}
