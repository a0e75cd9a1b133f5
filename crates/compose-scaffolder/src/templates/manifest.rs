//! Template bundle manifest (`template.yaml` at the bundle root)

use serde::{Deserialize, Serialize};

/// Name of the manifest file at the root of every bundle
pub const MANIFEST_FILE: &str = "template.yaml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleManifest {
    /// Display name of the bundle
    pub name: String,

    /// Description of what the bundle provides
    pub description: String,

    /// Semver version for CLI compatibility checking
    pub version: String,

    /// Template folders shipped in this bundle (e.g. ACS versions)
    #[serde(default)]
    pub variants: Vec<String>,
}

impl BundleManifest {
    /// Whether `variant` has a template folder in this bundle.
    /// An empty list means the bundle does not declare its variants.
    pub fn supports(&self, variant: &str) -> bool {
        self.variants.is_empty() || self.variants.iter().any(|v| v == variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest() {
        let yaml = r#"
name: Alfresco Docker Compose
description: Repository and Search Services deployments
version: 0.1.0
variants:
  - "6.1"
  - "6.2"
"#;
        let manifest: BundleManifest = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(manifest.version, "0.1.0");
        assert!(manifest.supports("6.2"));
        assert!(!manifest.supports("5.2"));
    }

    #[test]
    fn test_missing_variants_supports_anything() {
        let yaml = "name: n\ndescription: d\nversion: 0.1.0\n";
        let manifest: BundleManifest = serde_yaml::from_str(yaml).unwrap();
        assert!(manifest.variants.is_empty());
        assert!(manifest.supports("7.0"));
    }
}
