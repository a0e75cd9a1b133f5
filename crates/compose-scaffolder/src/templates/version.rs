//! Compatibility checks between the CLI and a template bundle

use super::manifest::BundleManifest;
use anyhow::Result;
use semver::Version;

/// Parse a version string, tolerating a leading `v`
pub fn parse_version(version_str: &str) -> Result<Version> {
    let cleaned = version_str.strip_prefix('v').unwrap_or(version_str);
    Version::parse(cleaned).map_err(|e| anyhow::anyhow!("Invalid version '{}': {}", version_str, e))
}

/// Returns a warning if the bundle expects a newer CLI than the one running.
/// Unparseable versions produce no warning.
pub fn check_compatibility(
    cli_version: &str,
    bundle_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    let cli_ver = parse_version(cli_version).ok()?;
    let bundle_ver = parse_version(bundle_version).ok()?;

    if cli_ver < bundle_ver {
        Some(format!(
            "Templates were built for CLI version {} or newer, you are running {}. \
             Consider updating: {}",
            bundle_version, cli_version, upgrade_command
        ))
    } else {
        None
    }
}

/// Returns a warning if the bundle has no template folder for the chosen variant
pub fn check_variant(manifest: &BundleManifest, variant: &str) -> Option<String> {
    if manifest.supports(variant) {
        None
    } else {
        Some(format!(
            "Templates for '{}' are not part of this bundle (available: {})",
            variant,
            manifest.variants.join(", ")
        ))
    }
}
