//! Template bundle fetching and rendering
//!
//! This module provides:
//! - The bundle manifest (`template.yaml`)
//! - Bundle fetching from remote URLs or local directories
//! - Rendering/copying of artifact directives into the project directory
//! - Version and variant compatibility checks

pub mod fetcher;
pub mod manifest;
pub mod renderer;
pub mod version;

use crate::product::ProductConfig;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

pub use fetcher::{TemplateBundle, TemplateFetcher, TemplateSource, BUNDLE_ZIP};
pub use manifest::BundleManifest;
pub use renderer::{substitute, write_artifacts};
pub use version::{check_compatibility, check_variant};

/// Pack the local template directory into `templates.zip` (for publishing)
pub fn build_zip<C: ProductConfig>(config: &C, template_dir: &Option<PathBuf>) -> Result<PathBuf> {
    let dir = template_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("templates"));

    if !dir.exists() {
        anyhow::bail!("Template directory not found: {}", dir.display());
    }

    println!(
        "{}",
        format!("Building {} template bundle...", config.display_name())
            .cyan()
            .bold()
    );
    println!();

    print!("  {} {}...", "->".blue(), dir.display());

    let zip_bytes = match TemplateFetcher::build_local_zip(&dir) {
        Ok(bytes) => bytes,
        Err(e) => {
            println!(" {}", "failed".red());
            return Err(e);
        }
    };

    let zip_path = dir.join(BUNDLE_ZIP);
    std::fs::write(&zip_path, &zip_bytes)
        .with_context(|| format!("Failed to write {}", zip_path.display()))?;
    println!(" {} ({} bytes)", "done".green(), zip_bytes.len());

    println!();
    println!("{} {}", "Built".green().bold(), zip_path.display());

    Ok(zip_path)
}
