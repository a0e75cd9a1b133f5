//! Artifact directives and answer-driven selection
//!
//! This module provides:
//! - `ArtifactDirective` (render or raw copy of one template resource)
//! - `Substitutions`, the placeholder map a rendered directive carries
//! - `ArtifactCatalog`, an ordered list of guarded rules producing directives

pub mod catalog;
pub mod directive;

pub use catalog::{ArtifactCatalog, ArtifactRule};
pub use directive::{ArtifactDirective, Mode, Substitutions};
