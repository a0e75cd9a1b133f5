//! Compose Scaffolder - question resolution and artifact selection for deployment scaffolding
//!
//! This library asks (or accepts as overrides) a sequence of interdependent configuration
//! questions and turns the resolved answers into a list of template render/copy directives.
//! Product binaries (e.g. `alfresco-compose`) plug in their own questions and catalog.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core** - `questions` (model + resolver) and `artifacts` (directives + catalog),
//!   pure and free of I/O apart from the `Prompter` seam
//! - **Layer 2: Collaborators** - template bundle fetching/rendering, container runtime detection
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompter and create flow
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use compose_scaffolder::questions::{resolve, DefaultPrompter, Overrides, QuestionSet};
//!
//! let questions = QuestionSet::new(config.questions())?;
//! let overrides: Overrides = [("httpMode", "https")].into_iter().collect();
//! let answers = resolve(&questions, &overrides, &mut DefaultPrompter)?;
//! let directives = config.catalog().select(&answers);
//! ```

pub mod artifacts;
pub mod product;
pub mod questions;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use artifacts::{ArtifactCatalog, ArtifactDirective, Mode, Substitutions};
pub use product::ProductConfig;
pub use questions::{
    resolve, AnswerValue, Answers, DefaultPrompter, Overrides, PromptError, Prompter, Question,
    QuestionKind, QuestionSet, ResolveError, When,
};
pub use runtime::RuntimeInfo;
pub use templates::{write_artifacts, TemplateBundle, TemplateFetcher, TemplateSource};

#[cfg(feature = "tui")]
pub use tui::run;
