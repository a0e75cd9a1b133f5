//! Question model and answer resolution
//!
//! This module provides:
//! - Question descriptors with applicability conditions (`Question`, `When`)
//! - The ordered, validated `QuestionSet`
//! - Answer values, resolved answers and overrides
//! - The sequential resolver and the `Prompter` seam

pub mod answers;
pub mod question;
pub mod resolver;

pub use answers::{AnswerValue, Answers, Overrides};
pub use question::{Question, QuestionKind, QuestionSet, QuestionSetError, When};
pub use resolver::{resolve, DefaultPrompter, PromptError, Prompter, ResolveError};
