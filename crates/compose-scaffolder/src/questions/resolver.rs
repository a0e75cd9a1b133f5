//! Sequential answer resolution
//!
//! Questions are visited in declaration order. Each one is either skipped (its
//! condition is false), answered from an override, or asked through a [`Prompter`].
//! The next question is only considered once the current answer is recorded,
//! since later conditions read earlier answers.

use super::answers::{AnswerValue, Answers, Overrides};
use super::question::{Question, QuestionSet};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("no interactive terminal available to ask '{0}' (pass it as a flag or use --yes)")]
    NotInteractive(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("could not get an answer for '{key}'")]
    Prompt {
        key: String,
        #[source]
        source: PromptError,
    },
}

/// Source of answers for questions that were not overridden
pub trait Prompter {
    fn ask(&mut self, question: &Question) -> Result<AnswerValue, PromptError>;
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn ask(&mut self, question: &Question) -> Result<AnswerValue, PromptError> {
        (**self).ask(question)
    }
}

/// Answers every question with its declared default (non-interactive mode)
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPrompter;

impl Prompter for DefaultPrompter {
    fn ask(&mut self, question: &Question) -> Result<AnswerValue, PromptError> {
        Ok(question.default.clone())
    }
}

/// Resolve every applicable question, preferring overrides over the prompter.
///
/// Overrides for questions that turn out not to be applicable are ignored.
/// Override values are normalized but not validated against the question's choices.
pub fn resolve<P: Prompter + ?Sized>(
    questions: &QuestionSet,
    overrides: &Overrides,
    prompter: &mut P,
) -> Result<Answers, ResolveError> {
    let mut answers = Answers::new();

    for question in questions {
        if !question.is_applicable(&answers) {
            if overrides.get(&question.key).is_some() {
                tracing::debug!(key = %question.key, "ignoring override for inapplicable question");
            } else {
                tracing::debug!(key = %question.key, "skipping inapplicable question");
            }
            continue;
        }

        let value = match overrides.get(&question.key) {
            Some(raw) => {
                let value = raw.clone().normalize(&question.kind);
                tracing::debug!(key = %question.key, value = %value, "answered from override");
                value
            }
            None => {
                let value = prompter.ask(question).map_err(|source| ResolveError::Prompt {
                    key: question.key.clone(),
                    source,
                })?;
                tracing::debug!(key = %question.key, value = %value, "answered by prompter");
                value
            }
        };

        answers.record(&question.key, value);
    }

    Ok(answers)
}
