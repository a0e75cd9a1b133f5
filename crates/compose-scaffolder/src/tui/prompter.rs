//! Interactive prompter backed by cliclack

use crate::questions::{AnswerValue, PromptError, Prompter, Question, QuestionKind};
use std::io::IsTerminal;

/// Asks each question inline on the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct ClackPrompter;

impl Prompter for ClackPrompter {
    fn ask(&mut self, question: &Question) -> Result<AnswerValue, PromptError> {
        if !std::io::stdin().is_terminal() {
            return Err(PromptError::NotInteractive(question.key.clone()));
        }

        let value = match &question.kind {
            QuestionKind::Text => {
                let default = question.default.to_string();
                let input: String = cliclack::input(&question.message)
                    .placeholder(&default)
                    .default_input(&default)
                    .interact()?;
                AnswerValue::Text(input)
            }
            QuestionKind::SingleChoice(choices) => {
                let mut select = cliclack::select(&question.message);
                for choice in choices {
                    select = select.item(choice.clone(), choice, "");
                }
                if let Some(default) = question.default.as_text() {
                    select = select.initial_value(default.to_string());
                }
                AnswerValue::Text(select.interact()?)
            }
            QuestionKind::Boolean => {
                let confirmed = cliclack::confirm(&question.message)
                    .initial_value(question.default.as_bool().unwrap_or(false))
                    .interact()?;
                AnswerValue::Bool(confirmed)
            }
        };

        Ok(value)
    }
}
