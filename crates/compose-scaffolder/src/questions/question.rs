//! Question descriptors, applicability conditions and the ordered question set

use super::answers::{AnswerValue, Answers};
use std::collections::HashSet;
use thiserror::Error;

/// What kind of answer a question expects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    /// Free text input
    Text,
    /// Exactly one of the listed choices, in display order
    SingleChoice(Vec<String>),
    /// Yes/no confirmation
    Boolean,
}

/// Applicability condition, evaluated against the answers resolved before the question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum When {
    Always,
    /// The answer for the key is exactly this text
    Equals(String, String),
    /// The answer for the key is the boolean `true`
    IsTrue(String),
    Not(Box<When>),
    All(Vec<When>),
    Any(Vec<When>),
}

impl When {
    pub fn equals(key: &str, value: &str) -> Self {
        When::Equals(key.to_string(), value.to_string())
    }

    pub fn is_true(key: &str) -> Self {
        When::IsTrue(key.to_string())
    }

    pub fn is_false(key: &str) -> Self {
        When::Not(Box::new(When::is_true(key)))
    }

    pub fn negate(self) -> Self {
        When::Not(Box::new(self))
    }

    pub fn all(conditions: impl IntoIterator<Item = When>) -> Self {
        When::All(conditions.into_iter().collect())
    }

    pub fn any(conditions: impl IntoIterator<Item = When>) -> Self {
        When::Any(conditions.into_iter().collect())
    }

    /// Evaluate against the answers so far. Missing keys never match `Equals` or `IsTrue`.
    pub fn evaluate(&self, answers: &Answers) -> bool {
        match self {
            When::Always => true,
            When::Equals(key, value) => answers.text(key) == Some(value.as_str()),
            When::IsTrue(key) => answers.flag(key),
            When::Not(inner) => !inner.evaluate(answers),
            When::All(conditions) => conditions.iter().all(|c| c.evaluate(answers)),
            When::Any(conditions) => conditions.iter().any(|c| c.evaluate(answers)),
        }
    }

    /// Every answer key this condition reads
    pub fn referenced_keys(&self) -> Vec<&str> {
        let mut keys = Vec::new();
        self.collect_keys(&mut keys);
        keys
    }

    fn collect_keys<'a>(&'a self, keys: &mut Vec<&'a str>) {
        match self {
            When::Always => {}
            When::Equals(key, _) | When::IsTrue(key) => keys.push(key),
            When::Not(inner) => inner.collect_keys(keys),
            When::All(conditions) | When::Any(conditions) => {
                for condition in conditions {
                    condition.collect_keys(keys);
                }
            }
        }
    }
}

/// A single question descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Unique key; also the override name
    pub key: String,

    /// Prompt shown to the user
    pub message: String,

    pub kind: QuestionKind,

    /// Value used when the user accepts the default (or runs non-interactively)
    pub default: AnswerValue,

    pub when: When,
}

impl Question {
    pub fn text(key: &str, message: &str, default: &str) -> Self {
        Self {
            key: key.to_string(),
            message: message.to_string(),
            kind: QuestionKind::Text,
            default: AnswerValue::from(default),
            when: When::Always,
        }
    }

    pub fn choice(key: &str, message: &str, choices: &[&str], default: &str) -> Self {
        Self {
            key: key.to_string(),
            message: message.to_string(),
            kind: QuestionKind::SingleChoice(choices.iter().map(|c| c.to_string()).collect()),
            default: AnswerValue::from(default),
            when: When::Always,
        }
    }

    pub fn confirm(key: &str, message: &str, default: bool) -> Self {
        Self {
            key: key.to_string(),
            message: message.to_string(),
            kind: QuestionKind::Boolean,
            default: AnswerValue::Bool(default),
            when: When::Always,
        }
    }

    /// Only ask this question when `condition` holds
    pub fn when(mut self, condition: When) -> Self {
        self.when = condition;
        self
    }

    pub fn choices(&self) -> &[String] {
        match &self.kind {
            QuestionKind::SingleChoice(choices) => choices,
            _ => &[],
        }
    }

    pub fn is_applicable(&self, answers: &Answers) -> bool {
        self.when.evaluate(answers)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuestionSetError {
    #[error("question '{0}' is declared more than once")]
    DuplicateKey(String),

    #[error("question '{question}' depends on '{dependency}', which is not declared before it")]
    ForwardReference { question: String, dependency: String },

    #[error("question '{0}' has a default that does not match its kind")]
    InvalidDefault(String),
}

/// Ordered, validated list of questions
#[derive(Debug, Clone)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Build a question set, checking that keys are unique, that each condition only
    /// reads keys declared earlier, and that defaults fit their question kind.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionSetError> {
        let mut seen: HashSet<&str> = HashSet::new();

        for question in &questions {
            for dependency in question.when.referenced_keys() {
                if !seen.contains(dependency) {
                    return Err(QuestionSetError::ForwardReference {
                        question: question.key.clone(),
                        dependency: dependency.to_string(),
                    });
                }
            }

            let default_fits = match (&question.kind, &question.default) {
                (QuestionKind::Boolean, AnswerValue::Bool(_)) => true,
                (QuestionKind::Text, AnswerValue::Text(_)) => true,
                (QuestionKind::SingleChoice(choices), AnswerValue::Text(value)) => {
                    choices.contains(value)
                }
                _ => false,
            };
            if !default_fits {
                return Err(QuestionSetError::InvalidDefault(question.key.clone()));
            }

            if !seen.insert(&question.key) {
                return Err(QuestionSetError::DuplicateKey(question.key.clone()));
            }
        }

        Ok(Self { questions })
    }

    pub fn get(&self, key: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.key == key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.questions.iter().map(|q| q.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl<'a> IntoIterator for &'a QuestionSet {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
