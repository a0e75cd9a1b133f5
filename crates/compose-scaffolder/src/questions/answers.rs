//! Answer values, the resolved answer map and pre-supplied overrides

use super::question::QuestionKind;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// A single answer: free text (including a single-choice selection) or a yes/no flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Bool(bool),
    Text(String),
}

impl AnswerValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnswerValue::Bool(b) => Some(*b),
            AnswerValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            AnswerValue::Bool(_) => None,
        }
    }

    /// Coerce a raw override into the value recorded for a question of `kind`.
    ///
    /// Only boolean questions are touched, and only for the literal strings
    /// `true`/`false` (any case). Anything else, `"yes"` included, is kept as text.
    pub fn normalize(self, kind: &QuestionKind) -> AnswerValue {
        match (kind, self) {
            (QuestionKind::Boolean, AnswerValue::Text(raw)) => {
                let lc = raw.to_lowercase();
                match lc.as_str() {
                    "true" => AnswerValue::Bool(true),
                    "false" => AnswerValue::Bool(false),
                    _ => AnswerValue::Text(raw),
                }
            }
            (_, value) => value,
        }
    }
}

impl From<bool> for AnswerValue {
    fn from(value: bool) -> Self {
        AnswerValue::Bool(value)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Text(value)
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Bool(b) => write!(f, "{}", b),
            AnswerValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Answers collected so far, in the order their questions were resolved.
///
/// A key is written at most once. A missing key means the question was not
/// applicable, which is different from an applicable question answered `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Answers {
    values: IndexMap<String, AnswerValue>,
}

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer. Returns false (and keeps the old value) if the key was already set.
    pub(crate) fn record(&mut self, key: &str, value: AnswerValue) -> bool {
        if self.values.contains_key(key) {
            return false;
        }
        self.values.insert(key.to_string(), value);
        true
    }

    pub fn get(&self, key: &str) -> Option<&AnswerValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Text value of `key`, if present and textual
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(AnswerValue::as_text)
    }

    /// Boolean value of `key`; absent or non-boolean answers read as false
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).and_then(AnswerValue::as_bool).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<AnswerValue>> FromIterator<(K, V)> for Answers {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut answers = Answers::new();
        for (key, value) in iter {
            let key = key.into();
            answers.record(&key, value.into());
        }
        answers
    }
}

/// Raw answers supplied before resolution starts (usually command-line flags)
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    values: IndexMap<String, AnswerValue>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an override; a later value for the same key replaces the earlier one
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AnswerValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&AnswerValue> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<AnswerValue>> FromIterator<(K, V)> for Overrides {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut overrides = Overrides::new();
        for (key, value) in iter {
            overrides.insert(key, value);
        }
        overrides
    }
}
