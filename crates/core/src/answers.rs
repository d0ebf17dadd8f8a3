//! Typed answers and the per-session answer accumulator.

use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use serde::Serialize;

/// The value a question resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    List(Vec<String>),
    Flag(bool),
}

impl Answer {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(flag) => Some(*flag),
            _ => None,
        }
    }
}

impl Display for Answer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{text}"),
            Self::List(values) => write!(f, "{}", values.join(", ")),
            Self::Flag(flag) => write!(f, "{flag}"),
        }
    }
}

impl From<String> for Answer {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Answer {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Vec<String>> for Answer {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<bool> for Answer {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// Answers collected so far, in the order they were given.
///
/// Entries are only ever appended while a session runs. Closures attached to
/// later questions (defaults, skip rules, dynamic questions) receive a shared
/// reference, so they can read but never rewrite earlier answers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Answers {
    values: IndexMap<String, Answer>,
}

impl Answers {
    pub(crate) fn record(&mut self, key: &str, answer: Answer) {
        debug_assert!(
            !self.values.contains_key(key),
            "answer for `{key}` recorded twice"
        );
        self.values.insert(key.to_string(), answer);
    }

    pub fn get(&self, key: &str) -> Option<&Answer> {
        self.values.get(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Answer::as_text)
    }

    pub fn list(&self, key: &str) -> Option<&[String]> {
        self.get(key).and_then(Answer::as_list)
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Answer::as_flag)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Answer)> {
        self.values.iter().map(|(key, answer)| (key.as_str(), answer))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// Builds a snapshot from key/answer pairs; a repeated key keeps its last
/// answer.
impl<K: Into<String>> FromIterator<(K, Answer)> for Answers {
    fn from_iter<I: IntoIterator<Item = (K, Answer)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, answer)| (key.into(), answer))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Answers {
    type Item = (&'a String, &'a Answer);
    type IntoIter = indexmap::map::Iter<'a, String, Answer>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
