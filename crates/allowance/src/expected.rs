use crate::value::Value;
use regex::Regex;
use std::collections::HashMap;

/// What a disallowed value's validation message should look like.
#[derive(Debug, Clone)]
pub enum ExpectedMessage {
    /// Must appear verbatim among the attribute's messages.
    Text(String),
    /// Must match at least one of the attribute's messages.
    Pattern(Regex),
    /// A default message key such as `too_short`, resolved through the
    /// matcher's [`MessageCatalog`](crate::MessageCatalog).
    Key(String),
}

impl ExpectedMessage {
    pub fn key(key: impl Into<String>) -> Self {
        ExpectedMessage::Key(key.into())
    }

    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(ExpectedMessage::Pattern(Regex::new(pattern)?))
    }
}

impl From<&str> for ExpectedMessage {
    fn from(text: &str) -> Self {
        ExpectedMessage::Text(text.to_string())
    }
}

impl From<String> for ExpectedMessage {
    fn from(text: String) -> Self {
        ExpectedMessage::Text(text)
    }
}

impl From<Regex> for ExpectedMessage {
    fn from(pattern: Regex) -> Self {
        ExpectedMessage::Pattern(pattern)
    }
}

/// Options for
/// [`AllowValueMatcher::with_message_opts`](crate::AllowValueMatcher::with_message_opts).
#[derive(Debug, Clone, Default)]
pub struct MessageOptions {
    pub values: HashMap<String, Value>,
    pub against: Option<String>,
}

impl MessageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpolation value for a default message key, e.g. `count`.
    pub fn value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Check messages on `attribute` instead of the attribute being set.
    pub fn against(mut self, attribute: impl Into<String>) -> Self {
        self.against = Some(attribute.into());
        self
    }
}

/// An expected message with any default key already rendered.
#[derive(Debug, Clone)]
pub(crate) enum ResolvedMessage {
    Text(String),
    Pattern(Regex),
}

impl ResolvedMessage {
    /// The first message satisfying the expectation.
    pub(crate) fn find_in(&self, messages: &[String]) -> Option<String> {
        match self {
            ResolvedMessage::Pattern(regex) => {
                messages.iter().find(|m| regex.is_match(m)).cloned()
            }
            ResolvedMessage::Text(text) => messages.iter().find(|m| *m == text).cloned(),
        }
    }

    pub(crate) fn inspect(&self) -> String {
        match self {
            ResolvedMessage::Text(text) => format!("{:?}", text),
            ResolvedMessage::Pattern(regex) => format!("/{}/", regex.as_str()),
        }
    }
}
