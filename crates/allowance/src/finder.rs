//! Message finders inspect a model after an assignment and report the
//! validation messages for one attribute.
//!
//! A finder validates the model once, when it is created, and owns
//! everything it saw from then on. The matcher keeps the last finder around
//! so failure text can be rendered after the scan without touching the
//! model again.

use crate::error::ModelError;
use crate::model::{Model, BASE};
use crate::value::Value;
use std::fmt;
use tracing::trace;

pub trait MessageFinder: fmt::Debug {
    fn has_messages(&self) -> bool;

    fn messages(&self) -> &[String];

    /// Where the messages come from, e.g. `errors`.
    fn source_description(&self) -> &'static str;

    /// The observed error state, e.g. `no errors`.
    fn messages_description(&self) -> String;

    /// Turn a rendered default message into the form this finder reports.
    fn expected_message_from(&self, attribute_message: &str) -> String;
}

/// Selects which [`MessageFinder`] the matcher builds for each candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FinderStrategy {
    /// Read the model's error collection.
    #[default]
    Validation,
    /// Expect strict validation to fail with an error.
    Exception,
}

impl FinderStrategy {
    pub fn find(
        self,
        instance: &mut dyn Model,
        attribute: &str,
        context: Option<&str>,
    ) -> Result<Box<dyn MessageFinder>, ModelError> {
        let finder: Box<dyn MessageFinder> = match self {
            FinderStrategy::Validation => {
                Box::new(ValidationMessageFinder::find(instance, attribute, context)?)
            }
            FinderStrategy::Exception => {
                Box::new(ExceptionMessageFinder::find(instance, attribute, context)?)
            }
        };
        Ok(finder)
    }

    pub fn source_description(self) -> &'static str {
        match self {
            FinderStrategy::Validation => ValidationMessageFinder::SOURCE,
            FinderStrategy::Exception => ExceptionMessageFinder::SOURCE,
        }
    }

    pub fn allow_description(self, attribute: &str, allowed_values: &str) -> String {
        match self {
            FinderStrategy::Validation => {
                format!("allow {} to be set to {}", attribute, allowed_values)
            }
            FinderStrategy::Exception => {
                format!("doesn't raise when {} is set to {}", attribute, allowed_values)
            }
        }
    }

    /// Error state to report when no candidate has been evaluated yet.
    pub fn empty_description(self) -> &'static str {
        match self {
            FinderStrategy::Validation => "no errors",
            FinderStrategy::Exception => "no exception",
        }
    }

    /// Same as [`MessageFinder::expected_message_from`], for use before a
    /// finder exists.
    pub fn expected_message_from(
        self,
        instance: &dyn Model,
        attribute: &str,
        attribute_message: &str,
    ) -> String {
        self.qualify(|| instance.human_attribute_name(attribute), attribute_message)
    }

    /// Strict failures carry full messages, so the exception variant prefixes
    /// the humanized attribute name. `human_attribute_name` is only called
    /// for that variant.
    fn qualify(
        self,
        human_attribute_name: impl FnOnce() -> String,
        attribute_message: &str,
    ) -> String {
        match self {
            FinderStrategy::Validation => attribute_message.to_string(),
            FinderStrategy::Exception => {
                format!("{} {}", human_attribute_name(), attribute_message)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ErrorEntry {
    attribute: String,
    message: String,
    value: Option<Value>,
}

impl fmt::Display for ErrorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.attribute, self.message)?;
        if let Some(value) = &self.value {
            write!(f, " ({})", value.inspect())?;
        }
        Ok(())
    }
}

/// Finds messages in the model's error collection.
#[derive(Debug, Clone)]
pub struct ValidationMessageFinder {
    messages: Vec<String>,
    all_errors: Vec<ErrorEntry>,
}

impl ValidationMessageFinder {
    const SOURCE: &'static str = "errors";

    pub fn find(
        instance: &mut dyn Model,
        attribute: &str,
        context: Option<&str>,
    ) -> Result<Self, ModelError> {
        let valid = instance.validate(context)?;
        let errors = instance.errors();
        trace!(attribute, valid, error_count = errors.len(), "validated instance");

        let messages = errors
            .get(attribute)
            .into_iter()
            .map(str::to_string)
            .collect();
        let all_errors = errors
            .iter()
            .map(|(attr, message)| ErrorEntry {
                attribute: attr.to_string(),
                message: message.to_string(),
                value: if attr == BASE {
                    None
                } else {
                    Some(instance.attribute(attr).unwrap_or(Value::Null))
                },
            })
            .collect();

        Ok(Self {
            messages,
            all_errors,
        })
    }
}

impl MessageFinder for ValidationMessageFinder {
    fn has_messages(&self) -> bool {
        !self.messages.is_empty()
    }

    fn messages(&self) -> &[String] {
        &self.messages
    }

    fn source_description(&self) -> &'static str {
        Self::SOURCE
    }

    fn messages_description(&self) -> String {
        if self.all_errors.is_empty() {
            "no errors".to_string()
        } else {
            let rendered: Vec<String> = self.all_errors.iter().map(ToString::to_string).collect();
            format!("errors: {:?}", rendered)
        }
    }

    fn expected_message_from(&self, attribute_message: &str) -> String {
        FinderStrategy::Validation.qualify(String::new, attribute_message)
    }
}

/// Finds the message of a strict validation failure.
#[derive(Debug, Clone)]
pub struct ExceptionMessageFinder {
    human_attribute_name: String,
    messages: Vec<String>,
}

impl ExceptionMessageFinder {
    const SOURCE: &'static str = "an exception";

    /// Only [`ModelError::StrictValidationFailed`] is captured; any other
    /// error is returned to the caller.
    pub fn find(
        instance: &mut dyn Model,
        attribute: &str,
        context: Option<&str>,
    ) -> Result<Self, ModelError> {
        let messages = match instance.validate(context) {
            Ok(_) => Vec::new(),
            Err(ModelError::StrictValidationFailed { message }) => vec![message],
            Err(other) => return Err(other),
        };
        trace!(attribute, raised = !messages.is_empty(), "validated instance strictly");

        Ok(Self {
            human_attribute_name: instance.human_attribute_name(attribute),
            messages,
        })
    }
}

impl MessageFinder for ExceptionMessageFinder {
    fn has_messages(&self) -> bool {
        !self.messages.is_empty()
    }

    fn messages(&self) -> &[String] {
        &self.messages
    }

    fn source_description(&self) -> &'static str {
        Self::SOURCE
    }

    fn messages_description(&self) -> String {
        if self.has_messages() {
            format!("exception: {}", self.messages.join("; "))
        } else {
            "no exception".to_string()
        }
    }

    fn expected_message_from(&self, attribute_message: &str) -> String {
        FinderStrategy::Exception.qualify(|| self.human_attribute_name.clone(), attribute_message)
    }
}
