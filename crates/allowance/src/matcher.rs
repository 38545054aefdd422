//! The allow-value matcher.
//!
//! Assigns each candidate value to an attribute in turn and checks whether
//! validation reports the expected message. The match holds only if every
//! value is allowed; it stops at the first value that is not.

use crate::catalog::MessageCatalog;
use crate::error::{Error, Result};
use crate::expected::{ExpectedMessage, MessageOptions, ResolvedMessage};
use crate::finder::{FinderStrategy, MessageFinder};
use crate::model::Model;
use crate::value::Value;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Runs after every assignment, before messages are inspected.
pub type AfterSettingValue = Box<dyn FnMut(&mut dyn Model) -> anyhow::Result<()>>;

/// Common interface for assertion matchers.
pub trait Matcher {
    fn matches(&mut self, instance: &mut dyn Model) -> Result<bool>;

    /// Shown when the matcher was expected to hold but did not.
    fn failure_message(&self) -> String;

    /// Shown when the matcher was expected not to hold but did.
    fn failure_message_when_negated(&self) -> String;

    fn description(&self) -> String;
}

/// Build a matcher for one or more candidate values.
///
/// # Example
///
/// ```
/// use allowance::allow_value;
///
/// let matcher = allow_value(["bad", "worse"]).unwrap().for_attribute("isbn");
/// assert_eq!(
///     matcher.description(),
///     r#"allow isbn to be set to any of ["bad", "worse"]"#
/// );
///
/// assert!(allow_value(Vec::<&str>::new()).is_err());
/// ```
pub fn allow_value<I, V>(values: I) -> Result<AllowValueMatcher>
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    AllowValueMatcher::new(values)
}

pub struct AllowValueMatcher {
    values_to_match: Vec<Value>,
    attribute_to_set: Option<String>,
    attribute_to_check_message_against: Option<String>,
    expected_message: Option<ExpectedMessage>,
    expected_message_values: HashMap<String, Value>,
    context: Option<String>,
    strategy: FinderStrategy,
    catalog: MessageCatalog,
    after_setting_value: AfterSettingValue,

    // Per-call state, reset by `matches`.
    value: Option<Value>,
    matched_error: Option<String>,
    resolved_message: Option<ResolvedMessage>,
    finder: Option<Box<dyn MessageFinder>>,
}

impl fmt::Debug for AllowValueMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllowValueMatcher")
            .field("values_to_match", &self.values_to_match)
            .field("attribute_to_set", &self.attribute_to_set)
            .field(
                "attribute_to_check_message_against",
                &self.attribute_to_check_message_against,
            )
            .field("expected_message", &self.expected_message)
            .field("expected_message_values", &self.expected_message_values)
            .field("context", &self.context)
            .field("strategy", &self.strategy)
            .field("value", &self.value)
            .field("matched_error", &self.matched_error)
            .finish_non_exhaustive()
    }
}

impl AllowValueMatcher {
    pub fn new<I, V>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values_to_match: Vec<Value> = values.into_iter().map(Into::into).collect();
        if values_to_match.is_empty() {
            return Err(Error::NoValues);
        }

        Ok(Self {
            values_to_match,
            attribute_to_set: None,
            attribute_to_check_message_against: None,
            expected_message: None,
            expected_message_values: HashMap::new(),
            context: None,
            strategy: FinderStrategy::default(),
            catalog: MessageCatalog::builtin(),
            after_setting_value: Box::new(|_| Ok(())),
            value: None,
            matched_error: None,
            resolved_message: None,
            finder: None,
        })
    }

    /// Set `attribute` and check messages against it.
    pub fn for_attribute(mut self, attribute: impl Into<String>) -> Self {
        let attribute = attribute.into();
        self.attribute_to_check_message_against = Some(attribute.clone());
        self.attribute_to_set = Some(attribute);
        self
    }

    /// Validation context passed to the model, e.g. `create`.
    pub fn on_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_message(self, message: impl Into<ExpectedMessage>) -> Self {
        self.with_message_opts(message, MessageOptions::default())
    }

    pub fn with_message_opts(
        mut self,
        message: impl Into<ExpectedMessage>,
        options: MessageOptions,
    ) -> Self {
        self.expected_message = Some(message.into());
        self.expected_message_values = options.values;
        if let Some(against) = options.against {
            self.attribute_to_check_message_against = Some(against);
        }
        self
    }

    /// Expect validation to fail with an error instead of collecting messages.
    pub fn strict(mut self) -> Self {
        self.strategy = FinderStrategy::Exception;
        self
    }

    pub fn with_catalog(mut self, catalog: MessageCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Register a hook run after each assignment, e.g. to trigger
    /// validation on models that do not validate on their own.
    pub fn after_setting_value<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut dyn Model) -> anyhow::Result<()> + 'static,
    {
        self.after_setting_value = Box::new(hook);
        self
    }

    /// The error text that made the last evaluated value disallowed.
    pub fn matched_error(&self) -> Option<&str> {
        self.matched_error.as_deref()
    }

    /// The last value assigned by `matches`.
    pub fn current_value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Returns `Ok(true)` when every candidate value is allowed.
    ///
    /// Model errors other than the strict failure a strict matcher expects
    /// are returned as `Err`.
    pub fn matches(&mut self, instance: &mut dyn Model) -> Result<bool> {
        let attribute_to_set = self
            .attribute_to_set
            .clone()
            .ok_or(Error::MissingAttribute)?;
        let attribute_to_check = self
            .attribute_to_check_message_against
            .clone()
            .unwrap_or_else(|| attribute_to_set.clone());

        self.value = None;
        self.matched_error = None;
        self.finder = None;
        self.resolved_message =
            self.resolve_expected_message(&*instance, &attribute_to_set, &attribute_to_check)?;

        for index in 0..self.values_to_match.len() {
            let value = self.values_to_match[index].clone();
            debug!(
                attribute = %attribute_to_set,
                value = %value.inspect(),
                "setting candidate value"
            );
            self.value = Some(value.clone());

            instance.set_attribute(&attribute_to_set, &value)?;
            (self.after_setting_value)(&mut *instance).map_err(Error::Hook)?;

            let finder =
                self.strategy
                    .find(&mut *instance, &attribute_to_check, self.context.as_deref())?;
            let disallowed = self.errors_match(finder.as_ref());
            self.finder = Some(finder);

            if disallowed {
                debug!(
                    attribute = %attribute_to_check,
                    error = self.matched_error.as_deref().unwrap_or_default(),
                    "value not allowed"
                );
                return Ok(false);
            }
        }

        debug!(
            attribute = %attribute_to_set,
            count = self.values_to_match.len(),
            "all values allowed"
        );
        Ok(true)
    }

    pub fn failure_message(&self) -> String {
        format!(
            "Did not expect {}, got error: {}",
            self.expectation(),
            self.matched_error.as_deref().unwrap_or_default()
        )
    }

    pub fn failure_message_when_negated(&self) -> String {
        format!("Expected {}, got {}", self.expectation(), self.error_description())
    }

    pub fn description(&self) -> String {
        self.strategy.allow_description(
            self.attribute_to_set.as_deref().unwrap_or_default(),
            &self.allowed_values(),
        )
    }

    fn errors_match(&mut self, finder: &dyn MessageFinder) -> bool {
        if !finder.has_messages() {
            return false;
        }

        match &self.resolved_message {
            Some(expected) => {
                self.matched_error = expected.find_in(finder.messages());
                self.matched_error.is_some()
            }
            None => {
                self.matched_error = finder.messages().first().cloned();
                true
            }
        }
    }

    fn resolve_expected_message(
        &self,
        instance: &dyn Model,
        attribute_to_set: &str,
        attribute_to_check: &str,
    ) -> Result<Option<ResolvedMessage>> {
        let resolved = match &self.expected_message {
            None => return Ok(None),
            Some(ExpectedMessage::Text(text)) => ResolvedMessage::Text(text.clone()),
            Some(ExpectedMessage::Pattern(regex)) => ResolvedMessage::Pattern(regex.clone()),
            Some(ExpectedMessage::Key(key)) => {
                let model_name = instance.model_name();
                let mut values: HashMap<String, Value> = HashMap::from([
                    ("model_name".to_string(), Value::from(model_name.as_str())),
                    ("instance".to_string(), Value::from(instance.inspect())),
                    ("attribute".to_string(), Value::from(attribute_to_set)),
                ]);
                values.extend(self.expected_message_values.clone());

                let message = self
                    .catalog
                    .render(key, &model_name, attribute_to_set, &values)?;
                ResolvedMessage::Text(self.strategy.expected_message_from(
                    instance,
                    attribute_to_check,
                    &message,
                ))
            }
        };
        Ok(Some(resolved))
    }

    fn expectation(&self) -> String {
        let mut parts = vec![self.error_source().to_string()];
        if let Some(expected) = self.expected_message_inspect() {
            parts.push(format!("to include {}", expected));
        }
        parts.push(format!(
            "when {} is set to {}",
            self.attribute_to_set.as_deref().unwrap_or_default(),
            self.value.as_ref().unwrap_or(&Value::Null).inspect()
        ));
        parts.join(" ")
    }

    fn expected_message_inspect(&self) -> Option<String> {
        if let Some(resolved) = &self.resolved_message {
            return Some(resolved.inspect());
        }
        self.expected_message.as_ref().map(|expected| match expected {
            ExpectedMessage::Text(text) => format!("{:?}", text),
            ExpectedMessage::Pattern(regex) => format!("/{}/", regex.as_str()),
            ExpectedMessage::Key(key) => format!("the default '{}' message", key),
        })
    }

    fn error_source(&self) -> &'static str {
        match &self.finder {
            Some(finder) => finder.source_description(),
            None => self.strategy.source_description(),
        }
    }

    fn error_description(&self) -> String {
        match &self.finder {
            Some(finder) => finder.messages_description(),
            None => self.strategy.empty_description().to_string(),
        }
    }

    fn allowed_values(&self) -> String {
        match self.values_to_match.as_slice() {
            [single] => single.inspect(),
            values => {
                let parts: Vec<String> = values.iter().map(Value::inspect).collect();
                format!("any of [{}]", parts.join(", "))
            }
        }
    }
}

impl Matcher for AllowValueMatcher {
    fn matches(&mut self, instance: &mut dyn Model) -> Result<bool> {
        AllowValueMatcher::matches(self, instance)
    }

    fn failure_message(&self) -> String {
        AllowValueMatcher::failure_message(self)
    }

    fn failure_message_when_negated(&self) -> String {
        AllowValueMatcher::failure_message_when_negated(self)
    }

    fn description(&self) -> String {
        AllowValueMatcher::description(self)
    }
}
