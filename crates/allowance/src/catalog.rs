//! Conventional default validation messages.
//!
//! Lookups go from most to least specific: model and attribute, model,
//! attribute, then the global default for the key.

use crate::error::{Error, Result};
use crate::value::Value;
use allowance_template::Template;
use std::collections::HashMap;

const BUILTIN: &[(&str, &str)] = &[
    ("accepted", "must be accepted"),
    ("blank", "can't be blank"),
    ("confirmation", "doesn't match %{attribute}"),
    ("empty", "can't be empty"),
    ("equal_to", "must be equal to %{count}"),
    ("even", "must be even"),
    ("exclusion", "is reserved"),
    ("greater_than", "must be greater than %{count}"),
    ("greater_than_or_equal_to", "must be greater than or equal to %{count}"),
    ("inclusion", "is not included in the list"),
    ("invalid", "is invalid"),
    ("less_than", "must be less than %{count}"),
    ("less_than_or_equal_to", "must be less than or equal to %{count}"),
    ("not_a_number", "is not a number"),
    ("not_an_integer", "must be an integer"),
    ("odd", "must be odd"),
    ("other_than", "must be other than %{count}"),
    ("present", "must be blank"),
    ("taken", "has already been taken"),
    ("too_long", "is too long (maximum is %{count} characters)"),
    ("too_short", "is too short (minimum is %{count} characters)"),
    ("wrong_length", "is the wrong length (should be %{count} characters)"),
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Scope {
    ModelAttribute(String, String),
    Model(String),
    Attribute(String),
    Default,
}

#[derive(Debug, Clone)]
pub struct MessageCatalog {
    messages: HashMap<(Scope, String), String>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl MessageCatalog {
    /// A catalog with no messages at all.
    pub fn empty() -> Self {
        Self {
            messages: HashMap::new(),
        }
    }

    pub fn builtin() -> Self {
        BUILTIN
            .iter()
            .fold(Self::empty(), |catalog, (key, message)| {
                catalog.with_default(*key, *message)
            })
    }

    pub fn with_default(self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.insert(Scope::Default, key, message)
    }

    pub fn with_model_message(
        self,
        model_name: impl Into<String>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.insert(Scope::Model(model_name.into()), key, message)
    }

    pub fn with_attribute_message(
        self,
        attribute: impl Into<String>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.insert(Scope::Attribute(attribute.into()), key, message)
    }

    pub fn with_model_attribute_message(
        self,
        model_name: impl Into<String>,
        attribute: impl Into<String>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.insert(
            Scope::ModelAttribute(model_name.into(), attribute.into()),
            key,
            message,
        )
    }

    fn insert(mut self, scope: Scope, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.messages.insert((scope, key.into()), message.into());
        self
    }

    pub fn lookup(&self, model_name: &str, attribute: &str, key: &str) -> Option<&str> {
        let scopes = [
            Scope::ModelAttribute(model_name.to_string(), attribute.to_string()),
            Scope::Model(model_name.to_string()),
            Scope::Attribute(attribute.to_string()),
            Scope::Default,
        ];
        scopes.into_iter().find_map(|scope| {
            self.messages
                .get(&(scope, key.to_string()))
                .map(String::as_str)
        })
    }

    /// Look up `key` and interpolate `values` into it.
    pub fn render(
        &self,
        key: &str,
        model_name: &str,
        attribute: &str,
        values: &HashMap<String, Value>,
    ) -> Result<String> {
        let source =
            self.lookup(model_name, attribute, key)
                .ok_or_else(|| Error::UnknownMessageKey {
                    key: key.to_string(),
                    model_name: model_name.to_string(),
                    attribute: attribute.to_string(),
                })?;

        let template_error = |source| Error::Template {
            key: key.to_string(),
            source,
        };
        let template = Template::parse(source).map_err(template_error)?;
        let vars: HashMap<String, String> = values
            .iter()
            .map(|(name, value)| (name.clone(), value.to_string()))
            .collect();
        template.render(&vars).map_err(template_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_builtin_lookup() {
        let catalog = MessageCatalog::builtin();
        assert_eq!(catalog.lookup("book", "isbn", "invalid"), Some("is invalid"));
        assert_eq!(catalog.lookup("book", "isbn", "no_such_key"), None);
    }

    #[test]
    fn test_most_specific_scope_wins() {
        let catalog = MessageCatalog::builtin()
            .with_attribute_message("isbn", "invalid", "is not an ISBN")
            .with_model_message("book", "invalid", "is not valid for a book")
            .with_model_attribute_message("book", "isbn", "invalid", "is not a book ISBN");

        assert_eq!(catalog.lookup("book", "isbn", "invalid"), Some("is not a book ISBN"));
        assert_eq!(catalog.lookup("book", "title", "invalid"), Some("is not valid for a book"));
        assert_eq!(catalog.lookup("magazine", "isbn", "invalid"), Some("is not an ISBN"));
        assert_eq!(catalog.lookup("magazine", "title", "invalid"), Some("is invalid"));
    }

    #[test]
    fn test_render_with_count() {
        let catalog = MessageCatalog::builtin();
        let rendered = catalog
            .render("too_short", "user", "name", &values(&[("count", Value::from(5))]))
            .unwrap();
        assert_eq!(rendered, "is too short (minimum is 5 characters)");
    }

    #[test]
    fn test_render_unknown_key() {
        let catalog = MessageCatalog::empty();
        assert!(matches!(
            catalog.render("invalid", "book", "isbn", &HashMap::new()),
            Err(Error::UnknownMessageKey { .. })
        ));
    }

    #[test]
    fn test_render_missing_count() {
        let catalog = MessageCatalog::builtin();
        assert!(matches!(
            catalog.render("too_long", "book", "title", &HashMap::new()),
            Err(Error::Template { .. })
        ));
    }
}
