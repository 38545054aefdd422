//! The validated-model capability the matcher drives.

use crate::error::ModelError;
use crate::value::Value;
use regex::Regex;
use std::sync::OnceLock;

/// Attribute name for errors that belong to the model as a whole.
pub const BASE: &str = "base";

/// A model that accepts attribute assignment by name and validates itself.
///
/// `validate` must clear and repopulate [`Model::errors`]. Models that
/// validate strictly report the first failure as
/// [`ModelError::StrictValidationFailed`] instead.
pub trait Model {
    fn set_attribute(&mut self, attribute: &str, value: &Value) -> Result<(), ModelError>;

    fn attribute(&self, attribute: &str) -> Option<Value>;

    fn validate(&mut self, context: Option<&str>) -> Result<bool, ModelError>;

    fn errors(&self) -> &Errors;

    /// Lower snake case type name, e.g. `BookTitle` becomes `book_title`.
    fn model_name(&self) -> String {
        underscore(short_type_name::<Self>())
    }

    fn human_attribute_name(&self, attribute: &str) -> String {
        humanize(attribute)
    }

    fn inspect(&self) -> String {
        format!("#<{}>", short_type_name::<Self>())
    }
}

/// Validation errors in the order they were added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Errors {
    entries: Vec<(String, String)>,
}

impl Errors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, attribute: impl Into<String>, message: impl Into<String>) {
        self.entries.push((attribute.into(), message.into()));
    }

    pub fn get(&self, attribute: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(attr, _)| attr == attribute)
            .map(|(_, message)| message.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(attr, message)| (attr.as_str(), message.as_str()))
    }
}

/// Last path segment of a type name with generic arguments removed.
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let without_generics = full.split('<').next().unwrap_or(full);
    without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
}

pub fn underscore(name: &str) -> String {
    static ACRONYM: OnceLock<Regex> = OnceLock::new();
    static WORD: OnceLock<Regex> = OnceLock::new();
    let acronym = ACRONYM.get_or_init(|| Regex::new(r"([A-Z\d]+)([A-Z][a-z])").unwrap());
    let word = WORD.get_or_init(|| Regex::new(r"([a-z\d])([A-Z])").unwrap());

    let name = name.replace("::", "/");
    let name = acronym.replace_all(&name, "${1}_${2}");
    let name = word.replace_all(&name, "${1}_${2}");
    name.replace('-', "_").to_lowercase()
}

pub fn humanize(attribute: &str) -> String {
    let trimmed = attribute.strip_suffix("_id").unwrap_or(attribute);
    let spaced = trimmed.replace('_', " ");
    let mut chars = spaced.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
