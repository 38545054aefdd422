//! Attribute accessor tables.
//!
//! Rust models have no reflective setters, so a model registers one getter
//! and one setter per attribute and delegates [`Model::set_attribute`] and
//! [`Model::attribute`] to the table.
//!
//! [`Model::set_attribute`]: crate::Model::set_attribute
//! [`Model::attribute`]: crate::Model::attribute

use crate::error::ModelError;
use crate::model::{short_type_name, underscore};
use crate::value::Value;

pub type Getter<M> = fn(&M) -> Value;
pub type Setter<M> = fn(&mut M, &Value) -> Result<(), ModelError>;

struct Accessor<M> {
    name: &'static str,
    get: Getter<M>,
    set: Setter<M>,
}

pub struct Accessors<M> {
    accessors: Vec<Accessor<M>>,
}

impl<M> Default for Accessors<M> {
    fn default() -> Self {
        Self {
            accessors: Vec::new(),
        }
    }
}

impl<M> Accessors<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registering a name twice replaces the earlier accessor.
    pub fn attribute(mut self, name: &'static str, get: Getter<M>, set: Setter<M>) -> Self {
        self.accessors.retain(|a| a.name != name);
        self.accessors.push(Accessor { name, get, set });
        self
    }

    pub fn get(&self, model: &M, name: &str) -> Option<Value> {
        self.find(name).map(|a| (a.get)(model))
    }

    pub fn set(&self, model: &mut M, name: &str, value: &Value) -> Result<(), ModelError> {
        match self.find(name) {
            Some(accessor) => (accessor.set)(model, value),
            None => Err(ModelError::UnknownAttribute {
                model: underscore(short_type_name::<M>()),
                attribute: name.to_string(),
            }),
        }
    }

    fn find(&self, name: &str) -> Option<&Accessor<M>> {
        self.accessors.iter().find(|a| a.name == name)
    }
}

/// Accepts strings only; `nil` clears the attribute.
pub fn string_value(attribute: &str, value: &Value) -> Result<Option<String>, ModelError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        other => Err(invalid(attribute, other, "expected a string")),
    }
}

/// Accepts integers, and strings that parse as integers, as a lenient cast.
pub fn integer_value(attribute: &str, value: &Value) -> Result<Option<i64>, ModelError> {
    match value {
        Value::Null => Ok(None),
        Value::Integer(n) => Ok(Some(*n)),
        Value::String(s) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| invalid(attribute, value, "expected an integer")),
        other => Err(invalid(attribute, other, "expected an integer")),
    }
}

fn invalid(attribute: &str, value: &Value, reason: &str) -> ModelError {
    ModelError::InvalidAssignment {
        attribute: attribute.to_string(),
        value: value.inspect(),
        reason: reason.to_string(),
    }
}
