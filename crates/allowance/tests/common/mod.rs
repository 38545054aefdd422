#![allow(dead_code)]

use allowance::accessors::{integer_value, string_value};
use allowance::{Accessors, Errors, Model, ModelError, Value};
use regex::Regex;
use std::sync::OnceLock;

fn isbn_pattern() -> &'static Regex {
    static ISBN: OnceLock<Regex> = OnceLock::new();
    ISBN.get_or_init(|| Regex::new(r"^isbn( \d+)+$").unwrap())
}

/// Validates `isbn`, `title` and `pages`; records every assignment.
#[derive(Debug, Default)]
pub struct Book {
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub pages: Option<i64>,
    pub assigned: Vec<(String, Value)>,
    pub strict: bool,
    pub validations: usize,
    errors: Errors,
}

impl Book {
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    fn accessors() -> Accessors<Book> {
        Accessors::<Book>::new()
            .attribute(
                "isbn",
                |b| Value::from(b.isbn.clone()),
                |b, v| {
                    b.isbn = string_value("isbn", v)?;
                    Ok(())
                },
            )
            .attribute(
                "title",
                |b| Value::from(b.title.clone()),
                |b, v| {
                    b.title = string_value("title", v)?;
                    Ok(())
                },
            )
            .attribute(
                "pages",
                |b| Value::from(b.pages),
                |b, v| {
                    b.pages = integer_value("pages", v)?;
                    Ok(())
                },
            )
    }

    fn fail(&mut self, attribute: &str, message: &str) -> Result<(), ModelError> {
        if self.strict {
            let full = format!("{} {}", self.human_attribute_name(attribute), message);
            return Err(ModelError::strict(full));
        }
        self.errors.add(attribute, message);
        Ok(())
    }
}

impl Model for Book {
    fn set_attribute(&mut self, attribute: &str, value: &Value) -> Result<(), ModelError> {
        Self::accessors().set(self, attribute, value)?;
        self.assigned.push((attribute.to_string(), value.clone()));
        Ok(())
    }

    fn attribute(&self, attribute: &str) -> Option<Value> {
        Self::accessors().get(self, attribute)
    }

    fn validate(&mut self, context: Option<&str>) -> Result<bool, ModelError> {
        self.validations += 1;
        self.errors.clear();

        if let Some(isbn) = self.isbn.clone() {
            if !isbn_pattern().is_match(&isbn) {
                self.fail("isbn", "is invalid")?;
            }
        }

        if let Some(title) = self.title.clone() {
            if title.trim().is_empty() {
                self.fail("title", "can't be blank")?;
            } else if title.len() < 5 {
                self.fail("title", "is too short")?;
            }
            if title.contains('!') {
                self.fail("title", "must not shout")?;
            }
            // Untitled drafts may be saved but not published.
            if context == Some("publish") && title.starts_with("Untitled") {
                self.fail("base", "cannot publish an untitled book")?;
            }
        }

        if let Some(pages) = self.pages {
            if pages <= 0 {
                self.fail("pages", "must be greater than 0")?;
            }
        }

        Ok(self.errors.is_empty())
    }

    fn errors(&self) -> &Errors {
        &self.errors
    }
}

/// Confirmation is only compared when validating in the `signup` context;
/// any other validation reports what the last signup check found.
#[derive(Debug, Default)]
pub struct Signup {
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
    errors: Errors,
}

impl Signup {
    pub fn with_confirmation(confirmation: &str) -> Self {
        Self {
            password_confirmation: Some(confirmation.to_string()),
            ..Self::default()
        }
    }
}

impl Model for Signup {
    fn set_attribute(&mut self, attribute: &str, value: &Value) -> Result<(), ModelError> {
        let value = string_value(attribute, value)?;
        match attribute {
            "password" => self.password = value,
            "password_confirmation" => self.password_confirmation = value,
            _ => {
                return Err(ModelError::UnknownAttribute {
                    model: self.model_name(),
                    attribute: attribute.to_string(),
                })
            }
        }
        Ok(())
    }

    fn attribute(&self, attribute: &str) -> Option<Value> {
        match attribute {
            "password" => Some(Value::from(self.password.clone())),
            "password_confirmation" => Some(Value::from(self.password_confirmation.clone())),
            _ => None,
        }
    }

    fn validate(&mut self, context: Option<&str>) -> Result<bool, ModelError> {
        if context == Some("signup") {
            self.errors.clear();
            if self.password != self.password_confirmation {
                self.errors
                    .add("password_confirmation", "doesn't match Password");
            }
        }
        Ok(self.errors.is_empty())
    }

    fn errors(&self) -> &Errors {
        &self.errors
    }
}

/// Validation always fails with an unrelated error.
#[derive(Debug, Default)]
pub struct Offline {
    pub name: Option<String>,
    errors: Errors,
}

impl Model for Offline {
    fn set_attribute(&mut self, _attribute: &str, value: &Value) -> Result<(), ModelError> {
        self.name = string_value("name", value)?;
        Ok(())
    }

    fn attribute(&self, _attribute: &str) -> Option<Value> {
        Some(Value::from(self.name.clone()))
    }

    fn validate(&mut self, _context: Option<&str>) -> Result<bool, ModelError> {
        Err(anyhow::anyhow!("connection refused").into())
    }

    fn errors(&self) -> &Errors {
        &self.errors
    }
}
