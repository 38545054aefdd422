//! Fluent assertions that a validated model allows, or rejects, values for
//! an attribute.
//!
//! A model implements [`Model`]: attributes can be set by name and
//! validation fills an [`Errors`] collection (or, when validating strictly,
//! fails with [`ModelError::StrictValidationFailed`]). The
//! [`AllowValueMatcher`] assigns each candidate value and inspects the
//! resulting messages.
//!
//! # Example
//!
//! ```
//! use allowance::{allow_value, Errors, Model, ModelError, Value};
//!
//! #[derive(Default)]
//! struct Book {
//!     isbn: String,
//!     errors: Errors,
//! }
//!
//! impl Model for Book {
//!     fn set_attribute(&mut self, _attribute: &str, value: &Value) -> Result<(), ModelError> {
//!         self.isbn = value.to_string();
//!         Ok(())
//!     }
//!
//!     fn attribute(&self, _attribute: &str) -> Option<Value> {
//!         Some(Value::from(self.isbn.as_str()))
//!     }
//!
//!     fn validate(&mut self, _context: Option<&str>) -> Result<bool, ModelError> {
//!         self.errors.clear();
//!         if !self.isbn.starts_with("isbn") {
//!             self.errors.add("isbn", "is invalid");
//!         }
//!         Ok(self.errors.is_empty())
//!     }
//!
//!     fn errors(&self) -> &Errors {
//!         &self.errors
//!     }
//! }
//!
//! let mut book = Book::default();
//!
//! let mut good = allow_value(["isbn 1 2345 6789 0"]).unwrap().for_attribute("isbn");
//! assert!(good.matches(&mut book).unwrap());
//!
//! let mut bad = allow_value(["bad"]).unwrap().for_attribute("isbn").with_message("is invalid");
//! assert!(!bad.matches(&mut book).unwrap());
//! ```

pub mod accessors;
pub mod assert;
pub mod catalog;
pub mod error;
pub mod expected;
pub mod finder;
pub mod matcher;
pub mod model;
pub mod value;

pub use accessors::Accessors;
pub use catalog::MessageCatalog;
pub use error::{Error, ModelError, Result};
pub use expected::{ExpectedMessage, MessageOptions};
pub use finder::{ExceptionMessageFinder, FinderStrategy, MessageFinder, ValidationMessageFinder};
pub use matcher::{allow_value, AllowValueMatcher, Matcher};
pub use model::{Errors, Model, BASE};
pub use value::Value;
