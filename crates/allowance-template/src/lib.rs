//! Default-message templates.
//!
//! Validation messages are written with `%{name}` placeholders that are
//! filled in when a message is rendered for a particular model and
//! attribute.
//!
//! # Template Format
//!
//! ```text
//! is too short (minimum is %{count} characters)
//! 100%% sure    (escaped percent sign)
//! ```
//!
//! # Example
//!
//! ```
//! use allowance_template::Template;
//! use std::collections::HashMap;
//!
//! let template = Template::parse("is too short (minimum is %{count} characters)").unwrap();
//!
//! let mut vars = HashMap::new();
//! vars.insert("count".to_string(), "5".to_string());
//!
//! assert_eq!(
//!     template.render(&vars).unwrap(),
//!     "is too short (minimum is 5 characters)"
//! );
//! ```

use std::collections::HashMap;
use thiserror::Error;
use winnow::combinator::{alt, cut_err, preceded, repeat, terminated};
use winnow::prelude::*;
use winnow::token::{take_till, take_while};

// ============ Data Types ============

/// A segment of a message template - either literal text or a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Literal(String),
    Placeholder(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum TemplateError {
    #[error("malformed template '{template}' at offset {offset}: {message}")]
    Parse {
        template: String,
        offset: usize,
        message: String,
    },
    #[error("missing interpolation argument '{name}' in '{template}'")]
    MissingVariable { name: String, template: String },
}

/// A parsed message template.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

// ============ Public API ============

impl Template {
    pub fn parse(source: impl Into<String>) -> Result<Self, TemplateError> {
        let source = source.into();
        let segments = parse_segments(&source)?;
        Ok(Self { source, segments })
    }

    pub fn render(&self, vars: &HashMap<String, String>) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => match vars.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        return Err(TemplateError::MissingVariable {
                            name: name.clone(),
                            template: self.source.clone(),
                        })
                    }
                },
            }
        }
        Ok(out)
    }
}

pub fn parse_segments(source: &str) -> Result<Vec<Segment>, TemplateError> {
    let mut input = source;
    let parsed = match segments.parse_next(&mut input) {
        Ok(parsed) => parsed,
        Err(e) => {
            return Err(TemplateError::Parse {
                template: source.to_string(),
                offset: source.len() - input.len(),
                message: format!("{:?}", e),
            })
        }
    };

    if !input.is_empty() {
        return Err(TemplateError::Parse {
            template: source.to_string(),
            offset: source.len() - input.len(),
            message: "unexpected trailing input".to_string(),
        });
    }

    Ok(merge_literals(parsed))
}

fn merge_literals(parsed: Vec<Segment>) -> Vec<Segment> {
    let mut merged: Vec<Segment> = Vec::with_capacity(parsed.len());
    for segment in parsed {
        if let (Segment::Literal(text), Some(Segment::Literal(prev))) =
            (&segment, merged.last_mut())
        {
            prev.push_str(text);
            continue;
        }
        merged.push(segment);
    }
    merged
}

// ============ Winnow Parsers ============

fn placeholder_name<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)
}

fn placeholder(input: &mut &str) -> ModalResult<Segment> {
    // Once "%{" is seen the placeholder must be well formed.
    preceded("%{", cut_err(terminated(placeholder_name, '}')))
        .map(|name: &str| Segment::Placeholder(name.to_string()))
        .parse_next(input)
}

fn escaped_percent(input: &mut &str) -> ModalResult<Segment> {
    "%%".value(Segment::Literal("%".to_string()))
        .parse_next(input)
}

fn lone_percent(input: &mut &str) -> ModalResult<Segment> {
    '%'.value(Segment::Literal("%".to_string()))
        .parse_next(input)
}

fn literal(input: &mut &str) -> ModalResult<Segment> {
    take_till(1.., '%')
        .map(|text: &str| Segment::Literal(text.to_string()))
        .parse_next(input)
}

fn segments(input: &mut &str) -> ModalResult<Vec<Segment>> {
    repeat(0.., alt((escaped_percent, placeholder, lone_percent, literal))).parse_next(input)
}
