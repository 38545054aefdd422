use allowance_template::TemplateError;
use thiserror::Error;

/// Failures raised by a model while assigning or validating.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Raised by strict validation in place of adding to the error collection.
    #[error("{message}")]
    StrictValidationFailed { message: String },

    #[error("unknown attribute '{attribute}' for {model}")]
    UnknownAttribute { model: String, attribute: String },

    #[error("cannot set '{attribute}' to {value}: {reason}")]
    InvalidAssignment {
        attribute: String,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ModelError {
    pub fn strict(message: impl Into<String>) -> Self {
        Self::StrictValidationFailed {
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("need at least one value to match")]
    NoValues,

    #[error("no attribute to set; call for_attribute before matching")]
    MissingAttribute,

    #[error("no default message '{key}' for {model_name}.{attribute}")]
    UnknownMessageKey {
        key: String,
        model_name: String,
        attribute: String,
    },

    #[error("failed to render default message '{key}'")]
    Template {
        key: String,
        #[source]
        source: TemplateError,
    },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("after-setting-value hook failed")]
    Hook(#[source] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
