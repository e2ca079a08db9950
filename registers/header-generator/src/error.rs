// Licensed under the Apache-2.0 license

//! Errors raised while decoding a peripheral description or generating its header.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while generating a register header.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// A required key is absent from a decoded description.
    #[error("missing required field `{field}` in {context}")]
    MissingField {
        field: &'static str,
        context: String,
    },

    /// The peripheral names a license that the license table does not contain.
    #[error("unknown license `{0}`")]
    UnknownLicense(String),

    /// A template references a name that is not a placeholder at all.
    #[error("unknown placeholder `{{{name}}}` in template {template:?}")]
    UnknownPlaceholder { name: String, template: String },

    /// A template references a placeholder that has no value for this peripheral.
    #[error("placeholder `{{{name}}}` has no value (template {template:?})")]
    UnsetPlaceholder { name: String, template: String },

    /// Unbalanced `{` or `}` in a template.
    #[error("malformed template {template:?}: {reason}")]
    MalformedTemplate {
        template: String,
        reason: &'static str,
    },

    /// A register declares both bit fields and register-level values.
    #[error("register `{register}` has both `fields` and `values`")]
    ConflictingContents { register: String },

    /// Documentation groups were closed more often than opened, or left open.
    #[error("unbalanced documentation groups: {0}")]
    UnbalancedGroups(&'static str),

    /// Invalid YAML in a description or license table.
    #[error("failed to decode YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GeneratorError {
    pub(crate) fn missing(field: &'static str, context: impl Into<String>) -> Self {
        GeneratorError::MissingField {
            field,
            context: context.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GeneratorError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for header generation.
pub type GeneratorResult<T> = std::result::Result<T, GeneratorError>;
