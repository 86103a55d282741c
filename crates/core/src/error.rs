use thiserror::Error;

/// Errors raised while loading documents or building a parser configuration.
///
/// Rendering itself never fails: node-level anomalies are reported as
/// [`crate::Diagnostic`] values instead.
#[derive(Debug, Error)]
pub enum JcodError {
    /// The document or options were not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// The document was not valid YAML.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// An option has the right type but an unusable value.
    #[error("Invalid option `{field}`: {message}")]
    InvalidOptions {
        /// Public (camelCase) name of the offending option.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },
}

impl JcodError {
    /// Create an invalid option error
    pub fn invalid_option(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            field,
            message: message.into(),
        }
    }
}
