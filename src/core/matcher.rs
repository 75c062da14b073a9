//! Indirection detection.
//!
//! Decides whether an environment variable refers to a parameter and, if
//! so, which one.

use tracing::trace;

use crate::core::environ::EnvVar;
use crate::core::template::{Context, Template};
use crate::core::types::ParameterName;
use crate::error::TemplateError;

/// Classifies environment variables with a compiled pattern.
#[derive(Debug, Clone)]
pub struct Matcher {
    template: Template,
}

impl Matcher {
    /// Compile a matcher from pattern text.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Parse` if the pattern is invalid.
    pub fn new(pattern: &str) -> Result<Self, TemplateError> {
        Ok(Self {
            template: Template::compile(pattern)?,
        })
    }

    /// Evaluate the pattern against one variable.
    ///
    /// Returns `None` when the pattern renders to the empty string.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Eval` if the pattern fails for this input.
    pub fn matches(&self, var: &EnvVar) -> Result<Option<ParameterName>, TemplateError> {
        let rendered = self.template.render(Context {
            name: &var.name,
            value: &var.value,
        })?;

        if rendered.is_empty() {
            return Ok(None);
        }
        trace!(var = %var.name, parameter = %rendered, "indirection");
        Ok(Some(rendered))
    }
}
