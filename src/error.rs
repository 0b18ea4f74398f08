//! Error types for gml-conformance
//!
//! Rule violations found by a check are not errors; they are reported as
//! [`Violation`](crate::diagnostics::Violation) values. The types in this module
//! cover the cases where a check cannot be evaluated at all: a lookup that names
//! a component the model does not have, or input that breaks a documented
//! precondition (a schema model that was never schema-valid, a geometry handed
//! to a check that does not apply to it).

use std::fmt;
use thiserror::Error;

/// Result type alias using the crate [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for gml-conformance operations
#[derive(Error, Debug)]
pub enum Error {
    /// A type or element declaration could not be found by qualified name
    #[error("{kind} not found: {name}")]
    NotFound {
        /// Kind of schema component that was looked up
        kind: &'static str,
        /// Qualified name that was looked up
        name: String,
    },

    /// The input violates a documented precondition
    #[error("precondition violated: {0}")]
    Precondition(#[from] PreconditionError),

    /// Malformed geometry content in a DOM node
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Settings document could not be read
    #[error("settings error: {0}")]
    Settings(#[from] serde_json::Error),
}

impl Error {
    /// Create a not-found error for a type definition
    pub fn type_not_found(name: impl fmt::Display) -> Self {
        Self::NotFound {
            kind: "type definition",
            name: name.to_string(),
        }
    }

    /// Create a not-found error for an element declaration
    pub fn element_not_found(name: impl fmt::Display) -> Self {
        Self::NotFound {
            kind: "element declaration",
            name: name.to_string(),
        }
    }

    /// Check if this error signals a broken precondition
    pub fn is_precondition(&self) -> bool {
        matches!(self, Error::Precondition(_))
    }
}

/// Precondition violation with context
#[derive(Debug, Clone, PartialEq)]
pub struct PreconditionError {
    /// Error message
    pub message: String,
    /// Schema component or geometry that broke the precondition
    pub component: Option<String>,
}

impl PreconditionError {
    /// Create a new precondition error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            component: None,
        }
    }

    /// Set the offending component
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }
}

impl fmt::Display for PreconditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref component) = self.component {
            write!(f, " (component: {})", component)?;
        }

        Ok(())
    }
}

impl std::error::Error for PreconditionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_error_display() {
        let err = PreconditionError::new("content is not empty but has no particle")
            .with_component("{http://example.org/ns1}BadPropertyType");

        let msg = format!("{}", err);
        assert!(msg.contains("has no particle"));
        assert!(msg.contains("component: {http://example.org/ns1}BadPropertyType"));
    }

    #[test]
    fn test_not_found_display() {
        let err = Error::type_not_found("{http://www.opengis.net/gml/3.2}MissingType");
        assert_eq!(
            err.to_string(),
            "type definition not found: {http://www.opengis.net/gml/3.2}MissingType"
        );
        assert!(!err.is_precondition());
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = PreconditionError::new("test").into();
        assert!(err.is_precondition());
    }
}
