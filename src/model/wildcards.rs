//! XSD element wildcards (xs:any)
//!
//! Property types may not contain wildcards, so the checks only need to know
//! that a term is one. The namespace constraint and processing mode are kept
//! so a compiled wildcard can be reported faithfully.
//!
//! Reference: https://www.w3.org/TR/xmlschema11-1/#Wildcards

use std::collections::BTreeSet;

/// Process contents mode for wildcards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessContents {
    /// Validate strictly - element must be declared
    #[default]
    Strict,
    /// Validate if declaration found, otherwise accept
    Lax,
    /// Skip validation entirely
    Skip,
}

/// Namespace constraint for wildcards
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NamespaceConstraint {
    /// Any namespace is allowed (##any)
    #[default]
    Any,
    /// Any namespace except the target namespace and no namespace (##other)
    Other {
        /// The target namespace to exclude
        target_namespace: Option<String>,
    },
    /// Specific set of allowed namespaces
    Enumeration(BTreeSet<String>),
}

/// An element wildcard
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Wildcard {
    /// Namespace constraint
    pub namespaces: NamespaceConstraint,
    /// Process contents mode
    pub process_contents: ProcessContents,
}
