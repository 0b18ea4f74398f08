//! XSD attribute declarations and attribute uses
//!
//! Reference: https://www.w3.org/TR/xmlschema11-1/#Attribute_Declarations

use crate::namespaces::QName;

/// Attribute use mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UseMode {
    /// Attribute is optional
    #[default]
    Optional,
    /// Attribute is required
    Required,
    /// Attribute is prohibited
    Prohibited,
}

/// An attribute declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDeclaration {
    /// Attribute name
    pub name: QName,
}

/// An attribute use within a complex type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeUse {
    /// The declared attribute
    pub declaration: AttributeDeclaration,
    /// Use mode
    pub use_mode: UseMode,
}

impl AttributeUse {
    /// Create an optional attribute use
    pub fn optional(name: QName) -> Self {
        Self {
            declaration: AttributeDeclaration { name },
            use_mode: UseMode::Optional,
        }
    }

    /// Create a required attribute use
    pub fn required(name: QName) -> Self {
        Self {
            declaration: AttributeDeclaration { name },
            use_mode: UseMode::Required,
        }
    }

    /// Create a prohibited attribute use
    pub fn prohibited(name: QName) -> Self {
        Self {
            declaration: AttributeDeclaration { name },
            use_mode: UseMode::Prohibited,
        }
    }

    /// Attribute name
    pub fn name(&self) -> &QName {
        &self.declaration.name
    }

    /// Check whether this use declares the given attribute. A declaration
    /// without a namespace matches on local name alone.
    pub fn matches(&self, name: &QName) -> bool {
        let decl = &self.declaration.name;
        if decl.local_name != name.local_name {
            return false;
        }
        match &decl.namespace {
            None => true,
            Some(ns) => name.namespace.as_deref() == Some(ns.as_str()),
        }
    }
}

/// Find the use that permits an attribute. Prohibited uses never match.
pub fn find_attribute_use<'a>(uses: &'a [AttributeUse], name: &QName) -> Option<&'a AttributeUse> {
    uses.iter()
        .filter(|attr_use| attr_use.use_mode != UseMode::Prohibited)
        .find(|attr_use| attr_use.matches(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespaces::XLINK_NAMESPACE;

    #[test]
    fn test_prohibited_use_is_not_found() {
        let uses = vec![AttributeUse::prohibited(QName::xlink_href())];
        assert!(find_attribute_use(&uses, &QName::xlink_href()).is_none());
    }

    #[test]
    fn test_find_xlink_href() {
        let uses = vec![
            AttributeUse::optional(QName::namespaced(XLINK_NAMESPACE, "title")),
            AttributeUse::optional(QName::xlink_href()),
        ];
        let found = find_attribute_use(&uses, &QName::xlink_href()).unwrap();
        assert_eq!(found.name().local_name, "href");
    }

    #[test]
    fn test_unqualified_declaration_matches_local_name() {
        let uses = vec![AttributeUse::optional(QName::local("href"))];
        assert!(find_attribute_use(&uses, &QName::xlink_href()).is_some());
    }

    #[test]
    fn test_other_namespace_does_not_match() {
        let uses = vec![AttributeUse::optional(QName::namespaced("http://example.org", "href"))];
        assert!(find_attribute_use(&uses, &QName::xlink_href()).is_none());
    }
}
