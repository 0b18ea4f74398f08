//! XSD element declarations
//!
//! Reference: https://www.w3.org/TR/xmlschema11-1/#Element_Declarations

use super::schema::{ElementId, TypeId};
use crate::namespaces::QName;

/// The scope of an element declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElementScope {
    /// Global element declaration
    #[default]
    Global,
    /// Local element declaration within a complex type
    Local(TypeId),
}

impl ElementScope {
    /// Check if the declaration is global
    pub fn is_global(&self) -> bool {
        matches!(self, ElementScope::Global)
    }
}

impl std::fmt::Display for ElementScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::Local(_) => write!(f, "local"),
        }
    }
}

/// An element declaration
#[derive(Debug, Clone, PartialEq)]
pub struct ElementDeclaration {
    /// Element name
    pub name: QName,
    /// Declared type
    pub type_definition: TypeId,
    /// Global or local scope
    pub scope: ElementScope,
    /// Whether this element is abstract
    pub abstract_element: bool,
    /// Substitution group affiliation (head element)
    pub substitution_group: Option<ElementId>,
}

impl ElementDeclaration {
    /// Create a global element declaration
    pub fn global(name: QName, type_definition: TypeId) -> Self {
        Self {
            name,
            type_definition,
            scope: ElementScope::Global,
            abstract_element: false,
            substitution_group: None,
        }
    }

    /// Create a local element declaration inside the given complex type
    pub fn local(name: QName, type_definition: TypeId, container: TypeId) -> Self {
        Self {
            scope: ElementScope::Local(container),
            ..Self::global(name, type_definition)
        }
    }

    /// Set the substitution group head
    pub fn substitutes(mut self, head: ElementId) -> Self {
        self.substitution_group = Some(head);
        self
    }

    /// Mark the element abstract
    pub fn abstract_element(mut self) -> Self {
        self.abstract_element = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope() {
        let global = ElementDeclaration::global(QName::gml("Point"), TypeId(0));
        assert!(global.scope.is_global());
        assert_eq!(global.scope.to_string(), "global");

        let local = ElementDeclaration::local(QName::local("member"), TypeId(1), TypeId(2));
        assert_eq!(local.scope, ElementScope::Local(TypeId(2)));
        assert_eq!(local.scope.to_string(), "local");
    }

    #[test]
    fn test_builder() {
        let decl = ElementDeclaration::global(QName::gml("AbstractFeature"), TypeId(0))
            .abstract_element()
            .substitutes(ElementId(7));
        assert!(decl.abstract_element);
        assert_eq!(decl.substitution_group, Some(ElementId(7)));
    }
}
