//! Compiled schema component model
//!
//! [`SchemaModel`] is an arena of type definitions and element declarations.
//! Components refer to each other through [`TypeId`] and [`ElementId`], which
//! are only meaningful within the model that issued them. Global components
//! are also indexed by qualified name.

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;

use super::complex_types::{ComplexTypeDefinition, DerivationMethod, TypeDefinition};
use super::elements::ElementDeclaration;
use crate::error::{Error, PreconditionError, Result};
use crate::namespaces::QName;

/// Index of a type definition within a [`SchemaModel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

/// Index of an element declaration within a [`SchemaModel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

/// Kind of schema component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ComponentKind {
    /// Element declaration
    ElementDeclaration,
    /// Type definition
    TypeDefinition,
    /// Attribute declaration
    AttributeDeclaration,
}

/// Reference to a schema component by qualified name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SchemaComponentRef {
    /// Component name
    pub name: QName,
    /// Component kind
    pub kind: ComponentKind,
}

impl std::fmt::Display for SchemaComponentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            ComponentKind::ElementDeclaration => "element declaration",
            ComponentKind::TypeDefinition => "type definition",
            ComponentKind::AttributeDeclaration => "attribute declaration",
        };
        write!(f, "{} {}", kind, self.name)
    }
}

/// Compiled schema component model
#[derive(Debug, Clone, Default)]
pub struct SchemaModel {
    types: Vec<TypeDefinition>,
    elements: Vec<ElementDeclaration>,
    global_types: IndexMap<QName, TypeId>,
    global_elements: IndexMap<QName, ElementId>,
}

impl SchemaModel {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type definition; named types are registered as global
    pub fn add_type(&mut self, definition: impl Into<TypeDefinition>) -> TypeId {
        let definition = definition.into();
        let id = TypeId(self.types.len() as u32);
        if let Some(name) = definition.name() {
            self.global_types.insert(name.clone(), id);
        }
        self.types.push(definition);
        id
    }

    /// Add an element declaration; global declarations are indexed by name
    pub fn add_element(&mut self, declaration: ElementDeclaration) -> ElementId {
        let id = ElementId(self.elements.len() as u32);
        if declaration.scope.is_global() {
            self.global_elements.insert(declaration.name.clone(), id);
        }
        self.elements.push(declaration);
        id
    }

    /// Get a type definition
    pub fn type_definition(&self, id: TypeId) -> Result<&TypeDefinition> {
        self.types.get(id.0 as usize).ok_or_else(|| {
            Error::Precondition(PreconditionError::new(format!(
                "type id {} does not belong to this model",
                id.0
            )))
        })
    }

    /// Get a complex type definition, failing if the type is simple
    pub fn complex_type(&self, id: TypeId) -> Result<&ComplexTypeDefinition> {
        let definition = self.type_definition(id)?;
        definition.as_complex().ok_or_else(|| {
            Error::Precondition(
                PreconditionError::new("expected a complex type definition")
                    .with_component(self.type_label(id)),
            )
        })
    }

    /// Get a mutable complex type definition (to attach content after the
    /// elements it refers to have been declared)
    pub fn complex_type_mut(&mut self, id: TypeId) -> Option<&mut ComplexTypeDefinition> {
        match self.types.get_mut(id.0 as usize) {
            Some(TypeDefinition::Complex(ct)) => Some(ct),
            _ => None,
        }
    }

    /// Get an element declaration
    pub fn element(&self, id: ElementId) -> Result<&ElementDeclaration> {
        self.elements.get(id.0 as usize).ok_or_else(|| {
            Error::Precondition(PreconditionError::new(format!(
                "element id {} does not belong to this model",
                id.0
            )))
        })
    }

    /// Get a mutable element declaration
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut ElementDeclaration> {
        self.elements.get_mut(id.0 as usize)
    }

    /// Look up a global type definition by name
    pub fn global_type(&self, name: &QName) -> Option<TypeId> {
        self.global_types.get(name).copied()
    }

    /// Look up a global element declaration by name
    pub fn global_element(&self, name: &QName) -> Option<ElementId> {
        self.global_elements.get(name).copied()
    }

    /// Iterate over global element declarations in declaration order
    pub fn global_elements(&self) -> impl Iterator<Item = (ElementId, &ElementDeclaration)> + '_ {
        self.global_elements
            .values()
            .map(move |id| (*id, &self.elements[id.0 as usize]))
    }

    /// Iterate over all element declarations, global and local
    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &ElementDeclaration)> + '_ {
        self.elements
            .iter()
            .enumerate()
            .map(|(i, decl)| (ElementId(i as u32), decl))
    }

    /// Iterate over all type definitions
    pub fn types(&self) -> impl Iterator<Item = (TypeId, &TypeDefinition)> + '_ {
        self.types
            .iter()
            .enumerate()
            .map(|(i, def)| (TypeId(i as u32), def))
    }

    /// Number of element declarations
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Number of type definitions
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Name of an element declaration, for diagnostics
    pub fn element_name(&self, id: ElementId) -> QName {
        self.elements
            .get(id.0 as usize)
            .map(|decl| decl.name.clone())
            .unwrap_or_else(|| QName::local(format!("#element{}", id.0)))
    }

    /// Label of a type definition, for diagnostics
    pub fn type_label(&self, id: TypeId) -> String {
        match self.types.get(id.0 as usize).and_then(|def| def.name()) {
            Some(name) => name.to_string(),
            None => format!("anonymous type #{}", id.0),
        }
    }

    /// Component reference for an element declaration
    pub fn element_ref(&self, id: ElementId) -> SchemaComponentRef {
        SchemaComponentRef {
            name: self.element_name(id),
            kind: ComponentKind::ElementDeclaration,
        }
    }

    /// Check whether `derived` is `base` or derives from it. When `method` is
    /// given, every step of the derivation chain must use that method.
    pub fn derives_from(
        &self,
        derived: TypeId,
        base: TypeId,
        method: Option<DerivationMethod>,
    ) -> bool {
        let mut current = derived;
        let mut visited = HashSet::new();
        loop {
            if current == base {
                return true;
            }
            if !visited.insert(current) {
                return false;
            }
            let derivation = match self.types.get(current.0 as usize).and_then(|t| t.derivation()) {
                Some(derivation) => derivation,
                None => return false,
            };
            if let Some(required) = method {
                if derivation.method != required {
                    return false;
                }
            }
            current = derivation.base;
        }
    }
}
