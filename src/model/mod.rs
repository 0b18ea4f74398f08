//! Schema component model
//!
//! The compiled form of an application schema that the checks walk: type
//! definitions, element declarations, particles, model groups, wildcards and
//! attribute uses. A schema compiler populates a [`SchemaModel`]; the checks
//! only read it.

pub mod attributes;
pub mod complex_types;
pub mod elements;
pub mod groups;
pub mod particles;
pub mod schema;
pub mod wildcards;

pub use attributes::{find_attribute_use, AttributeDeclaration, AttributeUse, UseMode};
pub use complex_types::{
    ComplexTypeDefinition, ComplexTypeShape, ContentType, Derivation, DerivationMethod,
    SimpleTypeDefinition, TypeDefinition,
};
pub use elements::{ElementDeclaration, ElementScope};
pub use groups::{Compositor, ModelGroup};
pub use particles::{Occurs, Particle, Term};
pub use schema::{ComponentKind, ElementId, SchemaComponentRef, SchemaModel, TypeId};
pub use wildcards::{NamespaceConstraint, ProcessContents, Wildcard};
