//! XSD type definitions
//!
//! Complex types carry a content type, an optional top-level particle and a
//! set of attribute uses. Simple types only matter here as the declared type
//! of an element that is not a valid property.
//!
//! Reference: https://www.w3.org/TR/xmlschema11-1/#Complex_Type_Definitions

use serde::Serialize;

use super::attributes::{find_attribute_use, AttributeUse};
use super::particles::Particle;
use super::schema::TypeId;
use crate::namespaces::QName;

/// Derivation method for types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DerivationMethod {
    /// Type derived by restriction
    #[default]
    Restriction,
    /// Type derived by extension
    Extension,
}

/// Content type of a complex type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    /// No content (empty element)
    Empty,
    /// Simple content (text only)
    Simple,
    /// Mixed content (text and elements)
    Mixed,
    /// Element-only content
    ElementOnly,
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Simple => write!(f, "simple"),
            Self::Mixed => write!(f, "mixed"),
            Self::ElementOnly => write!(f, "element-only"),
        }
    }
}

/// Base type link shared by simple and complex types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Derivation {
    /// The base type definition
    pub base: TypeId,
    /// How this type was derived from it
    pub method: DerivationMethod,
}

/// A complex type definition
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexTypeDefinition {
    /// Type name (None for anonymous types)
    pub name: Option<QName>,
    /// Base type and derivation method (None for the ur-type)
    pub derivation: Option<Derivation>,
    /// Whether the type is abstract
    pub abstract_type: bool,
    /// Content type
    pub content_type: ContentType,
    /// Top-level particle; present when content is element-only or mixed
    pub particle: Option<Particle>,
    /// Attribute uses, including inherited ones
    pub attribute_uses: Vec<AttributeUse>,
}

impl ComplexTypeDefinition {
    /// Create a named complex type with empty content
    pub fn new(name: QName) -> Self {
        Self {
            name: Some(name),
            derivation: None,
            abstract_type: false,
            content_type: ContentType::Empty,
            particle: None,
            attribute_uses: Vec::new(),
        }
    }

    /// Create an anonymous complex type with empty content
    pub fn anonymous() -> Self {
        Self {
            name: None,
            ..Self::new(QName::local(""))
        }
    }

    /// Set the base type
    pub fn derived_from(mut self, base: TypeId, method: DerivationMethod) -> Self {
        self.derivation = Some(Derivation { base, method });
        self
    }

    /// Mark the type abstract
    pub fn abstract_type(mut self) -> Self {
        self.abstract_type = true;
        self
    }

    /// Set element-only content with the given top-level particle
    pub fn with_particle(mut self, particle: Particle) -> Self {
        self.content_type = ContentType::ElementOnly;
        self.particle = Some(particle);
        self
    }

    /// Set the content type without touching the particle
    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    /// Add an attribute use
    pub fn with_attribute(mut self, attribute_use: AttributeUse) -> Self {
        self.attribute_uses.push(attribute_use);
        self
    }

    /// Check if the type is anonymous
    pub fn is_anonymous(&self) -> bool {
        self.name.is_none()
    }

    /// Find an attribute use by name
    pub fn attribute_use(&self, name: &QName) -> Option<&AttributeUse> {
        find_attribute_use(&self.attribute_uses, name)
    }

    /// Read-only shape view used by the property type checks
    pub fn shape(&self) -> ComplexTypeShape<'_> {
        ComplexTypeShape {
            content_type: self.content_type,
            top_particle: self.particle.as_ref(),
            attribute_uses: &self.attribute_uses,
        }
    }
}

/// Derived view of a complex type definition
#[derive(Debug, Clone, Copy)]
pub struct ComplexTypeShape<'a> {
    /// Content kind
    pub content_type: ContentType,
    /// Top-level particle
    pub top_particle: Option<&'a Particle>,
    /// Attribute uses
    pub attribute_uses: &'a [AttributeUse],
}

impl<'a> ComplexTypeShape<'a> {
    /// Check whether an attribute use with the given name exists
    pub fn has_attribute(&self, name: &QName) -> bool {
        find_attribute_use(self.attribute_uses, name).is_some()
    }

    /// Check whether the content is empty
    pub fn is_empty(&self) -> bool {
        self.content_type == ContentType::Empty
    }
}

/// A simple type definition
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleTypeDefinition {
    /// Type name (None for anonymous types)
    pub name: Option<QName>,
    /// Base type (None for built-in primitives)
    pub derivation: Option<Derivation>,
}

impl SimpleTypeDefinition {
    /// Create a named simple type
    pub fn new(name: QName) -> Self {
        Self {
            name: Some(name),
            derivation: None,
        }
    }
}

/// A type definition
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefinition {
    /// Simple type
    Simple(SimpleTypeDefinition),
    /// Complex type
    Complex(ComplexTypeDefinition),
}

impl TypeDefinition {
    /// Type name (None for anonymous types)
    pub fn name(&self) -> Option<&QName> {
        match self {
            TypeDefinition::Simple(st) => st.name.as_ref(),
            TypeDefinition::Complex(ct) => ct.name.as_ref(),
        }
    }

    /// Base type link
    pub fn derivation(&self) -> Option<Derivation> {
        match self {
            TypeDefinition::Simple(st) => st.derivation,
            TypeDefinition::Complex(ct) => ct.derivation,
        }
    }

    /// Check whether the type is abstract
    pub fn is_abstract(&self) -> bool {
        match self {
            TypeDefinition::Simple(_) => false,
            TypeDefinition::Complex(ct) => ct.abstract_type,
        }
    }

    /// Get as a complex type
    pub fn as_complex(&self) -> Option<&ComplexTypeDefinition> {
        match self {
            TypeDefinition::Complex(ct) => Some(ct),
            TypeDefinition::Simple(_) => None,
        }
    }

    /// Check if this is a complex type
    pub fn is_complex(&self) -> bool {
        matches!(self, TypeDefinition::Complex(_))
    }
}

impl From<ComplexTypeDefinition> for TypeDefinition {
    fn from(ct: ComplexTypeDefinition) -> Self {
        TypeDefinition::Complex(ct)
    }
}

impl From<SimpleTypeDefinition> for TypeDefinition {
    fn from(st: SimpleTypeDefinition) -> Self {
        TypeDefinition::Simple(st)
    }
}
