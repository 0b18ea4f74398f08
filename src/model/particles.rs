//! XSD Particle Schema Components
//!
//! A particle pairs occurrence bounds (minOccurs, maxOccurs) with a term: an
//! element declaration, a model group, or a wildcard.
//!
//! Reference: https://www.w3.org/TR/xmlschema11-1/#p

use serde::Serialize;

use super::groups::ModelGroup;
use super::schema::ElementId;
use super::wildcards::Wildcard;

/// Occurrence bounds for a particle (minOccurs, maxOccurs)
/// None for max means unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Occurs {
    /// Minimum number of occurrences (default 1)
    pub min: u32,
    /// Maximum number of occurrences (None = unbounded, default 1)
    pub max: Option<u32>,
}

impl Occurs {
    /// Create new occurrence bounds
    pub fn new(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }

    /// Default occurrence (1, 1)
    pub fn once() -> Self {
        Self { min: 1, max: Some(1) }
    }

    /// Optional occurrence (0, 1)
    pub fn optional() -> Self {
        Self { min: 0, max: Some(1) }
    }

    /// Zero or more (0, unbounded)
    pub fn zero_or_more() -> Self {
        Self { min: 0, max: None }
    }

    /// One or more (1, unbounded)
    pub fn one_or_more() -> Self {
        Self { min: 1, max: None }
    }

    /// Check if this particle can be empty (minOccurs == 0)
    pub fn is_emptiable(&self) -> bool {
        self.min == 0
    }

    /// Check if particle allows more than one occurrence
    /// (maxOccurs unbounded or greater than 1)
    pub fn is_multiple(&self) -> bool {
        match self.max {
            Some(max) => max > 1,
            None => true,
        }
    }
}

impl Default for Occurs {
    fn default() -> Self {
        Self::once()
    }
}

/// The term of a particle
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// Element declaration (global reference or local declaration)
    Element(ElementId),
    /// Nested model group
    ModelGroup(ModelGroup),
    /// Wildcard (xs:any)
    Wildcard(Wildcard),
}

impl Term {
    /// Get the element declaration if this is an element term
    pub fn as_element(&self) -> Option<ElementId> {
        match self {
            Term::Element(id) => Some(*id),
            _ => None,
        }
    }
}

/// An occurrence-constrained term within a content model
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Occurrence constraints
    pub occurs: Occurs,
    /// The term
    pub term: Term,
}

impl Particle {
    /// Create a new particle
    pub fn new(occurs: Occurs, term: Term) -> Self {
        Self { occurs, term }
    }

    /// Element particle occurring exactly once
    pub fn element(id: ElementId) -> Self {
        Self::new(Occurs::once(), Term::Element(id))
    }

    /// Model group particle occurring exactly once
    pub fn group(group: ModelGroup) -> Self {
        Self::new(Occurs::once(), Term::ModelGroup(group))
    }

    /// Wildcard particle occurring exactly once
    pub fn wildcard(wildcard: Wildcard) -> Self {
        Self::new(Occurs::once(), Term::Wildcard(wildcard))
    }

    /// Replace the occurrence constraints
    pub fn with_occurs(mut self, occurs: Occurs) -> Self {
        self.occurs = occurs;
        self
    }

    /// Visit every element term in this particle, depth-first in document order
    pub fn for_each_element(&self, visit: &mut impl FnMut(ElementId)) {
        match &self.term {
            Term::Element(id) => visit(*id),
            Term::ModelGroup(group) => {
                for particle in &group.particles {
                    particle.for_each_element(visit);
                }
            }
            Term::Wildcard(_) => {}
        }
    }
}
