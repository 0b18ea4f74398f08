//! XSD Model Groups
//!
//! - xs:sequence - ordered content
//! - xs:choice - alternative content
//! - xs:all - unordered content
//!
//! Reference: https://www.w3.org/TR/xmlschema11-1/#Model_Groups

use serde::Serialize;

use super::particles::Particle;

/// Model group compositor type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Compositor {
    /// Ordered sequence of particles
    #[default]
    Sequence,
    /// One of multiple alternatives
    Choice,
    /// Unordered set of particles
    All,
}

impl std::fmt::Display for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sequence => write!(f, "sequence"),
            Self::Choice => write!(f, "choice"),
            Self::All => write!(f, "all"),
        }
    }
}

/// A model group: a compositor over an ordered list of particles
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelGroup {
    /// Compositor
    pub compositor: Compositor,
    /// Child particles in declaration order
    pub particles: Vec<Particle>,
}

impl ModelGroup {
    /// Create a new model group
    pub fn new(compositor: Compositor, particles: Vec<Particle>) -> Self {
        Self {
            compositor,
            particles,
        }
    }

    /// Create a sequence
    pub fn sequence(particles: Vec<Particle>) -> Self {
        Self::new(Compositor::Sequence, particles)
    }

    /// Create a choice
    pub fn choice(particles: Vec<Particle>) -> Self {
        Self::new(Compositor::Choice, particles)
    }

    /// Number of child particles
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Check if the group has no particles
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compositor_display() {
        assert_eq!(Compositor::Sequence.to_string(), "sequence");
        assert_eq!(Compositor::Choice.to_string(), "choice");
    }
}
