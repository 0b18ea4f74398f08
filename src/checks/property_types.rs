//! Property type content model checks
//!
//! A GML property type associates an object with a value, inline or by
//! reference. Its content model must take one of two shapes:
//!
//! - empty content with an `xlink:href` attribute (by reference only), or
//! - a sequence holding exactly one particle, which is either the value
//!   element or a choice between value elements.
//!
//! A property whose value may be absent (minOccurs = 0) must still allow a
//! reference, an array property (maxOccurs > 1) must not, and wildcards are
//! never allowed. When a substitution head is given, every value element must
//! be able to substitute for it.
//!
//! Sources: ISO 19136:2007, cl. 7.2.3 and A.1.1.8.

use indexmap::IndexSet;
use tracing::debug;

use crate::diagnostics::{Report, ViolationKind};
use crate::error::{Error, PreconditionError, Result};
use crate::index::SchemaModelIndex;
use crate::model::{
    ComplexTypeDefinition, Compositor, ContentType, ElementId, Particle, Term, TypeId,
};
use crate::namespaces::QName;

/// Checks complex types used as property types
#[derive(Debug, Clone, Copy)]
pub struct PropertyTypeChecker<'a, 'm> {
    index: &'a SchemaModelIndex<'m>,
}

/// Allowed value elements for one property, computed on first use
struct Substitution {
    head: Option<ElementId>,
    include_head: bool,
    allowed: Option<IndexSet<ElementId>>,
}

impl<'a, 'm> PropertyTypeChecker<'a, 'm> {
    /// Create a checker over the given index
    pub fn new(index: &'a SchemaModelIndex<'m>) -> Self {
        Self { index }
    }

    /// Check the type of a property element declaration. Anonymous types are
    /// reported under the element name.
    pub fn check_property_element(
        &self,
        property: ElementId,
        head: Option<ElementId>,
        include_head: bool,
    ) -> Result<Report> {
        let model = self.index.model();
        let decl = model.element(property)?;
        let type_def = model.type_definition(decl.type_definition)?;
        let subject = match type_def.name() {
            Some(name) => name.to_string(),
            None => decl.name.to_string(),
        };
        let ct = type_def.as_complex().ok_or_else(|| {
            Error::Precondition(
                PreconditionError::new("property element must have a complex type")
                    .with_component(model.element_ref(property).to_string()),
            )
        })?;
        self.check_definition(&subject, ct, head, include_head)
    }

    /// Check a complex type definition used as a property type
    pub fn check_property_type(
        &self,
        type_id: TypeId,
        head: Option<ElementId>,
        include_head: bool,
    ) -> Result<Report> {
        let model = self.index.model();
        let ct = model.complex_type(type_id)?;
        self.check_definition(&model.type_label(type_id), ct, head, include_head)
    }

    fn check_definition(
        &self,
        subject: &str,
        ct: &ComplexTypeDefinition,
        head: Option<ElementId>,
        include_head: bool,
    ) -> Result<Report> {
        let mut report = Report::new(format!("property type {}", subject));
        let mut substitution = Substitution {
            head,
            include_head,
            allowed: None,
        };
        self.check_shape(subject, ct, &mut substitution, &mut report)?;
        debug!(
            property = subject,
            violations = report.violations().len(),
            "checked property type"
        );
        Ok(report)
    }

    fn check_shape(
        &self,
        subject: &str,
        ct: &ComplexTypeDefinition,
        substitution: &mut Substitution,
        report: &mut Report,
    ) -> Result<()> {
        let shape = ct.shape();
        let href = QName::xlink_href();
        let has_href = shape.has_attribute(&href);

        match shape.content_type {
            ContentType::Empty => {
                if !has_href {
                    report.push(
                        ViolationKind::AttributeRequired {
                            attribute: href,
                            optional_value: false,
                        },
                        subject,
                    );
                }
                return Ok(());
            }
            ContentType::Simple => {
                report.push(ViolationKind::ModelGroupExpected, subject);
                report.mark_unchecked("value particle");
                return Ok(());
            }
            ContentType::ElementOnly | ContentType::Mixed => {}
        }

        let top = shape.top_particle.ok_or_else(|| {
            Error::Precondition(
                PreconditionError::new(format!(
                    "content type is {} but there is no top-level particle",
                    shape.content_type
                ))
                .with_component(subject),
            )
        })?;

        // may be empty, so a reference is required
        if top.occurs.is_emptiable() && !has_href {
            report.push(
                ViolationKind::AttributeRequired {
                    attribute: href.clone(),
                    optional_value: true,
                },
                subject,
            );
        }
        if top.occurs.is_multiple() && has_href {
            report.push(ViolationKind::AttributeProhibited { attribute: href }, subject);
        }

        let group = match &top.term {
            Term::ModelGroup(group) => group,
            Term::Element(_) | Term::Wildcard(_) => {
                report.push(ViolationKind::ModelGroupExpected, subject);
                report.mark_unchecked("value particle");
                return Ok(());
            }
        };
        if group.compositor != Compositor::Sequence {
            report.push(
                ViolationKind::SequenceExpected {
                    found: group.compositor,
                },
                subject,
            );
            report.mark_unchecked("value particle");
            return Ok(());
        }
        if group.len() != 1 {
            report.push(ViolationKind::TooManyParticles { count: group.len() }, subject);
            report.mark_unchecked("value particle");
            return Ok(());
        }

        let value = &group.particles[0];
        match &value.term {
            Term::Element(candidate) => {
                self.check_substitution(subject, *candidate, substitution, report);
            }
            Term::ModelGroup(choice) if choice.compositor == Compositor::Choice => {
                for branch in &choice.particles {
                    self.check_choice_branch(subject, branch, substitution, report);
                }
            }
            Term::ModelGroup(_) => {
                report.push(ViolationKind::WildcardOrGroupNotPermitted, subject);
            }
            Term::Wildcard(_) => {
                report.push(ViolationKind::WildcardNotPermitted, subject);
            }
        }
        Ok(())
    }

    fn check_choice_branch(
        &self,
        subject: &str,
        branch: &Particle,
        substitution: &mut Substitution,
        report: &mut Report,
    ) {
        match branch.term.as_element() {
            Some(candidate) => self.check_substitution(subject, candidate, substitution, report),
            None => report.push(ViolationKind::WildcardOrGroupNotPermitted, subject),
        }
    }

    fn check_substitution(
        &self,
        subject: &str,
        candidate: ElementId,
        substitution: &mut Substitution,
        report: &mut Report,
    ) {
        let head = match substitution.head {
            Some(head) => head,
            None => return,
        };
        let include_head = substitution.include_head;
        let allowed = substitution.allowed.get_or_insert_with(|| {
            let mut allowed = self.index.substitutes_for(head);
            if include_head {
                allowed.insert(head);
            }
            allowed
        });
        if !allowed.contains(&candidate) {
            let model = self.index.model();
            report.push(
                ViolationKind::DisallowedSubstitution {
                    candidate: model.element_name(candidate),
                    head: model.element_name(head),
                },
                subject,
            );
        }
    }
}
