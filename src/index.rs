//! Query layer over a compiled schema model
//!
//! [`SchemaModelIndex`] answers the lookups the conformance checks need:
//! declarations by name, elements by declared type, substitution group
//! membership and the set of complex types reachable from global elements.
//! Derived indexes are computed on first use and owned by the index value,
//! so a fresh index per check run never sees stale results.

use indexmap::IndexSet;
use once_cell::unsync::OnceCell;
use std::collections::{HashMap, VecDeque};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::filters::TypeFilter;
use crate::model::{DerivationMethod, ElementId, ElementScope, SchemaModel, TypeDefinition, TypeId};
use crate::namespaces::QName;

/// Head element -> elements that name it as their substitution group
type SubstitutionMembers = HashMap<ElementId, Vec<ElementId>>;

/// Query layer over a [`SchemaModel`]
#[derive(Debug)]
pub struct SchemaModelIndex<'m> {
    model: &'m SchemaModel,
    substitution_members: OnceCell<SubstitutionMembers>,
    reachable_types: OnceCell<IndexSet<TypeId>>,
}

impl<'m> SchemaModelIndex<'m> {
    /// Create an index over the given model
    pub fn new(model: &'m SchemaModel) -> Self {
        Self {
            model,
            substitution_members: OnceCell::new(),
            reachable_types: OnceCell::new(),
        }
    }

    /// The underlying model
    pub fn model(&self) -> &'m SchemaModel {
        self.model
    }

    /// Resolve a global type definition by qualified name
    pub fn type_definition(&self, name: &QName) -> Result<TypeId> {
        self.model
            .global_type(name)
            .ok_or_else(|| Error::type_not_found(name))
    }

    /// Resolve a global element declaration by qualified name
    pub fn element_declaration(&self, name: &QName) -> Result<ElementId> {
        self.model
            .global_element(name)
            .ok_or_else(|| Error::element_not_found(name))
    }

    /// Check whether an element declared with `candidate` counts as typed by
    /// `target`: the same type, or any type derived from an abstract `target`.
    pub fn is_of_type(&self, candidate: TypeId, target: TypeId) -> bool {
        if candidate == target {
            return true;
        }
        let target_is_abstract = self
            .model
            .type_definition(target)
            .map(TypeDefinition::is_abstract)
            .unwrap_or(false);
        target_is_abstract && self.model.derives_from(candidate, target, None)
    }

    /// All global element declarations whose declared type is `type_id`
    pub fn global_elements_of_type(&self, type_id: TypeId) -> Vec<ElementId> {
        self.model
            .global_elements()
            .filter(|(_, decl)| self.is_of_type(decl.type_definition, type_id))
            .map(|(id, _)| id)
            .collect()
    }

    /// Local element declarations typed by `type_id`, found in the content
    /// models of the reachable complex types accepted by `container_filter`
    /// (all reachable complex types when no filter is given)
    pub fn local_elements_of_type(
        &self,
        type_id: TypeId,
        container_filter: Option<&dyn TypeFilter>,
    ) -> Vec<ElementId> {
        let mut found = IndexSet::new();
        for &container in self.reachable_complex_types() {
            if let Some(filter) = container_filter {
                if !filter.accept(self.model, container) {
                    continue;
                }
            }
            let particle = match self.model.complex_type(container) {
                Ok(ct) => match &ct.particle {
                    Some(particle) => particle,
                    None => continue,
                },
                Err(_) => continue,
            };
            particle.for_each_element(&mut |elem_id| {
                if let Ok(decl) = self.model.element(elem_id) {
                    if matches!(decl.scope, ElementScope::Local(_))
                        && self.is_of_type(decl.type_definition, type_id)
                    {
                        found.insert(elem_id);
                    }
                }
            });
        }
        found.into_iter().collect()
    }

    /// All element declarations (global and local) whose type derives by
    /// extension from `base`
    pub fn elements_derived_by_extension(&self, base: TypeId) -> Vec<ElementId> {
        self.model
            .elements()
            .filter(|(_, decl)| {
                self.model
                    .derives_from(decl.type_definition, base, Some(DerivationMethod::Extension))
            })
            .map(|(id, _)| id)
            .collect()
    }

    /// Every element declaration that may substitute for `head`, directly or
    /// transitively. The head itself is never included.
    pub fn substitutes_for(&self, head: ElementId) -> IndexSet<ElementId> {
        let members = self.substitution_members();
        let mut closure = IndexSet::new();
        let mut queue = VecDeque::from([head]);
        while let Some(current) = queue.pop_front() {
            if let Some(direct) = members.get(&current) {
                for &member in direct {
                    if member != head && closure.insert(member) {
                        queue.push_back(member);
                    }
                }
            }
        }
        trace!(head = %self.model.element_name(head), members = closure.len(), "substitution closure");
        closure
    }

    /// Complex types used by global element declarations, plus the types of
    /// every element nested in their content models, transitively
    pub fn reachable_complex_types(&self) -> &IndexSet<TypeId> {
        self.reachable_types.get_or_init(|| {
            let mut reachable = IndexSet::new();
            let mut queue: VecDeque<TypeId> = self
                .model
                .global_elements()
                .map(|(_, decl)| decl.type_definition)
                .collect();
            while let Some(type_id) = queue.pop_front() {
                let ct = match self.model.complex_type(type_id) {
                    Ok(ct) => ct,
                    Err(_) => continue,
                };
                if !reachable.insert(type_id) {
                    continue;
                }
                if let Some(particle) = &ct.particle {
                    particle.for_each_element(&mut |elem_id| {
                        if let Ok(decl) = self.model.element(elem_id) {
                            queue.push_back(decl.type_definition);
                        }
                    });
                }
            }
            debug!(count = reachable.len(), "collected reachable complex types");
            reachable
        })
    }

    fn substitution_members(&self) -> &SubstitutionMembers {
        self.substitution_members.get_or_init(|| {
            let mut members: SubstitutionMembers = HashMap::new();
            for (id, decl) in self.model.elements() {
                if let Some(head) = decl.substitution_group {
                    members.entry(head).or_default().push(id);
                }
            }
            debug!(heads = members.len(), "built substitution group index");
            members
        })
    }
}
