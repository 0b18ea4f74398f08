//! Type filters
//!
//! Predicates that decide which complex types denote GML features or GML
//! objects. Checks take a filter instead of hard-coding the rule so callers
//! can narrow the search space.

use indexmap::IndexSet;

use crate::model::{SchemaModel, TypeId};
use crate::namespaces::{gml32, QName, GML_NAMESPACE};

/// A predicate over type definitions
pub trait TypeFilter {
    /// Check whether the type is accepted
    fn accept(&self, model: &SchemaModel, type_id: TypeId) -> bool;

    /// Retain only the accepted members of a set of types
    fn filter_set(&self, model: &SchemaModel, types: &mut IndexSet<TypeId>) {
        types.retain(|&type_id| self.accept(model, type_id));
    }
}

impl<F> TypeFilter for F
where
    F: Fn(&SchemaModel, TypeId) -> bool,
{
    fn accept(&self, model: &SchemaModel, type_id: TypeId) -> bool {
        self(model, type_id)
    }
}

fn derives_from_gml(model: &SchemaModel, type_id: TypeId, base_name: &str) -> bool {
    match model.global_type(&QName::gml(base_name)) {
        Some(base) => model.derives_from(type_id, base, None),
        None => false,
    }
}

/// Accepts application types that derive from gml:AbstractFeatureType
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureTypeFilter;

impl TypeFilter for FeatureTypeFilter {
    fn accept(&self, model: &SchemaModel, type_id: TypeId) -> bool {
        let in_gml = model
            .type_definition(type_id)
            .ok()
            .and_then(|def| def.name())
            .map(|name| name.in_namespace(GML_NAMESPACE))
            .unwrap_or(false);
        !in_gml && derives_from_gml(model, type_id, gml32::ABSTRACT_FEATURE_TYPE)
    }
}

/// Accepts types that derive from gml:AbstractGMLType
#[derive(Debug, Clone, Copy, Default)]
pub struct GmlObjectTypeFilter;

impl TypeFilter for GmlObjectTypeFilter {
    fn accept(&self, model: &SchemaModel, type_id: TypeId) -> bool {
        derives_from_gml(model, type_id, gml32::ABSTRACT_GML_TYPE)
    }
}
