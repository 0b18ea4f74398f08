//! Property-based tests for the conformance checks
//!
//! These tests check invariants that must hold for every input, not just the
//! hand-written scenarios.

use gml_conformance::geometry::{
    abbreviate_crs_identifier, CurveSegment, DirectPosition, GeometryChecker, GeometryInstance,
    GeometryValue,
};
use gml_conformance::model::{
    AttributeUse, ComplexTypeDefinition, ElementDeclaration, ModelGroup, Occurs, Particle,
    SchemaModel,
};
use gml_conformance::{PropertyTypeChecker, QName, SchemaModelIndex};
use proptest::prelude::*;

/// Strategy for pairs of corner ordinates of the same dimension
fn corners_strategy() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (1usize..4).prop_flat_map(|dim| {
        (
            proptest::collection::vec(-1.0e6..1.0e6f64, dim),
            proptest::collection::vec(-1.0e6..1.0e6f64, dim),
        )
    })
}

/// Strategy for top-level particle occurrences that allow more than one value
fn multiple_occurs_strategy() -> impl Strategy<Value = Occurs> {
    (0u32..2, proptest::option::of(2u32..10)).prop_map(|(min, max)| Occurs::new(min, max))
}

/// Strategy for substitution group affiliations: element i names `heads[i]`
/// as its head, if any. Cycles are allowed.
fn affiliation_strategy() -> impl Strategy<Value = Vec<Option<usize>>> {
    (2usize..12).prop_flat_map(|n| proptest::collection::vec(proptest::option::of(0..n), n))
}

fn substitution_model(heads: &[Option<usize>]) -> SchemaModel {
    let mut model = SchemaModel::new();
    let t = model.add_type(ComplexTypeDefinition::new(QName::local("T")));
    let ids: Vec<_> = (0..heads.len())
        .map(|i| model.add_element(ElementDeclaration::global(QName::local(format!("E{}", i)), t)))
        .collect();
    for (i, head) in heads.iter().enumerate() {
        if let (Some(head), Some(decl)) = (head, model.element_mut(ids[i])) {
            decl.substitution_group = Some(ids[*head]);
        }
    }
    model
}

proptest! {
    #[test]
    fn envelope_ordering_passes_iff_strictly_ordered((lower, upper) in corners_strategy()) {
        let expected = lower.iter().zip(&upper).all(|(lo, hi)| lo < hi);
        let envelope = GeometryInstance::new(GeometryValue::Envelope {
            lower: lower.into(),
            upper: upper.into(),
        });
        let report = GeometryChecker::default().check_envelope_ordering(&envelope).unwrap();
        prop_assert_eq!(report.is_pass(), expected);
    }

    #[test]
    fn equal_corners_always_fail(corner in proptest::collection::vec(-1.0e6..1.0e6f64, 1..4)) {
        let envelope = GeometryInstance::new(GeometryValue::Envelope {
            lower: corner.clone().into(),
            upper: corner.into(),
        });
        let report = GeometryChecker::default().check_envelope_ordering(&envelope).unwrap();
        prop_assert!(report.has("InvalidEnvelopeOrdering"));
    }

    #[test]
    fn empty_property_passes_iff_href(href in any::<bool>(), required in any::<bool>()) {
        let mut model = SchemaModel::new();
        let mut ct = ComplexTypeDefinition::new(QName::local("RefType"));
        if href {
            let name = QName::xlink_href();
            ct = ct.with_attribute(if required {
                AttributeUse::required(name)
            } else {
                AttributeUse::optional(name)
            });
        }
        let t = model.add_type(ct);
        let index = SchemaModelIndex::new(&model);
        let report = PropertyTypeChecker::new(&index).check_property_type(t, None, false).unwrap();
        prop_assert_eq!(report.is_pass(), href);
    }

    #[test]
    fn array_property_with_href_fails(occurs in multiple_occurs_strategy()) {
        let mut model = SchemaModel::new();
        let value_type = model.add_type(ComplexTypeDefinition::new(QName::local("ValueType")));
        let value = model.add_element(ElementDeclaration::global(QName::local("Value"), value_type));
        let t = model.add_type(
            ComplexTypeDefinition::new(QName::local("ArrayPropertyType"))
                .with_particle(
                    Particle::group(ModelGroup::sequence(vec![Particle::element(value)]))
                        .with_occurs(occurs),
                )
                .with_attribute(AttributeUse::optional(QName::xlink_href())),
        );
        let index = SchemaModelIndex::new(&model);
        let report = PropertyTypeChecker::new(&index).check_property_type(t, None, false).unwrap();
        prop_assert!(report.has("AttributeProhibited"));
    }

    #[test]
    fn substitution_closure_is_transitive(heads in affiliation_strategy()) {
        let model = substitution_model(&heads);
        let index = SchemaModelIndex::new(&model);
        let elements: Vec<_> = model.elements().map(|(id, _)| id).collect();
        for &a in &elements {
            let of_a = index.substitutes_for(a);
            prop_assert!(!of_a.contains(&a));
            for &b in &of_a {
                for c in index.substitutes_for(b) {
                    prop_assert!(c == a || of_a.contains(&c));
                }
            }
        }
    }

    #[test]
    fn geometry_checks_are_idempotent(
        ordinates in proptest::collection::vec(-200.0..200.0f64, 2..12),
        split in 1usize..5,
    ) {
        let positions: Vec<DirectPosition> =
            ordinates.chunks_exact(2).map(DirectPosition::from).collect();
        let cut = split.min(positions.len());
        let curve = GeometryInstance::new(GeometryValue::Curve(vec![
            CurveSegment::linear(positions[..cut].to_vec()),
            CurveSegment::linear(positions[cut..].to_vec()),
        ]));
        let checker = GeometryChecker::default();
        let first = checker.check_all(&curve).unwrap();
        let second = checker.check_all(&curve).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn crs_abbreviation_is_idempotent(code in 1000u32..100000, form in 0usize..4) {
        let identifier = match form {
            0 => format!("urn:ogc:def:crs:EPSG::{}", code),
            1 => format!("http://www.opengis.net/def/crs/EPSG/0/{}", code),
            2 => format!("EPSG:{}", code),
            _ => format!("http://www.opengis.net/gml/srs/epsg.xml#{}", code),
        };
        let short = abbreviate_crs_identifier(&identifier);
        prop_assert_eq!(&short, &format!("EPSG:{}", code));
        prop_assert_eq!(abbreviate_crs_identifier(&short), short.clone());
    }
}
