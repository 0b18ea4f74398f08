//! Feature, collection and metadata checks over the fleet schema

mod common;

use gml_conformance::namespaces::gml32;
use gml_conformance::{
    CheckSettings, FeatureComponentChecker, QName, SchemaModelIndex, Verdict, ViolationKind,
};
use pretty_assertions::assert_eq;

use common::{app, featureless_schema, fleet_schema};

#[test]
fn test_feature_definitions() {
    let fleet = fleet_schema(true);
    let index = SchemaModelIndex::new(&fleet.model);
    let checker = FeatureComponentChecker::new(&index);

    let mut names: Vec<String> = checker
        .feature_definitions()
        .into_iter()
        .map(|id| fleet.model.type_label(id))
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            app("FleetType").to_string(),
            app("RogueType").to_string(),
            app("VehicleType").to_string(),
        ]
    );
}

#[test]
fn test_feature_outside_substitution_group() {
    let fleet = fleet_schema(true);
    let index = SchemaModelIndex::new(&fleet.model);
    let checker = FeatureComponentChecker::new(&index);

    let report =
        checker.check_feature_substitution(&checker.feature_definitions(), fleet.core.abstract_feature);
    assert_eq!(report.violations().len(), 1);
    assert_eq!(
        report.violations()[0].kind,
        ViolationKind::SubstitutionError {
            element: app("Rogue"),
            head: "gml:AbstractFeature".to_string(),
        }
    );
}

#[test]
fn test_envelope_member_cannot_substitute_for_feature() {
    let fleet = fleet_schema(true);
    let index = SchemaModelIndex::new(&fleet.model);
    let checker = FeatureComponentChecker::new(&index);

    let report = checker
        .check_feature_collection_members(fleet.core.feature_member_type, fleet.core.abstract_feature)
        .unwrap();
    assert_eq!(report.violations().len(), 1);
    let violation = &report.violations()[0];
    assert_eq!(violation.subject, app("EnvelopeMemberType").to_string());
    assert_eq!(
        violation.kind,
        ViolationKind::DisallowedSubstitution {
            candidate: QName::gml(gml32::ENVELOPE),
            head: QName::gml(gml32::ABSTRACT_FEATURE),
        }
    );
}

#[test]
fn test_metadata_property_without_value() {
    let fleet = fleet_schema(false);
    let index = SchemaModelIndex::new(&fleet.model);
    let checker = FeatureComponentChecker::new(&index);

    let report = checker.check_metadata_properties(fleet.core.metadata_type).unwrap();
    let codes: Vec<_> = report.violations().iter().map(|v| v.code()).collect();
    assert_eq!(codes, vec!["MetadataValueUnspecified"]);
    assert_eq!(report.violations()[0].subject, app("metadata").to_string());
}

#[test]
fn test_object_collection_members_pass() {
    let fleet = fleet_schema(true);
    let index = SchemaModelIndex::new(&fleet.model);
    let checker = FeatureComponentChecker::new(&index);

    let report = checker
        .check_object_collection_members(fleet.core.member_type, fleet.core.abstract_gml)
        .unwrap();
    assert!(report.is_pass(), "{}", report);
}

#[test]
fn test_clean_schema_check_all() {
    let fleet = fleet_schema(false);
    let index = SchemaModelIndex::new(&fleet.model);
    let reports = FeatureComponentChecker::new(&index).check_all().unwrap();

    let verdicts: Vec<_> = reports.iter().map(|r| (r.check.as_str(), r.verdict())).collect();
    assert_eq!(
        verdicts,
        vec![
            ("feature substitution group", Verdict::Pass),
            ("feature collection members", Verdict::Pass),
            ("metadata properties", Verdict::Fail),
            ("object collection members", Verdict::Pass),
        ]
    );
}

#[test]
fn test_head_excluded_from_feature_members_on_request() {
    let mut fleet = fleet_schema(false);
    // value element of the member property becomes gml:AbstractFeature itself
    let head = fleet.core.abstract_feature;
    if let Some(ct) = fleet.model.complex_type_mut(fleet.member_property_type) {
        ct.particle = Some(gml_conformance::model::Particle::group(
            gml_conformance::model::ModelGroup::sequence(vec![
                gml_conformance::model::Particle::element(head),
            ]),
        ));
    }
    let index = SchemaModelIndex::new(&fleet.model);

    let default = FeatureComponentChecker::new(&index)
        .check_feature_collection_members(fleet.core.feature_member_type, head)
        .unwrap();
    assert!(default.is_pass());

    let settings = CheckSettings {
        include_head_for_feature_members: false,
        ..CheckSettings::default()
    };
    let excluded = FeatureComponentChecker::with_settings(&index, settings)
        .check_feature_collection_members(fleet.core.feature_member_type, head)
        .unwrap();
    assert!(excluded.has("DisallowedSubstitution"));
}

#[test]
fn test_no_feature_types_skips() {
    let (model, _) = featureless_schema();
    let index = SchemaModelIndex::new(&model);
    let reports = FeatureComponentChecker::new(&index).check_all().unwrap();

    assert_eq!(reports[0].verdict(), Verdict::Skip);
    assert_eq!(
        reports[0].skip_reason(),
        Some("No GML feature type definitions found in schema.")
    );
    assert_eq!(reports[1].verdict(), Verdict::Skip);
}

#[test]
fn test_missing_gml_components_is_not_found() {
    let model = gml_conformance::model::SchemaModel::new();
    let index = SchemaModelIndex::new(&model);
    let err = FeatureComponentChecker::new(&index).check_all().unwrap_err();
    assert!(matches!(err, gml_conformance::Error::NotFound { .. }));
}
