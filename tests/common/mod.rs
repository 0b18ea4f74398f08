//! Shared schema fixtures: a cut-down GML 3.2 core plus a small fleet
//! application schema
#![allow(dead_code)]

use gml_conformance::model::{
    AttributeUse, ComplexTypeDefinition, DerivationMethod, ElementDeclaration, ElementId,
    ModelGroup, Particle, SchemaModel, TypeId,
};
use gml_conformance::namespaces::{gml32, QName};

pub const APP_NS: &str = "http://example.org/ns1";

pub fn app(local_name: &str) -> QName {
    QName::namespaced(APP_NS, local_name)
}

/// Identifiers of the GML core components
pub struct GmlCore {
    pub gml_type: TypeId,
    pub feature_type: TypeId,
    pub feature_member_type: TypeId,
    pub member_type: TypeId,
    pub metadata_type: TypeId,
    pub abstract_gml: ElementId,
    pub abstract_feature: ElementId,
    pub envelope: ElementId,
    pub point: ElementId,
}

fn abstract_gml_type(name: &str, base: Option<TypeId>) -> ComplexTypeDefinition {
    let ct = ComplexTypeDefinition::new(QName::gml(name)).abstract_type();
    match base {
        Some(base) => ct.derived_from(base, DerivationMethod::Extension),
        None => ct,
    }
}

fn href() -> AttributeUse {
    AttributeUse::optional(QName::xlink_href())
}

/// Add the GML core components the checks look up by name
pub fn gml_core(model: &mut SchemaModel) -> GmlCore {
    let gml_type = model.add_type(abstract_gml_type(gml32::ABSTRACT_GML_TYPE, None));
    let feature_type = model.add_type(abstract_gml_type(gml32::ABSTRACT_FEATURE_TYPE, Some(gml_type)));
    let feature_member_type = model.add_type(abstract_gml_type(gml32::FEATURE_MEMBER_TYPE, None));
    let member_type = model.add_type(abstract_gml_type(gml32::MEMBER_PROP_TYPE, None));
    let metadata_type = model.add_type(abstract_gml_type(gml32::MD_PROP_TYPE, None));
    let envelope_type = model.add_type(ComplexTypeDefinition::new(QName::gml("EnvelopeType")));
    let point_type = model.add_type(
        ComplexTypeDefinition::new(QName::gml("PointType"))
            .derived_from(gml_type, DerivationMethod::Extension),
    );

    let abstract_gml = model.add_element(
        ElementDeclaration::global(QName::gml(gml32::ABSTRACT_GML), gml_type).abstract_element(),
    );
    let abstract_feature = model.add_element(
        ElementDeclaration::global(QName::gml(gml32::ABSTRACT_FEATURE), feature_type)
            .abstract_element()
            .substitutes(abstract_gml),
    );
    let envelope = model.add_element(ElementDeclaration::global(QName::gml(gml32::ENVELOPE), envelope_type));
    let point = model.add_element(
        ElementDeclaration::global(QName::gml(gml32::POINT), point_type).substitutes(abstract_gml),
    );

    GmlCore {
        gml_type,
        feature_type,
        feature_member_type,
        member_type,
        metadata_type,
        abstract_gml,
        abstract_feature,
        envelope,
        point,
    }
}

/// The fleet application schema built over the GML core
pub struct Fleet {
    pub model: SchemaModel,
    pub core: GmlCore,
    pub vehicle: ElementId,
    pub fleet: ElementId,
    pub rogue: Option<ElementId>,
    pub member: ElementId,
    pub bad_member: Option<ElementId>,
    pub metadata: ElementId,
    pub objects: ElementId,
    pub member_property_type: TypeId,
}

/// Build the fleet schema. With `defects`, it also declares a feature outside
/// the feature substitution group and a member property whose value is
/// gml:Envelope.
pub fn fleet_schema(defects: bool) -> Fleet {
    let mut model = SchemaModel::new();
    let core = gml_core(&mut model);

    // vehicle feature with a metadata property that has no value
    let metadata_property_type = model.add_type(
        ComplexTypeDefinition::new(app("VehicleMetadataPropertyType"))
            .derived_from(core.metadata_type, DerivationMethod::Extension)
            .with_attribute(href()),
    );
    let vehicle_type = model.add_type(
        ComplexTypeDefinition::new(app("VehicleType"))
            .derived_from(core.feature_type, DerivationMethod::Extension),
    );
    let metadata = model.add_element(ElementDeclaration::local(
        app("metadata"),
        metadata_property_type,
        vehicle_type,
    ));
    if let Some(ct) = model.complex_type_mut(vehicle_type) {
        *ct = ct.clone().with_particle(Particle::group(ModelGroup::sequence(vec![
            Particle::element(metadata),
        ])));
    }
    let vehicle = model.add_element(
        ElementDeclaration::global(app("Vehicle"), vehicle_type).substitutes(core.abstract_feature),
    );

    // feature member property
    let member_property_type = model.add_type(
        ComplexTypeDefinition::new(app("VehicleMemberType"))
            .derived_from(core.feature_member_type, DerivationMethod::Extension)
            .with_particle(Particle::group(ModelGroup::sequence(vec![Particle::element(vehicle)])))
            .with_attribute(href()),
    );
    // object member property
    let object_property_type = model.add_type(
        ComplexTypeDefinition::new(app("ObjectMemberType"))
            .derived_from(core.member_type, DerivationMethod::Extension)
            .with_particle(Particle::group(ModelGroup::sequence(vec![Particle::group(
                ModelGroup::choice(vec![Particle::element(core.point), Particle::element(vehicle)]),
            )])))
            .with_attribute(href()),
    );
    let bad_member_type = defects.then(|| {
        model.add_type(
            ComplexTypeDefinition::new(app("EnvelopeMemberType"))
                .derived_from(core.feature_member_type, DerivationMethod::Extension)
                .with_particle(Particle::group(ModelGroup::sequence(vec![Particle::group(
                    ModelGroup::choice(vec![Particle::element(core.envelope)]),
                )])))
                .with_attribute(href()),
        )
    });

    // fleet feature collecting vehicles and other objects
    let fleet_type = model.add_type(
        ComplexTypeDefinition::new(app("FleetType"))
            .derived_from(core.feature_type, DerivationMethod::Extension),
    );
    let member = model.add_element(ElementDeclaration::local(app("member"), member_property_type, fleet_type));
    let objects = model.add_element(ElementDeclaration::local(app("objects"), object_property_type, fleet_type));
    let bad_member = bad_member_type.map(|t| {
        model.add_element(ElementDeclaration::local(app("boundary"), t, fleet_type))
    });
    let mut particles = vec![Particle::element(member), Particle::element(objects)];
    if let Some(bad) = bad_member {
        particles.push(Particle::element(bad));
    }
    if let Some(ct) = model.complex_type_mut(fleet_type) {
        *ct = ct.clone().with_particle(Particle::group(ModelGroup::sequence(particles)));
    }
    let fleet = model.add_element(
        ElementDeclaration::global(app("Fleet"), fleet_type).substitutes(core.abstract_feature),
    );

    let rogue = defects.then(|| {
        let rogue_type = model.add_type(
            ComplexTypeDefinition::new(app("RogueType"))
                .derived_from(core.feature_type, DerivationMethod::Extension),
        );
        model.add_element(ElementDeclaration::global(app("Rogue"), rogue_type))
    });

    Fleet {
        model,
        core,
        vehicle,
        fleet,
        rogue,
        member,
        bad_member,
        metadata,
        objects,
        member_property_type,
    }
}

/// A schema with the GML core and one global element that is not a feature
pub fn featureless_schema() -> (SchemaModel, GmlCore) {
    let mut model = SchemaModel::new();
    let core = gml_core(&mut model);
    let note_type = model.add_type(ComplexTypeDefinition::new(app("NoteType")));
    model.add_element(ElementDeclaration::global(app("Note"), note_type));
    (model, core)
}
