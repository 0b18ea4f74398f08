//! Feature, feature collection, metadata and object collection checks
//!
//! Sources:
//! - ISO 19136:2007, cl. A.1.1.15: Substitution group of feature elements
//! - ISO 19136:2007, cl. 9.9 and A.1.1.16: GML feature collections
//! - ISO 19136:2007, cl. 7.2.6 and A.1.1.9: Metadata properties
//! - ISO 19136:2007, cl. 7.2.5 and A.1.1.14: GML object collections

use indexmap::IndexSet;
use tracing::debug;

use super::property_types::PropertyTypeChecker;
use crate::diagnostics::{Report, ViolationKind};
use crate::error::Result;
use crate::filters::{FeatureTypeFilter, GmlObjectTypeFilter, TypeFilter};
use crate::index::SchemaModelIndex;
use crate::model::{ContentType, ElementId, TypeId};
use crate::namespaces::{gml32, QName};
use crate::settings::CheckSettings;

/// Checks schema components that define features and collections
#[derive(Debug)]
pub struct FeatureComponentChecker<'a, 'm> {
    index: &'a SchemaModelIndex<'m>,
    settings: CheckSettings,
}

impl<'a, 'm> FeatureComponentChecker<'a, 'm> {
    /// Create a checker with default settings
    pub fn new(index: &'a SchemaModelIndex<'m>) -> Self {
        Self::with_settings(index, CheckSettings::default())
    }

    /// Create a checker with the given settings
    pub fn with_settings(index: &'a SchemaModelIndex<'m>, settings: CheckSettings) -> Self {
        Self { index, settings }
    }

    fn properties(&self) -> PropertyTypeChecker<'a, 'm> {
        PropertyTypeChecker::new(self.index)
    }

    /// Reachable complex types that denote features
    pub fn feature_definitions(&self) -> IndexSet<TypeId> {
        let mut types = self.index.reachable_complex_types().clone();
        FeatureTypeFilter.filter_set(self.index.model(), &mut types);
        types
    }

    /// Every global element declared with one of the feature types must
    /// substitute for the abstract feature head
    pub fn check_feature_substitution(
        &self,
        feature_types: &IndexSet<TypeId>,
        abstract_feature_head: ElementId,
    ) -> Report {
        let check = "feature substitution group";
        if feature_types.is_empty() {
            return Report::skipped(check, "No GML feature type definitions found in schema.");
        }
        let model = self.index.model();
        let head_name = model.element_name(abstract_feature_head).prefixed();
        let features = self.index.substitutes_for(abstract_feature_head);
        let mut report = Report::new(check);
        for &type_id in feature_types {
            for element in self.index.global_elements_of_type(type_id) {
                if !features.contains(&element) {
                    let name = model.element_name(element);
                    report.push(
                        ViolationKind::SubstitutionError {
                            element: name.clone(),
                            head: head_name.clone(),
                        },
                        name.to_string(),
                    );
                }
            }
        }
        debug!(
            feature_types = feature_types.len(),
            violations = report.violations().len(),
            "checked feature substitution"
        );
        report
    }

    /// Every property whose type derives by extension from `member_base_type`
    /// must be a valid property type whose value substitutes for the feature head
    pub fn check_feature_collection_members(
        &self,
        member_base_type: TypeId,
        abstract_feature_head: ElementId,
    ) -> Result<Report> {
        let mut report = Report::new("feature collection members");
        let include_head = self.settings.include_head_for_feature_members;
        for property in self.index.elements_derived_by_extension(member_base_type) {
            let result = self.properties().check_property_element(
                property,
                Some(abstract_feature_head),
                include_head,
            )?;
            report.merge(result);
        }
        Ok(report)
    }

    /// Metadata properties must be valid property types and may not have
    /// empty content, even though a reference is structurally permitted
    pub fn check_metadata_properties(&self, metadata_base_type: TypeId) -> Result<Report> {
        let model = self.index.model();
        let mut properties: IndexSet<ElementId> =
            self.index.global_elements_of_type(metadata_base_type).into_iter().collect();
        properties.extend(
            self.index
                .local_elements_of_type(metadata_base_type, Some(&GmlObjectTypeFilter)),
        );

        let mut report = Report::new("metadata properties");
        for property in properties {
            report.merge(self.properties().check_property_element(property, None, false)?);
            let decl = model.element(property)?;
            let content_type = model.complex_type(decl.type_definition)?.content_type;
            if content_type == ContentType::Empty {
                report.push(ViolationKind::MetadataValueUnspecified, decl.name.to_string());
            }
        }
        Ok(report)
    }

    /// Object collection member properties must be valid property types whose
    /// values substitute for the abstract object head
    pub fn check_object_collection_members(
        &self,
        member_base_type: TypeId,
        abstract_object_head: ElementId,
    ) -> Result<Report> {
        let mut properties: IndexSet<ElementId> =
            self.index.global_elements_of_type(member_base_type).into_iter().collect();
        properties.extend(self.index.local_elements_of_type(member_base_type, None));

        let mut report = Report::new("object collection members");
        for property in properties {
            report.merge(self.properties().check_property_element(
                property,
                Some(abstract_object_head),
                false,
            )?);
        }
        Ok(report)
    }

    /// Run every feature and collection check against the GML 3.2 components
    /// of the model
    pub fn check_all(&self) -> Result<Vec<Report>> {
        let index = self.index;
        let abstract_feature = index.element_declaration(&QName::gml(gml32::ABSTRACT_FEATURE))?;
        let abstract_gml = index.element_declaration(&QName::gml(gml32::ABSTRACT_GML))?;
        let feature_member = index.type_definition(&QName::gml(gml32::FEATURE_MEMBER_TYPE))?;
        let metadata_property = index.type_definition(&QName::gml(gml32::MD_PROP_TYPE))?;
        let object_member = index.type_definition(&QName::gml(gml32::MEMBER_PROP_TYPE))?;

        let feature_types = self.feature_definitions();
        let mut reports = vec![self.check_feature_substitution(&feature_types, abstract_feature)];
        if feature_types.is_empty() {
            reports.push(Report::skipped(
                "feature collection members",
                "No GML feature type definitions found in schema.",
            ));
        } else {
            reports.push(self.check_feature_collection_members(feature_member, abstract_feature)?);
        }
        reports.push(self.check_metadata_properties(metadata_property)?);
        reports.push(self.check_object_collection_members(object_member, abstract_gml)?);
        Ok(reports)
    }
}
