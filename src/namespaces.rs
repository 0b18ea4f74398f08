//! XML namespace handling
//!
//! Qualified names for schema components and the namespaces and component
//! names the conformance checks refer to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// XML Namespace URI
pub type NamespaceUri = String;

/// GML 3.2 namespace
pub const GML_NAMESPACE: &str = "http://www.opengis.net/gml/3.2";

/// XLink namespace
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// XSD namespace
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// Qualified name (QName) - combination of namespace and local name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QName {
    /// Namespace URI (None for no namespace)
    pub namespace: Option<NamespaceUri>,
    /// Local name
    pub local_name: String,
}

impl QName {
    /// Create a new QName
    pub fn new(namespace: Option<impl Into<String>>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(|s| s.into()),
            local_name: local_name.into(),
        }
    }

    /// Create a QName without a namespace
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
        }
    }

    /// Create a QName with a namespace
    pub fn namespaced(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
        }
    }

    /// Create a QName in the GML 3.2 namespace
    pub fn gml(local_name: impl Into<String>) -> Self {
        Self::namespaced(GML_NAMESPACE, local_name)
    }

    /// The `{http://www.w3.org/1999/xlink}href` attribute name
    pub fn xlink_href() -> Self {
        Self::namespaced(XLINK_NAMESPACE, "href")
    }

    /// Check if this name is in the given namespace
    pub fn in_namespace(&self, namespace: &str) -> bool {
        self.namespace.as_deref() == Some(namespace)
    }

    /// Render with a conventional prefix for well-known namespaces
    /// (`gml:Point`, `xlink:href`); other names use `{ns}local`.
    pub fn prefixed(&self) -> String {
        match self.namespace.as_deref().and_then(well_known_prefix) {
            Some(prefix) => format!("{}:{}", prefix, self.local_name),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => write!(f, "{}", self.local_name),
        }
    }
}

fn well_known_prefix(namespace: &str) -> Option<&'static str> {
    match namespace {
        GML_NAMESPACE => Some("gml"),
        XLINK_NAMESPACE => Some("xlink"),
        XSD_NAMESPACE => Some("xs"),
        _ => None,
    }
}

/// Local names of GML 3.2 schema components used by the checks
pub mod gml32 {
    /// Head of the substitution group for all GML objects
    pub const ABSTRACT_GML: &str = "AbstractGML";
    /// Head of the substitution group for features
    pub const ABSTRACT_FEATURE: &str = "AbstractFeature";
    /// Base type of all GML object types
    pub const ABSTRACT_GML_TYPE: &str = "AbstractGMLType";
    /// Base type of all feature types
    pub const ABSTRACT_FEATURE_TYPE: &str = "AbstractFeatureType";
    /// Base type for feature collection member properties
    pub const FEATURE_MEMBER_TYPE: &str = "AbstractFeatureMemberType";
    /// Base type for object collection member properties
    pub const MEMBER_PROP_TYPE: &str = "AbstractMemberType";
    /// Base type for metadata properties
    pub const MD_PROP_TYPE: &str = "AbstractMetadataPropertyType";
    /// Point geometry element
    pub const POINT: &str = "Point";
    /// LineString geometry element
    pub const LINE_STRING: &str = "LineString";
    /// Curve geometry element
    pub const CURVE: &str = "Curve";
    /// Envelope element
    pub const ENVELOPE: &str = "Envelope";
}

/// GML version supported by the checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GmlVersion {
    /// Version 3.2.1
    #[default]
    #[serde(rename = "3.2.1")]
    V321,
    /// Version 3.2.2
    #[serde(rename = "3.2.2")]
    V322,
}

impl GmlVersion {
    /// Parse from a version string (case-insensitive)
    pub fn from_str(version: &str) -> Option<Self> {
        match version.trim().to_ascii_lowercase().as_str() {
            "3.2.1" => Some(Self::V321),
            "3.2.2" => Some(Self::V322),
            _ => None,
        }
    }

    /// Get the version string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V321 => "3.2.1",
            Self::V322 => "3.2.2",
        }
    }
}

impl fmt::Display for GmlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
