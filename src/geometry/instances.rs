//! Geometry instances checked by [`GeometryChecker`](super::GeometryChecker)

use std::fmt;
use std::sync::Arc;
use tracing::warn;

use super::crs::{CoordinateReferenceSystem, CrsResolver};
use super::positions::DirectPosition;

/// Curve segment interpolation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interpolation {
    /// Straight lines between positions (gml:LineStringSegment)
    Linear,
    /// Geodesics between positions (gml:GeodesicString)
    Geodesic,
    /// Circular arcs through each three positions (gml:Arc, gml:ArcString)
    CircularArc3Points,
    /// Cubic spline through the positions (gml:CubicSpline)
    CubicSpline,
    /// Any other segment type (gml:ArcByCenterPoint, gml:OffsetCurve,
    /// gml:BSpline, ...). Its positions are kept but not interpreted.
    Unsupported,
}

impl Interpolation {
    /// Parse from the gml:interpolation attribute value
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "linear" => Some(Self::Linear),
            "geodesic" => Some(Self::Geodesic),
            "circularArc3Points" => Some(Self::CircularArc3Points),
            "cubicSpline" => Some(Self::CubicSpline),
            _ => None,
        }
    }

    /// The gml:interpolation attribute value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Geodesic => "geodesic",
            Self::CircularArc3Points => "circularArc3Points",
            Self::CubicSpline => "cubicSpline",
            Self::Unsupported => "unsupported",
        }
    }

    /// Minimum number of positions a segment needs, if known
    pub fn minimum_positions(&self) -> Option<usize> {
        match self {
            Self::Linear | Self::Geodesic | Self::CubicSpline => Some(2),
            Self::CircularArc3Points => Some(3),
            Self::Unsupported => None,
        }
    }

    /// Check if the positions are control points joined end to end
    pub fn is_supported(&self) -> bool {
        *self != Self::Unsupported
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A maximal piece of a curve with a single interpolation method
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSegment {
    /// Interpolation method
    pub interpolation: Interpolation,
    /// Control positions in order
    pub positions: Vec<DirectPosition>,
}

impl CurveSegment {
    /// Create a segment
    pub fn new(interpolation: Interpolation, positions: Vec<DirectPosition>) -> Self {
        Self {
            interpolation,
            positions,
        }
    }

    /// Create a linear segment
    pub fn linear(positions: Vec<DirectPosition>) -> Self {
        Self::new(Interpolation::Linear, positions)
    }

    /// First position
    pub fn start(&self) -> Option<&DirectPosition> {
        self.positions.first()
    }

    /// Last position
    pub fn end(&self) -> Option<&DirectPosition> {
        self.positions.last()
    }
}

/// The geometric value of an instance
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryValue {
    /// A single position
    Point(DirectPosition),
    /// Vertices joined by straight lines
    LineString(Vec<DirectPosition>),
    /// Connected segments
    Curve(Vec<CurveSegment>),
    /// Axis-aligned bounding box
    Envelope {
        /// gml:lowerCorner
        lower: DirectPosition,
        /// gml:upperCorner
        upper: DirectPosition,
    },
}

impl GeometryValue {
    /// GML element name for this kind of geometry
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Point(_) => "Point",
            Self::LineString(_) => "LineString",
            Self::Curve(_) => "Curve",
            Self::Envelope { .. } => "Envelope",
        }
    }

    /// Every constituent position, in document order
    pub fn positions(&self) -> Vec<&DirectPosition> {
        match self {
            Self::Point(position) => vec![position],
            Self::LineString(positions) => positions.iter().collect(),
            Self::Curve(segments) => segments.iter().flat_map(|s| s.positions.iter()).collect(),
            Self::Envelope { lower, upper } => vec![lower, upper],
        }
    }
}

/// A geometry value together with its identity and CRS
#[derive(Debug, Clone)]
pub struct GeometryInstance {
    /// gml:id, if any
    pub id: Option<String>,
    /// srsName in effect for the geometry, possibly inherited
    pub srs_name: Option<String>,
    /// Resolved CRS; `None` when absent or unknown
    pub crs: Option<Arc<dyn CoordinateReferenceSystem>>,
    /// The geometric value
    pub value: GeometryValue,
}

impl GeometryInstance {
    /// Create an instance with no identity or CRS
    pub fn new(value: GeometryValue) -> Self {
        Self {
            id: None,
            srs_name: None,
            crs: None,
            value,
        }
    }

    /// Create an instance and resolve its srsName
    pub fn resolve(
        value: GeometryValue,
        srs_name: Option<String>,
        resolver: &dyn CrsResolver,
    ) -> Self {
        let crs = srs_name.as_deref().and_then(|name| resolver.resolve(name));
        if crs.is_none() {
            warn!(
                kind = value.kind(),
                srs_name = srs_name.as_deref().unwrap_or("none"),
                "could not resolve CRS"
            );
        }
        Self {
            id: None,
            srs_name,
            crs,
            value,
        }
    }

    /// Set the gml:id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the CRS, recording its identifier as the srsName
    pub fn with_crs(mut self, crs: Arc<dyn CoordinateReferenceSystem>) -> Self {
        self.srs_name = Some(crs.identifier().to_string());
        self.crs = Some(crs);
        self
    }

    /// Label used as the subject of violations, e.g. `Point[@gml:id='p1']`
    pub fn label(&self) -> String {
        match &self.id {
            Some(id) => format!("{}[@gml:id='{}']", self.value.kind(), id),
            None => self.value.kind().to_string(),
        }
    }
}
