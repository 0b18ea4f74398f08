//! Reading GML geometries from a parsed document
//!
//! Works on a `roxmltree` DOM. Geometry elements are located by qualified
//! name (gml:Point and the application elements in its substitution group,
//! say) and turned into [`GeometryInstance`] values with their CRS resolved.

use roxmltree::{Document, Node};
use tracing::{debug, warn};

use super::crs::CrsResolver;
use super::instances::{CurveSegment, GeometryInstance, GeometryValue, Interpolation};
use super::positions::DirectPosition;
use crate::error::{Error, Result};
use crate::index::SchemaModelIndex;
use crate::namespaces::{gml32, QName, GML_NAMESPACE};

const DEFAULT_DIMENSION: usize = 2;

fn has_name(node: Node<'_, '_>, name: &QName) -> bool {
    node.is_element()
        && node.tag_name().name() == name.local_name
        && node.tag_name().namespace() == name.namespace.as_deref()
}

fn is_gml(node: Node<'_, '_>, local_name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == local_name
        && node.tag_name().namespace() == Some(GML_NAMESPACE)
}

fn gml_child<'a, 'input>(node: Node<'a, 'input>, local_name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| is_gml(*child, local_name))
}

fn gml_children<'a, 'input>(
    node: Node<'a, 'input>,
    local_name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |child| is_gml(*child, local_name))
}

/// All elements in the document with one of the given names, in document order
pub fn find_geometry_elements<'a, 'input>(
    doc: &'a Document<'input>,
    names: &[QName],
) -> Vec<Node<'a, 'input>> {
    let found: Vec<_> = doc
        .descendants()
        .filter(|node| names.iter().any(|name| has_name(*node, name)))
        .collect();
    debug!(names = names.len(), found = found.len(), "located geometry elements");
    found
}

/// The head element name plus every element declared in its substitution
/// group. When the model does not declare the head, only the head is returned.
pub fn geometry_element_names(index: &SchemaModelIndex<'_>, head: &QName) -> Vec<QName> {
    let mut names = vec![head.clone()];
    if let Ok(head_id) = index.element_declaration(head) {
        let model = index.model();
        names.extend(
            index
                .substitutes_for(head_id)
                .into_iter()
                .map(|id| model.element_name(id)),
        );
    }
    names
}

/// Find the srsName in effect for a geometry element: on the element itself,
/// on its nearest ancestor that has one, or on the gml:boundedBy envelope of
/// an ancestor
pub fn find_crs_reference(node: Node<'_, '_>) -> Option<String> {
    let inherited = node
        .ancestors()
        .filter(|n| n.is_element())
        .find_map(|n| n.attribute("srsName"));
    if let Some(srs_name) = inherited {
        return Some(srs_name.to_string());
    }
    node.ancestors()
        .skip(1)
        .filter_map(|n| gml_child(n, "boundedBy"))
        .filter_map(|bounded_by| gml_child(bounded_by, gml32::ENVELOPE))
        .find_map(|envelope| envelope.attribute("srsName"))
        .map(str::to_string)
}

/// Builds geometry instances from DOM elements
pub struct GeometryReader<'r> {
    resolver: &'r dyn CrsResolver,
}

impl<'r> GeometryReader<'r> {
    /// Create a reader that resolves CRS references with `resolver`
    pub fn new(resolver: &'r dyn CrsResolver) -> Self {
        Self { resolver }
    }

    /// Read a geometry element. gml:Envelope uses only its own srsName;
    /// other geometries inherit one from their ancestors.
    pub fn read(&self, node: Node<'_, '_>) -> Result<GeometryInstance> {
        if !node.is_element() {
            return Err(Error::Geometry("not an element".to_string()));
        }
        let kind = geometry_kind(node)?;
        let srs_name = if kind == GeometryKind::Envelope {
            node.attribute("srsName").map(str::to_string)
        } else {
            find_crs_reference(node)
        };
        let crs = srs_name
            .as_deref()
            .and_then(|name| self.resolver.resolve(name));
        let dimension = node
            .attribute("srsDimension")
            .map(parse_dimension)
            .transpose()?
            .or_else(|| crs.as_ref().map(|crs| crs.dimension()))
            .unwrap_or(DEFAULT_DIMENSION);

        let value = match kind {
            GeometryKind::Point => {
                let pos = gml_child(node, "pos")
                    .ok_or_else(|| missing(node, "gml:pos"))?;
                GeometryValue::Point(parse_pos(pos)?)
            }
            GeometryKind::LineString => GeometryValue::LineString(read_positions(node, dimension)?),
            GeometryKind::Curve => {
                let segments = match gml_child(node, "segments") {
                    Some(segments) => segments
                        .children()
                        .filter(|n| n.is_element())
                        .map(|segment| read_segment(segment, dimension))
                        .collect::<Result<Vec<_>>>()?,
                    None => Vec::new(),
                };
                GeometryValue::Curve(segments)
            }
            GeometryKind::Envelope => {
                let lower = gml_child(node, "lowerCorner")
                    .ok_or_else(|| missing(node, "gml:lowerCorner"))?;
                let upper = gml_child(node, "upperCorner")
                    .ok_or_else(|| missing(node, "gml:upperCorner"))?;
                GeometryValue::Envelope {
                    lower: parse_pos(lower)?,
                    upper: parse_pos(upper)?,
                }
            }
        };

        let mut instance = GeometryInstance::resolve(value, srs_name, self.resolver);
        if let Some(id) = node.attribute((GML_NAMESPACE, "id")) {
            instance = instance.with_id(id);
        }
        Ok(instance)
    }

    /// Read every element in `nodes`, keeping going past unreadable ones
    pub fn read_all<'a, 'input>(
        &self,
        nodes: impl IntoIterator<Item = Node<'a, 'input>>,
    ) -> Vec<GeometryInstance>
    where
        'input: 'a,
    {
        nodes
            .into_iter()
            .filter_map(|node| match self.read(node) {
                Ok(instance) => Some(instance),
                Err(err) => {
                    warn!(element = node.tag_name().name(), error = %err, "skipping unreadable geometry");
                    None
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GeometryKind {
    Point,
    LineString,
    Curve,
    Envelope,
}

fn geometry_kind(node: Node<'_, '_>) -> Result<GeometryKind> {
    if node.tag_name().namespace() == Some(GML_NAMESPACE) {
        match node.tag_name().name() {
            gml32::POINT => return Ok(GeometryKind::Point),
            gml32::LINE_STRING => return Ok(GeometryKind::LineString),
            gml32::CURVE => return Ok(GeometryKind::Curve),
            gml32::ENVELOPE => return Ok(GeometryKind::Envelope),
            _ => {}
        }
    }
    // substitutes declared by application schemas keep the content model of the head
    if gml_child(node, "segments").is_some() {
        Ok(GeometryKind::Curve)
    } else if gml_child(node, "lowerCorner").is_some() {
        Ok(GeometryKind::Envelope)
    } else if gml_child(node, "posList").is_some() || gml_children(node, "pos").count() > 1 {
        Ok(GeometryKind::LineString)
    } else if gml_child(node, "pos").is_some() {
        Ok(GeometryKind::Point)
    } else {
        Err(Error::Geometry(format!(
            "unsupported geometry element: {}",
            node.tag_name().name()
        )))
    }
}

fn read_segment(segment: Node<'_, '_>, dimension: usize) -> Result<CurveSegment> {
    let by_name = match segment.tag_name().name() {
        "LineStringSegment" => Interpolation::Linear,
        "GeodesicString" | "Geodesic" => Interpolation::Geodesic,
        "Arc" | "ArcString" => Interpolation::CircularArc3Points,
        "CubicSpline" => Interpolation::CubicSpline,
        other => {
            debug!(segment = other, "segment interpolation not interpreted");
            Interpolation::Unsupported
        }
    };
    let interpolation = segment
        .attribute("interpolation")
        .and_then(Interpolation::from_str)
        .unwrap_or(by_name);
    let dimension = segment
        .attribute("srsDimension")
        .map(parse_dimension)
        .transpose()?
        .unwrap_or(dimension);
    Ok(CurveSegment::new(interpolation, read_positions(segment, dimension)?))
}

/// Positions from a gml:posList child, or from a sequence of gml:pos children
fn read_positions(node: Node<'_, '_>, dimension: usize) -> Result<Vec<DirectPosition>> {
    if let Some(pos_list) = gml_child(node, "posList") {
        let dimension = pos_list
            .attribute("srsDimension")
            .map(parse_dimension)
            .transpose()?
            .unwrap_or(dimension);
        return DirectPosition::parse_list(pos_list.text().unwrap_or(""), dimension);
    }
    gml_children(node, "pos").map(parse_pos).collect()
}

fn parse_pos(node: Node<'_, '_>) -> Result<DirectPosition> {
    DirectPosition::parse(node.text().unwrap_or(""))
}

fn parse_dimension(value: &str) -> Result<usize> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| Error::Geometry(format!("invalid srsDimension: '{}'", value)))
}

fn missing(node: Node<'_, '_>, child: &str) -> Error {
    Error::Geometry(format!("{} has no {}", node.tag_name().name(), child))
}
