//! Geometry instances and their conformance checks
//!
//! - [`positions`]: direct positions and their parsing
//! - [`crs`]: CRS handles, resolvers and the well-known registry
//! - [`identifiers`]: srsName normalization
//! - [`instances`]: points, line strings, curves and envelopes
//! - [`checks`]: the geometry checks
//! - [`gml`]: extraction from a parsed GML document

pub mod checks;
pub mod crs;
pub mod gml;
pub mod identifiers;
pub mod instances;
pub mod positions;

pub use checks::GeometryChecker;
pub use crs::{AxisExtent, BoundedCrs, CoordinateReferenceSystem, CrsRegistry, CrsResolver};
pub use gml::{find_crs_reference, find_geometry_elements, geometry_element_names, GeometryReader};
pub use identifiers::abbreviate_crs_identifier;
pub use instances::{CurveSegment, GeometryInstance, GeometryValue, Interpolation};
pub use positions::DirectPosition;
