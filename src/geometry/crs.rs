//! Coordinate reference systems
//!
//! A CRS handle exposes what the geometry checks need: its dimension and a
//! domain-of-validity containment test. Resolution from an `srsName` goes
//! through a [`CrsResolver`]; an identifier that does not resolve is reported
//! as an unknown CRS by the checks, never raised as an error.

use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

use super::identifiers::abbreviate_crs_identifier;
use super::positions::DirectPosition;

/// A resolved coordinate reference system
pub trait CoordinateReferenceSystem: fmt::Debug + Send + Sync {
    /// Abbreviated identifier (e.g. `EPSG:4326`)
    fn identifier(&self) -> &str;

    /// Number of coordinate system axes
    fn dimension(&self) -> usize;

    /// Check whether the position lies within the domain of validity
    fn contains(&self, position: &DirectPosition) -> bool;

    /// Human-readable description of the domain of validity
    fn area_description(&self) -> String;
}

/// Resolves `srsName` values to CRS handles
pub trait CrsResolver {
    /// Resolve an identifier; `None` means the CRS is unknown
    fn resolve(&self, srs_name: &str) -> Option<Arc<dyn CoordinateReferenceSystem>>;
}

/// Valid range of one coordinate system axis
#[derive(Debug, Clone, PartialEq)]
pub struct AxisExtent {
    /// Axis name
    pub name: String,
    /// Smallest valid value
    pub minimum: f64,
    /// Largest valid value
    pub maximum: f64,
}

impl AxisExtent {
    /// Create a bounded axis
    pub fn new(name: impl Into<String>, minimum: f64, maximum: f64) -> Self {
        Self {
            name: name.into(),
            minimum,
            maximum,
        }
    }

    /// Create an axis without bounds
    pub fn unbounded(name: impl Into<String>) -> Self {
        Self::new(name, f64::NEG_INFINITY, f64::INFINITY)
    }

    fn contains(&self, value: f64) -> bool {
        value >= self.minimum && value <= self.maximum
    }
}

/// A CRS whose domain of validity is a box over its axes, in axis order
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedCrs {
    identifier: String,
    axes: Vec<AxisExtent>,
}

impl BoundedCrs {
    /// Create a CRS from its identifier and axes
    pub fn new(identifier: impl Into<String>, axes: Vec<AxisExtent>) -> Self {
        Self {
            identifier: identifier.into(),
            axes,
        }
    }

    /// The axes in coordinate order
    pub fn axes(&self) -> &[AxisExtent] {
        &self.axes
    }
}

impl CoordinateReferenceSystem for BoundedCrs {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn dimension(&self) -> usize {
        self.axes.len()
    }

    fn contains(&self, position: &DirectPosition) -> bool {
        position.dimension() == self.axes.len()
            && self
                .axes
                .iter()
                .zip(position.ordinates())
                .all(|(axis, &value)| axis.contains(value))
    }

    fn area_description(&self) -> String {
        let ranges: Vec<String> = self
            .axes
            .iter()
            .filter(|axis| axis.minimum.is_finite() || axis.maximum.is_finite())
            .map(|axis| format!("{} [{}, {}]", axis.name, axis.minimum, axis.maximum))
            .collect();
        format!("{} ({})", self.identifier, ranges.join(", "))
    }
}

/// In-memory CRS resolver keyed by abbreviated identifier
#[derive(Debug, Clone, Default)]
pub struct CrsRegistry {
    entries: IndexMap<String, Arc<dyn CoordinateReferenceSystem>>,
}

impl CrsRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the commonly used geographic and projected CRSs:
    /// EPSG:4326 and EPSG:4979 (latitude first), CRS:84 (longitude first) and
    /// EPSG:3857
    pub fn with_well_known() -> Self {
        let mut registry = Self::new();
        registry.register(BoundedCrs::new(
            "EPSG:4326",
            vec![
                AxisExtent::new("latitude", -90.0, 90.0),
                AxisExtent::new("longitude", -180.0, 180.0),
            ],
        ));
        registry.register(BoundedCrs::new(
            "EPSG:4979",
            vec![
                AxisExtent::new("latitude", -90.0, 90.0),
                AxisExtent::new("longitude", -180.0, 180.0),
                AxisExtent::unbounded("ellipsoidal height"),
            ],
        ));
        registry.register(BoundedCrs::new(
            "CRS:84",
            vec![
                AxisExtent::new("longitude", -180.0, 180.0),
                AxisExtent::new("latitude", -90.0, 90.0),
            ],
        ));
        registry.register(BoundedCrs::new(
            "EPSG:3857",
            vec![
                AxisExtent::new("easting", -20037508.34, 20037508.34),
                AxisExtent::new("northing", -20048966.1, 20048966.1),
            ],
        ));
        registry
    }

    /// Register a CRS under its abbreviated identifier, replacing any previous entry
    pub fn register(&mut self, crs: impl CoordinateReferenceSystem + 'static) {
        let key = abbreviate_crs_identifier(crs.identifier());
        self.entries.insert(key, Arc::new(crs));
    }

    /// Number of registered CRSs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no CRS is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CrsResolver for CrsRegistry {
    fn resolve(&self, srs_name: &str) -> Option<Arc<dyn CoordinateReferenceSystem>> {
        self.entries
            .get(&abbreviate_crs_identifier(srs_name))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_equivalent_identifiers() {
        let registry = CrsRegistry::with_well_known();
        assert_eq!(registry.len(), 4);
        let crs = registry
            .resolve("http://www.opengis.net/def/crs/EPSG/0/4326")
            .unwrap();
        assert_eq!(crs.identifier(), "EPSG:4326");
        assert_eq!(crs.dimension(), 2);
        assert!(registry.resolve("urn:ogc:def:crs:EPSG::4979").is_some());
        assert!(registry.resolve("EPSG:99999").is_none());
    }

    #[test]
    fn test_axis_order_matters() {
        let registry = CrsRegistry::with_well_known();
        let lat_lon = registry.resolve("EPSG:4326").unwrap();
        let lon_lat = registry.resolve("CRS:84").unwrap();
        let position = DirectPosition::from([-122.22, 50.55]);
        assert!(!lat_lon.contains(&position));
        assert!(lon_lat.contains(&position));
    }

    #[test]
    fn test_contains_requires_every_axis() {
        let registry = CrsRegistry::with_well_known();
        let crs = registry.resolve("EPSG:4979").unwrap();
        assert!(crs.contains(&DirectPosition::from([45.0, 10.0, 8848.0])));
        assert!(!crs.contains(&DirectPosition::from([45.0, 10.0])));
    }

    #[test]
    fn test_contains_rejects_excess_ordinates() {
        let crs = CrsRegistry::with_well_known().resolve("EPSG:4326").unwrap();
        assert!(crs.contains(&DirectPosition::from([49.0, -123.0])));
        assert!(!crs.contains(&DirectPosition::from([49.0, -123.0, 9999.0])));
    }

    #[test]
    fn test_area_description_skips_unbounded_axes() {
        let crs = BoundedCrs::new(
            "EPSG:4979",
            vec![
                AxisExtent::new("latitude", -90.0, 90.0),
                AxisExtent::unbounded("ellipsoidal height"),
            ],
        );
        assert_eq!(crs.area_description(), "EPSG:4979 (latitude [-90, 90])");
    }
}
