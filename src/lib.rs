//! # gml-conformance
//!
//! Conformance checks for GML 3.2 application schemas and geometry instances.
//!
//! The schema checks work on an already compiled schema model
//! ([`model::SchemaModel`]) and verify that property types, feature
//! declarations and collection members follow the GML encoding rules
//! (ISO 19136:2007, Annex A). The geometry checks work on geometries read from
//! a GML document and verify CRS references, coordinate dimensions, domains of
//! validity, envelope corners and curve segments.
//!
//! Every check returns a [`Report`]. Rule violations are reported, never
//! raised; an [`Error`] means the check could not be evaluated (an unknown
//! component name, or a model that was never schema-valid).
//!
//! ## Example
//!
//! ```rust
//! use gml_conformance::geometry::{CrsRegistry, CrsResolver, GeometryChecker, GeometryInstance, GeometryValue};
//!
//! let crs = CrsRegistry::with_well_known().resolve("EPSG:4326").unwrap();
//! let envelope = GeometryInstance::new(GeometryValue::Envelope {
//!     lower: [10.0, 10.0].into(),
//!     upper: [5.0, 20.0].into(),
//! })
//! .with_crs(crs);
//!
//! let report = GeometryChecker::default().check_envelope_ordering(&envelope).unwrap();
//! assert!(report.has("InvalidEnvelopeOrdering"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod namespaces;
pub mod settings;
pub mod diagnostics;

// Schema components
pub mod model;
pub mod index;
pub mod filters;

// Checks
pub mod checks;
pub mod geometry;

// Re-exports for convenience
pub use checks::{FeatureComponentChecker, PropertyTypeChecker};
pub use diagnostics::{Report, Verdict, Violation, ViolationKind};
pub use error::{Error, Result};
pub use index::SchemaModelIndex;
pub use namespaces::{GmlVersion, QName};
pub use settings::CheckSettings;

/// Version of the gml-conformance library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
