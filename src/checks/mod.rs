//! Schema conformance checks
//!
//! Checks over a compiled application schema: property type content models,
//! feature substitution groups, and the member and metadata properties of
//! collections.

pub mod features;
pub mod property_types;

pub use features::FeatureComponentChecker;
pub use property_types::PropertyTypeChecker;
