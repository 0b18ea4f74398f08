//! Settings for conformance checks
//!
//! Caller-supplied policy that changes how geometry and feature checks are
//! evaluated. Settings are plain values passed into each checker; nothing is
//! read from the environment.

use serde::{Deserialize, Serialize};

use crate::error::{Error, PreconditionError, Result};

/// Check settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckSettings {
    /// Drop ordinates beyond the CRS dimension instead of reporting a
    /// dimension mismatch (e.g. a 3-tuple against a 2-D CRS)
    pub truncate_excess_ordinates: bool,

    /// Maximum per-ordinate difference for two positions to be equal when
    /// testing curve segment connectivity
    pub connectivity_tolerance: f64,

    /// Allow gml:AbstractFeature itself as the value of a feature member property
    pub include_head_for_feature_members: bool,
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            truncate_excess_ordinates: false,
            connectivity_tolerance: 1e-9,
            include_head_for_feature_members: true,
        }
    }
}

impl CheckSettings {
    /// Create settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict settings (no truncation, exact connectivity)
    pub fn strict() -> Self {
        Self {
            truncate_excess_ordinates: false,
            connectivity_tolerance: 0.0,
            include_head_for_feature_members: true,
        }
    }

    /// Create permissive settings (truncation on, looser connectivity)
    pub fn permissive() -> Self {
        Self {
            truncate_excess_ordinates: true,
            connectivity_tolerance: 1e-6,
            include_head_for_feature_members: true,
        }
    }

    /// Set the truncation policy
    pub fn with_truncation(mut self, truncate: bool) -> Self {
        self.truncate_excess_ordinates = truncate;
        self
    }

    /// Set the connectivity tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.connectivity_tolerance = tolerance;
        self
    }

    /// Read settings from a JSON document; missing fields take default values
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: CheckSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that the settings are usable
    pub fn validate(&self) -> Result<()> {
        if !self.connectivity_tolerance.is_finite() || self.connectivity_tolerance < 0.0 {
            return Err(Error::Precondition(PreconditionError::new(format!(
                "connectivity tolerance must be a finite non-negative number, got {}",
                self.connectivity_tolerance
            ))));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = CheckSettings::default();
        assert!(!settings.truncate_excess_ordinates);
        assert_eq!(settings.connectivity_tolerance, 1e-9);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_strict_and_permissive() {
        assert_eq!(CheckSettings::strict().connectivity_tolerance, 0.0);
        let permissive = CheckSettings::permissive();
        assert!(permissive.truncate_excess_ordinates);
        assert!(permissive.connectivity_tolerance > CheckSettings::default().connectivity_tolerance);
    }

    #[test]
    fn test_from_json_partial() {
        let settings = CheckSettings::from_json_str(r#"{"truncate_excess_ordinates": true}"#).unwrap();
        assert!(settings.truncate_excess_ordinates);
        assert_eq!(settings.connectivity_tolerance, 1e-9);
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let err = CheckSettings::from_json_str(r#"{"connectivity_tolerance": -1.0}"#).unwrap_err();
        assert!(err.is_precondition());
    }

    #[test]
    fn test_malformed_json() {
        let err = CheckSettings::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, Error::Settings(_)));
    }
}
