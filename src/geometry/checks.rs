//! Geometry conformance checks
//!
//! Each check evaluates one predicate over a [`GeometryInstance`] and returns a
//! [`Report`]. Handing a check a geometry of the wrong kind (an envelope to the
//! curve connectivity check, say) is a precondition error, not a violation.
//!
//! Sources:
//! - ISO 19136:2007, cl. 9.10 and 10.1.3.2: CRS association
//! - ISO 19136:2007, cl. 10.1.4.1 and 10.3: Point, LineString
//! - ISO 19136:2007, cl. 10.4.5 to 10.4.12: Curve and curve segments
//! - ISO 19136:2007, cl. 10.1.4.6: Envelope

use tracing::{debug, trace};

use super::crs::CoordinateReferenceSystem;
use super::instances::{GeometryInstance, GeometryValue};
use super::positions::DirectPosition;
use crate::diagnostics::{Report, ViolationKind};
use crate::error::{Error, PreconditionError, Result};
use crate::settings::CheckSettings;

const LINE_STRING_MINIMUM_POSITIONS: usize = 2;

/// Runs geometry checks under a set of [`CheckSettings`]
#[derive(Debug, Clone, Default)]
pub struct GeometryChecker {
    settings: CheckSettings,
}

fn wrong_kind(instance: &GeometryInstance, expected: &str) -> Error {
    Error::Precondition(
        PreconditionError::new(format!(
            "expected {}, found {}",
            expected,
            instance.value.kind()
        ))
        .with_component(instance.label()),
    )
}

impl GeometryChecker {
    /// Create a checker with the given settings
    pub fn new(settings: CheckSettings) -> Self {
        Self { settings }
    }

    /// The settings in effect
    pub fn settings(&self) -> &CheckSettings {
        &self.settings
    }

    /// The geometry must have a resolvable CRS reference
    pub fn check_has_crs(&self, instance: &GeometryInstance) -> Report {
        let mut report = Report::new("CRS reference");
        if instance.crs.is_none() {
            report.push(
                ViolationKind::UnknownCrs {
                    srs_name: instance.srs_name.clone(),
                },
                instance.label(),
            );
        }
        report
    }

    /// The position must have as many ordinates as the CRS has axes. Excess
    /// ordinates are ignored when truncation is enabled.
    pub fn check_dimension_matches(
        &self,
        subject: &str,
        position: &DirectPosition,
        crs: &dyn CoordinateReferenceSystem,
    ) -> Report {
        let mut report = Report::new("coordinate dimension");
        self.dimension_matches(subject, None, position, crs, &mut report);
        report
    }

    fn dimension_matches(
        &self,
        subject: &str,
        index: Option<usize>,
        position: &DirectPosition,
        crs: &dyn CoordinateReferenceSystem,
        report: &mut Report,
    ) -> bool {
        let expected = crs.dimension();
        let actual = position.dimension();
        if actual == expected {
            return true;
        }
        if actual > expected && self.settings.truncate_excess_ordinates {
            debug!(subject, expected, actual, "ignoring excess ordinates");
            return true;
        }
        report.push(
            ViolationKind::CoordinateDimensionMismatch {
                index,
                expected,
                actual,
            },
            subject,
        );
        false
    }

    /// The position must lie within the CRS domain of validity
    pub fn check_within_domain_of_validity(
        &self,
        subject: &str,
        position: &DirectPosition,
        crs: &dyn CoordinateReferenceSystem,
    ) -> Report {
        let mut report = Report::new("domain of validity");
        self.check_contained(subject, None, position, crs, &mut report);
        report
    }

    fn check_contained(
        &self,
        subject: &str,
        index: Option<usize>,
        position: &DirectPosition,
        crs: &dyn CoordinateReferenceSystem,
        report: &mut Report,
    ) {
        let effective = if self.settings.truncate_excess_ordinates
            && position.dimension() > crs.dimension()
        {
            position.truncated(crs.dimension())
        } else {
            position.clone()
        };
        if !crs.contains(&effective) {
            trace!(subject, position = %position, crs = crs.identifier(), "position outside valid area");
            report.push(
                ViolationKind::PositionOutsideValidArea {
                    index,
                    position: position.ordinates().to_vec(),
                    area: crs.area_description(),
                },
                subject,
            );
        }
    }

    /// A point position must match the CRS dimension and lie within its
    /// domain of validity
    pub fn check_point_position(&self, instance: &GeometryInstance) -> Result<Report> {
        let position = match &instance.value {
            GeometryValue::Point(position) => position,
            _ => return Err(wrong_kind(instance, "Point")),
        };
        let mut report = Report::new("point position");
        let crs = match &instance.crs {
            Some(crs) => crs,
            None => {
                report.merge(self.check_has_crs(instance));
                report.mark_unchecked("position");
                return Ok(report);
            }
        };
        let subject = instance.label();
        let dimension = self.check_dimension_matches(&subject, position, &**crs);
        let dimension_ok = dimension.is_pass();
        report.merge(dimension);
        if dimension_ok {
            report.merge(self.check_within_domain_of_validity(&subject, position, &**crs));
        } else {
            report.mark_unchecked("domain of validity");
        }
        Ok(report)
    }

    /// For every ordinate, lowerCorner must be strictly less than upperCorner.
    /// Both corners must have the same dimension as each other and as the CRS,
    /// when one is known.
    pub fn check_envelope_ordering(&self, instance: &GeometryInstance) -> Result<Report> {
        let (lower, upper) = match &instance.value {
            GeometryValue::Envelope { lower, upper } => (lower, upper),
            _ => return Err(wrong_kind(instance, "Envelope")),
        };
        let subject = instance.label();
        let mut report = Report::new("envelope ordering");
        if lower.dimension() != upper.dimension() {
            report.push(
                ViolationKind::DimensionMismatch {
                    context: "upperCorner".to_string(),
                    expected: lower.dimension(),
                    actual: upper.dimension(),
                },
                subject,
            );
            report.mark_unchecked("corner ordering");
            return Ok(report);
        }

        let mut ordinates = lower.dimension();
        if let Some(crs) = &instance.crs {
            let expected = crs.dimension();
            if ordinates > expected && self.settings.truncate_excess_ordinates {
                ordinates = expected;
            } else if ordinates != expected {
                report.push(
                    ViolationKind::DimensionMismatch {
                        context: format!("CRS {}", crs.identifier()),
                        expected,
                        actual: ordinates,
                    },
                    subject.clone(),
                );
            }
        }

        let pairs = lower.ordinates().iter().zip(upper.ordinates()).take(ordinates);
        for (ordinate, (&lo, &hi)) in pairs.enumerate() {
            // NaN never orders
            if !(lo < hi) {
                report.push(
                    ViolationKind::InvalidEnvelopeOrdering {
                        ordinate,
                        lower: lo,
                        upper: hi,
                    },
                    subject.clone(),
                );
            }
        }
        Ok(report)
    }

    /// A curve must have at least one segment, and the end of each segment
    /// must coincide with the start of the next within the configured tolerance
    pub fn check_curve_segments_connected(&self, instance: &GeometryInstance) -> Result<Report> {
        let segments = match &instance.value {
            GeometryValue::Curve(segments) => segments,
            _ => return Err(wrong_kind(instance, "Curve")),
        };
        let subject = instance.label();
        let mut report = Report::new("curve segments connected");
        if segments.is_empty() {
            report.push(ViolationKind::NoSegments, subject);
            return Ok(report);
        }
        let tolerance = self.settings.connectivity_tolerance;
        for (k, pair) in segments.windows(2).enumerate() {
            if !(pair[0].interpolation.is_supported() && pair[1].interpolation.is_supported()) {
                report.mark_unchecked(format!("segments {} and {}", k, k + 1));
                continue;
            }
            let (end, start) = match (pair[0].end(), pair[1].start()) {
                (Some(end), Some(start)) => (end, start),
                _ => {
                    report.mark_unchecked(format!("segments {} and {}", k, k + 1));
                    continue;
                }
            };
            if !end.approx_eq(start, tolerance) {
                report.push(
                    ViolationKind::SegmentsNotConnected {
                        segment: k,
                        end: end.ordinates().to_vec(),
                        start: start.ordinates().to_vec(),
                    },
                    subject.clone(),
                );
            }
        }
        Ok(report)
    }

    /// Every curve segment, or the line string, must have at least as many
    /// positions as its interpolation method requires
    pub fn check_segments_have_required_length(
        &self,
        instance: &GeometryInstance,
    ) -> Result<Report> {
        let subject = instance.label();
        let mut report = Report::new("segment length");
        match &instance.value {
            GeometryValue::LineString(positions) => {
                let required = LINE_STRING_MINIMUM_POSITIONS;
                if positions.len() < required {
                    report.push(
                        ViolationKind::InsufficientCoordinates {
                            segment: None,
                            required,
                            found: positions.len(),
                        },
                        subject,
                    );
                }
            }
            GeometryValue::Curve(segments) => {
                for (i, segment) in segments.iter().enumerate() {
                    let required = match segment.interpolation.minimum_positions() {
                        Some(required) => required,
                        None => {
                            report.mark_unchecked(format!("segment {}", i));
                            continue;
                        }
                    };
                    if segment.positions.len() < required {
                        report.push(
                            ViolationKind::InsufficientCoordinates {
                                segment: Some(i),
                                required,
                                found: segment.positions.len(),
                            },
                            subject.clone(),
                        );
                    }
                }
            }
            _ => return Err(wrong_kind(instance, "Curve or LineString")),
        }
        Ok(report)
    }

    /// Every constituent position must match the CRS dimension and lie within
    /// its domain of validity. Violations carry the ordinal of the offending
    /// position; positions of the wrong dimension are not tested for containment.
    pub fn check_geometry_covered_by_valid_area(&self, instance: &GeometryInstance) -> Report {
        let mut report = Report::new("covered by valid area");
        let crs = match &instance.crs {
            Some(crs) => crs,
            None => {
                report.merge(self.check_has_crs(instance));
                report.mark_unchecked("positions");
                return report;
            }
        };
        let subject = instance.label();
        let indexed = !matches!(instance.value, GeometryValue::Point(_));
        for (i, position) in instance.value.positions().into_iter().enumerate() {
            let index = if indexed { Some(i) } else { None };
            if self.dimension_matches(&subject, index, position, &**crs, &mut report) {
                self.check_contained(&subject, index, position, &**crs, &mut report);
            } else {
                report.mark_unchecked(match index {
                    Some(i) => format!("domain of validity [{}]", i),
                    None => "domain of validity".to_string(),
                });
            }
        }
        report
    }

    /// Run every check that applies to the kind of geometry
    pub fn check_all(&self, instance: &GeometryInstance) -> Result<Vec<Report>> {
        let mut reports = vec![self.check_has_crs(instance)];
        match &instance.value {
            GeometryValue::Point(_) => {
                reports.push(self.check_point_position(instance)?);
            }
            GeometryValue::LineString(_) => {
                reports.push(self.check_segments_have_required_length(instance)?);
                reports.push(self.check_geometry_covered_by_valid_area(instance));
            }
            GeometryValue::Curve(_) => {
                reports.push(self.check_segments_have_required_length(instance)?);
                reports.push(self.check_curve_segments_connected(instance)?);
                reports.push(self.check_geometry_covered_by_valid_area(instance));
            }
            GeometryValue::Envelope { .. } => {
                reports.push(self.check_envelope_ordering(instance)?);
                reports.push(self.check_geometry_covered_by_valid_area(instance));
            }
        }
        debug!(
            geometry = %instance.label(),
            failed = reports.iter().filter(|r| !r.violations().is_empty()).count(),
            "checked geometry"
        );
        Ok(reports)
    }
}
