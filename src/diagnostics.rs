//! Rule violations and check reports
//!
//! Every check returns a [`Report`]. A report with no violations passes; a
//! report may also be skipped when the input contains nothing to check.
//! Messages are rendered from the violation kind and its parameters only.

use serde::Serialize;
use std::fmt;

use crate::model::Compositor;
use crate::namespaces::QName;

/// A rule violation kind together with its parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// A required attribute use is missing
    AttributeRequired {
        /// Attribute that must be declared
        attribute: QName,
        /// The requirement comes from an optional (minOccurs = 0) property value
        optional_value: bool,
    },
    /// An attribute use is present but not allowed
    AttributeProhibited {
        /// Attribute that must not be declared
        attribute: QName,
    },
    /// The top-level term is not a model group
    ModelGroupExpected,
    /// The top-level model group is not a sequence
    SequenceExpected {
        /// Compositor that was found instead
        found: Compositor,
    },
    /// The top-level sequence does not contain exactly one particle
    TooManyParticles {
        /// Number of particles found
        count: usize,
    },
    /// The property value particle is a wildcard
    WildcardNotPermitted,
    /// A choice branch (or the value particle) is a wildcard or a nested group
    WildcardOrGroupNotPermitted,
    /// A property value cannot substitute for the designated head
    DisallowedSubstitution {
        /// Element declaration used as the property value
        candidate: QName,
        /// Head of the required substitution group
        head: QName,
    },
    /// A feature element is not in the substitution group of the feature head
    SubstitutionError {
        /// Offending global element
        element: QName,
        /// Head it should substitute for
        head: String,
    },
    /// A metadata property has empty content
    MetadataValueUnspecified,
    /// The CRS reference is missing or cannot be resolved
    UnknownCrs {
        /// srsName found for the geometry, if any
        srs_name: Option<String>,
    },
    /// Coordinate tuple length differs from the CRS dimension
    CoordinateDimensionMismatch {
        /// Ordinal of the position within its geometry
        index: Option<usize>,
        /// CRS dimension
        expected: usize,
        /// Coordinate tuple length
        actual: usize,
    },
    /// A position lies outside the CRS domain of validity
    PositionOutsideValidArea {
        /// Ordinal of the position within its geometry
        index: Option<usize>,
        /// Offending position
        position: Vec<f64>,
        /// Description of the valid area
        area: String,
    },
    /// lowerCorner[i] is not strictly less than upperCorner[i]
    InvalidEnvelopeOrdering {
        /// Ordinate index
        ordinate: usize,
        /// Lower corner ordinate
        lower: f64,
        /// Upper corner ordinate
        upper: f64,
    },
    /// Envelope corner dimensions disagree with each other or with the CRS
    DimensionMismatch {
        /// What the dimension was compared against
        context: String,
        /// Expected dimension
        expected: usize,
        /// Actual dimension
        actual: usize,
    },
    /// A curve has no segments
    NoSegments,
    /// Adjacent curve segments do not share an end/start position
    SegmentsNotConnected {
        /// Index of the segment whose end point does not meet the next start
        segment: usize,
        /// End position of that segment
        end: Vec<f64>,
        /// Start position of the following segment
        start: Vec<f64>,
    },
    /// A segment or line string has too few positions
    InsufficientCoordinates {
        /// Segment index, for curves
        segment: Option<usize>,
        /// Minimum number of positions
        required: usize,
        /// Number of positions supplied
        found: usize,
    },
}

impl ViolationKind {
    /// Stable code naming the violation kind
    pub fn code(&self) -> &'static str {
        match self {
            Self::AttributeRequired { .. } => "AttributeRequired",
            Self::AttributeProhibited { .. } => "AttributeProhibited",
            Self::ModelGroupExpected => "ModelGroupExpected",
            Self::SequenceExpected { .. } => "SequenceExpected",
            Self::TooManyParticles { .. } => "TooManyParticles",
            Self::WildcardNotPermitted => "WildcardNotPermitted",
            Self::WildcardOrGroupNotPermitted => "WildcardOrGroupNotPermitted",
            Self::DisallowedSubstitution { .. } => "DisallowedSubstitution",
            Self::SubstitutionError { .. } => "SubstitutionError",
            Self::MetadataValueUnspecified => "MetadataValueUnspecified",
            Self::UnknownCrs { .. } => "UnknownCRS",
            Self::CoordinateDimensionMismatch { .. } => "CoordinateDimensionMismatch",
            Self::PositionOutsideValidArea { .. } => "PositionOutsideValidArea",
            Self::InvalidEnvelopeOrdering { .. } => "InvalidEnvelopeOrdering",
            Self::DimensionMismatch { .. } => "DimensionMismatch",
            Self::NoSegments => "NoSegments",
            Self::SegmentsNotConnected { .. } => "SegmentsNotConnected",
            Self::InsufficientCoordinates { .. } => "InsufficientCoordinates",
        }
    }
}

/// A rule violation found in a schema component or geometry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// What was violated
    #[serde(flatten)]
    pub kind: ViolationKind,
    /// The component or geometry the violation was found in
    pub subject: String,
}

impl Violation {
    /// Create a new violation
    pub fn new(kind: ViolationKind, subject: impl Into<String>) -> Self {
        Self {
            kind,
            subject: subject.into(),
        }
    }

    /// Stable code naming the violation kind
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subject = &self.subject;
        match &self.kind {
            ViolationKind::AttributeRequired {
                attribute,
                optional_value,
            } => {
                if *optional_value {
                    write!(f, "Property value has minOccurs = 0. ")?;
                }
                write!(
                    f,
                    "Attribute {} is required in type definition {}",
                    attribute.prefixed(),
                    subject
                )
            }
            ViolationKind::AttributeProhibited { attribute } => write!(
                f,
                "Attribute {} is not permitted in type definition {}",
                attribute.prefixed(),
                subject
            ),
            ViolationKind::ModelGroupExpected => {
                write!(f, "Expected a model group in the content model of {}", subject)
            }
            ViolationKind::SequenceExpected { found } => write!(
                f,
                "Expected a sequence compositor in the content model of {}, found {}",
                subject, found
            ),
            ViolationKind::TooManyParticles { count } => write!(
                f,
                "Content model of {} must contain exactly one particle, found {}",
                subject, count
            ),
            ViolationKind::WildcardNotPermitted => {
                write!(f, "Wildcard component not permitted in property type: {}", subject)
            }
            ViolationKind::WildcardOrGroupNotPermitted => write!(
                f,
                "Only element declarations are allowed in the property value of {}",
                subject
            ),
            ViolationKind::DisallowedSubstitution { candidate, head } => write!(
                f,
                "{} cannot substitute for {} in property type {}",
                candidate.prefixed(),
                head.prefixed(),
                subject
            ),
            ViolationKind::SubstitutionError { element, head } => write!(
                f,
                "Element {} does not substitute for {}",
                element.prefixed(),
                head
            ),
            ViolationKind::MetadataValueUnspecified => write!(
                f,
                "Metadata property {} has an empty content model",
                subject
            ),
            ViolationKind::UnknownCrs { srs_name } => write!(
                f,
                "{} has unknown CRS (srsName: {})",
                subject,
                srs_name.as_deref().unwrap_or("none")
            ),
            ViolationKind::CoordinateDimensionMismatch {
                index,
                expected,
                actual,
            } => {
                write!(f, "{}", subject)?;
                if let Some(index) = index {
                    write!(f, " position [{}]", index)?;
                }
                write!(
                    f,
                    ": coordinate tuple has {} ordinate(s) but the CRS dimension is {}",
                    actual, expected
                )
            }
            ViolationKind::PositionOutsideValidArea {
                index,
                position,
                area,
            } => {
                write!(f, "{}", subject)?;
                if let Some(index) = index {
                    write!(f, " position [{}]", index)?;
                }
                write!(
                    f,
                    " {:?} is not covered by valid area of CRS: {}",
                    position, area
                )
            }
            ViolationKind::InvalidEnvelopeOrdering {
                ordinate,
                lower,
                upper,
            } => write!(
                f,
                "{}: expected lowerCorner[{ordinate}] < upperCorner[{ordinate}] ({lower} < {upper})",
                subject
            ),
            ViolationKind::DimensionMismatch {
                context,
                expected,
                actual,
            } => write!(
                f,
                "{}: dimension of {} is {} but {} was expected",
                subject, context, actual, expected
            ),
            ViolationKind::NoSegments => write!(f, "{} has no curve segments", subject),
            ViolationKind::SegmentsNotConnected {
                segment,
                end,
                start,
            } => write!(
                f,
                "{}: end of segment {} {:?} does not match start of segment {} {:?}",
                subject,
                segment,
                end,
                segment + 1,
                start
            ),
            ViolationKind::InsufficientCoordinates {
                segment,
                required,
                found,
            } => {
                write!(f, "{}", subject)?;
                if let Some(segment) = segment {
                    write!(f, " segment {}", segment)?;
                }
                write!(
                    f,
                    " has {} coordinate tuple(s); at least {} are required",
                    found, required
                )
            }
        }
    }
}

/// Overall result of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// No violations
    Pass,
    /// At least one violation
    Fail,
    /// Nothing to check
    Skip,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "pass"),
            Self::Fail => write!(f, "fail"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

/// The outcome of one check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Name of the check
    pub check: String,
    violations: Vec<Violation>,
    /// Steps that were not evaluated because an earlier violation made them meaningless
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unchecked: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skip_reason: Option<String>,
}

impl Report {
    /// Create an empty (passing) report
    pub fn new(check: impl Into<String>) -> Self {
        Self {
            check: check.into(),
            violations: Vec::new(),
            unchecked: Vec::new(),
            skip_reason: None,
        }
    }

    /// Create a skipped report
    pub fn skipped(check: impl Into<String>, reason: impl Into<String>) -> Self {
        let mut report = Self::new(check);
        report.skip_reason = Some(reason.into());
        report
    }

    /// Record a violation
    pub fn push(&mut self, kind: ViolationKind, subject: impl Into<String>) {
        self.violations.push(Violation::new(kind, subject));
    }

    /// Record a step that was not evaluated
    pub fn mark_unchecked(&mut self, step: impl Into<String>) {
        self.unchecked.push(step.into());
    }

    /// Append the violations and unchecked steps of another report
    pub fn merge(&mut self, other: Report) {
        self.violations.extend(other.violations);
        self.unchecked.extend(other.unchecked);
    }

    /// The violations found
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Steps that were not evaluated
    pub fn unchecked(&self) -> &[String] {
        &self.unchecked
    }

    /// Reason the check was skipped
    pub fn skip_reason(&self) -> Option<&str> {
        self.skip_reason.as_deref()
    }

    /// Check whether a violation with the given code was recorded
    pub fn has(&self, code: &str) -> bool {
        self.violations.iter().any(|v| v.code() == code)
    }

    /// Overall verdict
    pub fn verdict(&self) -> Verdict {
        if self.skip_reason.is_some() && self.violations.is_empty() {
            Verdict::Skip
        } else if self.violations.is_empty() {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    /// Check whether the report passed
    pub fn is_pass(&self) -> bool {
        self.verdict() == Verdict::Pass
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        let mut value = serde_json::to_value(self)?;
        if let serde_json::Value::Object(ref mut map) = value {
            map.insert("verdict".to_string(), serde_json::to_value(self.verdict())?);
        }
        Ok(value)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.check, self.verdict())?;
        if let Some(ref reason) = self.skip_reason {
            write!(f, " ({})", reason)?;
        }
        for violation in &self.violations {
            write!(f, "\n  - {}", violation)?;
        }
        for step in &self.unchecked {
            write!(f, "\n  ? {} (not evaluated)", step)?;
        }
        Ok(())
    }
}
