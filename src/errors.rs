//! Error types produced while building road axes or generating beam axes.

use thiserror::Error;

/// Error returned when a [`PolyAxis`](crate::PolyAxis) cannot be built or evaluated.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AxisError {
    /// Returned when the axis has no segments.
    #[error("road axis has no segments")]
    Empty,
    /// Returned when a segment of the axis has zero length.
    #[error("road axis segment {index} has zero length")]
    DegenerateSegment {
        /// Position of the offending segment in the axis.
        index: usize,
    },
    /// Returned when a segment does not start where the previous one ends.
    #[error("road axis segment {index} does not start at the end of segment {} (gap {gap:.3e})", .index - 1)]
    NonContiguous {
        /// Position of the segment that fails to connect.
        index: usize,
        /// Distance between the previous end and this start.
        gap: f64,
    },
    /// Returned when a parameter lies outside `[0, segment_count]`.
    #[error("parameter {parameter} is outside the road axis range [0, {max}]")]
    ParameterOutOfRange {
        /// Rejected parameter.
        parameter: f64,
        /// Largest valid parameter.
        max: f64,
    },
}

/// Error returned when the generation settings are not usable.
///
/// The variants describe the reason the supplied value is rejected so callers can
/// present actionable feedback to users.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigurationError {
    /// Returned when no offsets were configured.
    #[error("at least one beam offset is required")]
    NoOffsets,
    /// Returned when an offset distance is NaN or infinite.
    #[error("offset {name:?} has a non-finite distance ({distance})")]
    NonFiniteOffset {
        /// Name of the offending offset.
        name: String,
        /// Rejected distance in project units.
        distance: f64,
    },
    /// Returned when the unit conversion factor is not a positive finite number.
    #[error("length conversion factor must be positive and finite (received {factor})")]
    InvalidUnitFactor {
        /// Rejected factor.
        factor: f64,
    },
    /// Returned when the up vector has zero length.
    #[error("up vector must not be zero")]
    ZeroUpVector,
}

/// Error returned when beam-axis generation fails.
///
/// Any failure aborts the whole run so that no girder is silently omitted.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GenerationError {
    /// Returned when a section line does not cross the road axis.
    #[error("section {section} does not cross the road axis")]
    NoIntersection {
        /// Input position of the section.
        section: usize,
    },
    /// Returned when a section line crosses the road axis more than once.
    #[error("section {section} crosses the road axis {crossings} times")]
    AmbiguousIntersection {
        /// Input position of the section.
        section: usize,
        /// Number of distinct crossings found.
        crossings: usize,
    },
    /// Returned when a direction or tangent cannot be determined.
    #[error("degenerate geometry at section {section}: {reason}")]
    DegenerateGeometry {
        /// Input position of the section at which the problem was found.
        section: usize,
        /// Short description of what collapsed.
        reason: &'static str,
    },
    /// Returned when the settings are invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigurationError),
    /// Returned when the road axis itself is invalid.
    #[error(transparent)]
    Axis(#[from] AxisError),
}

/// Error returned when loading a job file or a persisted element id list.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Returned when the file cannot be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Returned when the file is not a valid job description.
    #[error("invalid job file: {0}")]
    Parse(#[from] serde_json::Error),
    /// Returned when an element id token is not of the form `Id<integer>`.
    #[error("malformed element id {0:?} (expected `Id<integer>`)")]
    MalformedElementId(String),
    /// Returned when the job describes an invalid road axis.
    #[error("invalid road axis in job file: {0}")]
    Axis(#[from] AxisError),
}
