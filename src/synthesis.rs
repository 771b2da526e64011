//! Beam-axis synthesis and the end-to-end generation run.

use log::{debug, info};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::axis::{PolyAxis, Section};
use crate::errors::{ConfigurationError, GenerationError};
use crate::frame::{build_frames, Frame};
use crate::geometry::{Point, Segment, TOLERANCE};
use crate::station::order_stations;
use crate::units::LengthScale;

/// A named lateral distance, in project length units, for one beam line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OffsetSpec {
    /// Label carried through to the generated segments.
    pub name: String,
    /// Signed distance from the road axis along the transverse direction.
    pub distance: f64,
}

impl OffsetSpec {
    /// Create an [`OffsetSpec`].
    #[must_use]
    pub fn new(name: impl Into<String>, distance: f64) -> Self {
        Self {
            name: name.into(),
            distance,
        }
    }
}

/// Where an offset point is placed on a section line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetPlacement {
    /// Measure the offset along the section line from the axis point.
    #[default]
    AlongSection,
    /// Intersect the section line with a parallel to the chord of the
    /// station pair, at the offset distance measured square to the chord.
    ChordParallel,
}

/// One generated girder centerline between two adjacent stations.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BeamAxisSegment {
    /// The straight centerline.
    pub segment: Segment,
    /// The offset this line was generated from.
    pub offset: OffsetSpec,
    /// Index of the station pair, counted in travel order.
    pub pair_index: usize,
}

/// Immutable inputs for one generation run.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationInput {
    /// Road axis.
    pub axis: PolyAxis,
    /// Section lines in any order.
    pub sections: Vec<Section>,
    /// Offsets in output order.
    pub offsets: Vec<OffsetSpec>,
    /// Conversion from offset units to geometry units.
    pub scale: LengthScale,
    /// Vertical direction of the geometry; need not be normalized.
    pub up: Vector3<f64>,
    /// Offset point placement rule.
    pub placement: OffsetPlacement,
}

impl GenerationInput {
    /// Inputs with identity scale, `+Z` up and [`OffsetPlacement::AlongSection`].
    #[must_use]
    pub fn new(axis: PolyAxis, sections: Vec<Section>, offsets: Vec<OffsetSpec>) -> Self {
        Self {
            axis,
            sections,
            offsets,
            scale: LengthScale::identity(),
            up: Vector3::z(),
            placement: OffsetPlacement::default(),
        }
    }

    /// Check the offsets and the up vector, returning the normalized up vector.
    fn validate(&self) -> Result<Vector3<f64>, ConfigurationError> {
        if self.offsets.is_empty() {
            return Err(ConfigurationError::NoOffsets);
        }
        if let Some(bad) = self.offsets.iter().find(|o| !o.distance.is_finite()) {
            return Err(ConfigurationError::NonFiniteOffset {
                name: bad.name.clone(),
                distance: bad.distance,
            });
        }
        self.up
            .try_normalize(TOLERANCE)
            .ok_or(ConfigurationError::ZeroUpVector)
    }
}

/// Everything a run produces, for callers that report intermediate results.
#[derive(Clone, Debug, PartialEq)]
pub struct Generation {
    /// Oriented stations in travel order.
    pub frames: Vec<Frame>,
    /// Generated beam axes, grouped by station pair then by offset.
    pub beams: Vec<BeamAxisSegment>,
}

/// Run the whole pipeline: locate and order stations, orient them and
/// synthesize the beam axes.
///
/// # Errors
///
/// Returns [`GenerationError::InvalidConfiguration`] for unusable settings and
/// the station, frame or synthesis errors of the first failing section.
pub fn generate_with_frames(input: &GenerationInput) -> Result<Generation, GenerationError> {
    let up = input.validate()?;
    let stations = order_stations(&input.axis, &input.sections, &up)?;
    let frames = build_frames(&input.axis, &stations, &up)?;
    let beams = synthesize(&frames, &input.offsets, input.scale, input.placement, &up)?;
    info!(
        "generated {} beam axes from {} stations and {} offsets",
        beams.len(),
        frames.len(),
        input.offsets.len()
    );
    Ok(Generation { frames, beams })
}

/// Generate the beam axes for `input`.
///
/// # Errors
///
/// See [`generate_with_frames`].
///
/// # Examples
/// ```
/// use beamaxis::{generate, point, segment, GenerationInput, OffsetSpec, PolyAxis, Section};
///
/// let axis = PolyAxis::from_points(&[point(0.0, 0.0, 0.0), point(20.0, 0.0, 0.0)])
///     .expect("valid axis");
/// let sections = vec![
///     Section::bounded(segment(point(5.0, -1.0, 0.0), point(5.0, 1.0, 0.0))),
///     Section::bounded(segment(point(15.0, -1.0, 0.0), point(15.0, 1.0, 0.0))),
/// ];
/// let offsets = vec![OffsetSpec::new("B1", 0.0), OffsetSpec::new("B2", 2.0)];
///
/// let beams = generate(&GenerationInput::new(axis, sections, offsets)).expect("valid input");
/// assert_eq!(beams.len(), 2);
/// assert_eq!(beams[1].segment.start, point(5.0, 2.0, 0.0));
/// ```
pub fn generate(input: &GenerationInput) -> Result<Vec<BeamAxisSegment>, GenerationError> {
    generate_with_frames(input).map(|generation| generation.beams)
}

/// Connect the offset points of every adjacent frame pair.
///
/// Fewer than two frames yield no segments. `up` must be a unit vector.
///
/// # Errors
///
/// Returns [`GenerationError::DegenerateGeometry`] when an offset point cannot
/// be placed or a generated segment has zero length.
pub fn synthesize(
    frames: &[Frame],
    offsets: &[OffsetSpec],
    scale: LengthScale,
    placement: OffsetPlacement,
    up: &Vector3<f64>,
) -> Result<Vec<BeamAxisSegment>, GenerationError> {
    let mut beams = Vec::with_capacity(frames.len().saturating_sub(1) * offsets.len());
    for (pair_index, pair) in frames.windows(2).enumerate() {
        let (from, to) = (&pair[0], &pair[1]);
        let chord_normal = match placement {
            OffsetPlacement::AlongSection => None,
            OffsetPlacement::ChordParallel => Some(chord_normal(from, to, up)?),
        };
        for offset in offsets {
            let distance = scale.to_kernel(offset.distance);
            let start = offset_point(from, distance, chord_normal.as_ref())?;
            let end = offset_point(to, distance, chord_normal.as_ref())?;
            let segment = Segment::new(start, end);
            if segment.length() <= TOLERANCE {
                return Err(GenerationError::DegenerateGeometry {
                    section: to.station.input_index,
                    reason: "beam axis has zero length",
                });
            }
            beams.push(BeamAxisSegment {
                segment,
                offset: offset.clone(),
                pair_index,
            });
        }
    }
    debug!("synthesized {} beam axes", beams.len());
    Ok(beams)
}

/// Unit plan normal of the chord between two frames, on the positive side.
fn chord_normal(
    from: &Frame,
    to: &Frame,
    up: &Vector3<f64>,
) -> Result<Vector3<f64>, GenerationError> {
    let chord = to.station.point.to_vector() - from.station.point.to_vector();
    up.cross(&chord)
        .try_normalize(TOLERANCE)
        .ok_or(GenerationError::DegenerateGeometry {
            section: to.station.input_index,
            reason: "station chord is vertical or has zero length",
        })
}

/// Place the offset point of one frame.
fn offset_point(
    frame: &Frame,
    distance: f64,
    chord_normal: Option<&Vector3<f64>>,
) -> Result<Point, GenerationError> {
    let along = match chord_normal {
        None => distance,
        Some(normal) => {
            let cosine = frame.transverse.dot(normal);
            if cosine.abs() <= TOLERANCE {
                return Err(GenerationError::DegenerateGeometry {
                    section: frame.station.input_index,
                    reason: "section line runs along the station chord",
                });
            }
            distance / cosine
        }
    };
    Ok(frame.station.point.offset(&frame.transverse, along))
}
