//! Transverse frames: one consistently oriented lateral direction per station.

use nalgebra::Vector3;

use crate::axis::PolyAxis;
use crate::errors::GenerationError;
use crate::geometry::TOLERANCE;
use crate::station::Station;

/// A station with its local road tangent and transverse direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// The located section.
    pub station: Station,
    /// Unit road direction used to orient the section.
    pub tangent: Vector3<f64>,
    /// Unit section direction pointing to the positive offset side.
    pub transverse: Vector3<f64>,
}

/// Orient the transverse direction of every station.
///
/// The tangent at station `i` runs from its axis point to the next one; the
/// last station reuses the tangent of the previous pair. A lone station takes
/// the direction of the axis segment it lies on. The section direction is
/// flipped whenever `(tangent × section) · up` is negative, so positive
/// offsets land on the same side of the road for every station.
///
/// # Errors
///
/// Returns [`GenerationError::DegenerateGeometry`] when two consecutive
/// stations coincide, a section has zero length, or a section runs along
/// the road tangent.
pub fn build_frames(
    axis: &PolyAxis,
    stations: &[Station],
    up: &Vector3<f64>,
) -> Result<Vec<Frame>, GenerationError> {
    let mut tangents = Vec::with_capacity(stations.len());
    for pair in stations.windows(2) {
        let tangent = (pair[1].point.to_vector() - pair[0].point.to_vector())
            .try_normalize(TOLERANCE)
            .ok_or(GenerationError::DegenerateGeometry {
                section: pair[1].input_index,
                reason: "station coincides with the previous station",
            })?;
        tangents.push(tangent);
    }
    match (stations, tangents.last().copied()) {
        (_, Some(last)) => tangents.push(last),
        ([lone], None) => tangents.push(axis.direction_at(lone.parameter)?),
        _ => {}
    }

    stations
        .iter()
        .zip(tangents)
        .map(|(station, tangent)| orient(station, tangent, up))
        .collect()
}

/// Pick the sign of the section direction at one station.
fn orient(
    station: &Station,
    tangent: Vector3<f64>,
    up: &Vector3<f64>,
) -> Result<Frame, GenerationError> {
    let direction = station
        .section
        .line
        .direction()
        .ok_or(GenerationError::DegenerateGeometry {
            section: station.input_index,
            reason: "section line has zero length",
        })?;

    let side = tangent.cross(&direction).dot(up);
    if side.abs() <= TOLERANCE {
        return Err(GenerationError::DegenerateGeometry {
            section: station.input_index,
            reason: "section line runs along the road tangent",
        });
    }
    let transverse = if side < 0.0 { -direction } else { direction };

    Ok(Frame {
        station: *station,
        tangent,
        transverse,
    })
}
