//! Stations: section lines located on the road axis in travel order.

use log::debug;
use nalgebra::Vector3;

use crate::axis::{PolyAxis, Section};
use crate::errors::GenerationError;
use crate::geometry::{project_to_plan, Point, TOLERANCE};

/// A section line located on the road axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Station {
    /// Position of the section in the caller's input.
    pub input_index: usize,
    /// The section line as supplied.
    pub section: Section,
    /// Axis parameter of the crossing.
    pub parameter: f64,
    /// Crossing point on the road axis.
    pub point: Point,
}

/// Locate every section on `axis` and sort the result by axis parameter.
///
/// Ties keep the input order. The first section that misses the axis, or
/// crosses it more than once, aborts the whole run.
///
/// # Errors
///
/// Returns [`GenerationError::DegenerateGeometry`] for a section with zero
/// length in plan, and [`GenerationError::NoIntersection`] or
/// [`GenerationError::AmbiguousIntersection`] for a section that does not
/// cross the axis exactly once.
///
/// # Examples
/// ```
/// use beamaxis::{order_stations, point, segment, PolyAxis, Section};
/// use nalgebra::Vector3;
///
/// let axis = PolyAxis::from_points(&[point(0.0, 0.0, 0.0), point(20.0, 0.0, 0.0)])
///     .expect("valid axis");
/// let sections = [
///     Section::bounded(segment(point(15.0, -1.0, 0.0), point(15.0, 1.0, 0.0))),
///     Section::bounded(segment(point(5.0, -1.0, 0.0), point(5.0, 1.0, 0.0))),
/// ];
/// let stations = order_stations(&axis, &sections, &Vector3::z()).expect("all sections cross");
/// assert_eq!(stations[0].input_index, 1);
/// assert_eq!(stations[1].input_index, 0);
/// ```
pub fn order_stations(
    axis: &PolyAxis,
    sections: &[Section],
    up: &Vector3<f64>,
) -> Result<Vec<Station>, GenerationError> {
    let mut stations = sections
        .iter()
        .enumerate()
        .map(|(input_index, section)| {
            check_section(section, input_index, up)?;
            let hit = axis.intersect(section, input_index, up)?;
            Ok(Station {
                input_index,
                section: *section,
                parameter: hit.parameter,
                point: hit.point,
            })
        })
        .collect::<Result<Vec<_>, GenerationError>>()?;

    stations.sort_by(|a, b| a.parameter.total_cmp(&b.parameter));
    debug!(
        "ordered {} stations along the road axis: {:?}",
        stations.len(),
        stations.iter().map(|s| s.input_index).collect::<Vec<_>>()
    );
    Ok(stations)
}

/// Reject sections that have no usable direction in plan.
fn check_section(
    section: &Section,
    input_index: usize,
    up: &Vector3<f64>,
) -> Result<(), GenerationError> {
    if section.line.direction().is_none() {
        return Err(GenerationError::DegenerateGeometry {
            section: input_index,
            reason: "section line has zero length",
        });
    }
    if project_to_plan(&section.line.delta(), up).norm() <= TOLERANCE {
        return Err(GenerationError::DegenerateGeometry {
            section: input_index,
            reason: "section line is vertical",
        });
    }
    Ok(())
}
