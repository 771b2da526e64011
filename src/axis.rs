//! Road axis modelled as a chain of straight segments.

use log::trace;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::errors::{AxisError, GenerationError};
use crate::geometry::{plan_line_intersection, Point, Segment, TOLERANCE};

/// How much of a section line takes part in intersection tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extent {
    /// Only the drawn segment between the two endpoints.
    #[default]
    Bounded,
    /// The infinite line through the two endpoints.
    Unbounded,
}

/// Cross-section line drawn across the road axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// The drawn line. Its orientation is irrelevant to the result.
    #[serde(flatten)]
    pub line: Segment,
    /// Whether the line is clipped to its endpoints.
    #[serde(default)]
    pub extent: Extent,
}

impl Section {
    /// A section clipped to its endpoints.
    #[must_use]
    pub const fn bounded(line: Segment) -> Self {
        Self {
            line,
            extent: Extent::Bounded,
        }
    }

    /// A section extended to an infinite line.
    #[must_use]
    pub const fn unbounded(line: Segment) -> Self {
        Self {
            line,
            extent: Extent::Unbounded,
        }
    }
}

/// Crossing of a section with the road axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisHit {
    /// Point on the road axis.
    pub point: Point,
    /// Axis parameter of `point`.
    pub parameter: f64,
    /// Index of the axis segment that owns `parameter`.
    pub segment_index: usize,
}

/// Connected chain of straight segments with a monotone parameter.
///
/// A point at fraction `f` of segment `i` has parameter `i + f`, so the whole
/// axis spans `[0, segment_count]`.
#[derive(Clone, Debug, PartialEq)]
pub struct PolyAxis {
    /// Contiguous segments in travel order.
    segments: Vec<Segment>,
}

impl PolyAxis {
    /// Build an axis from contiguous segments.
    ///
    /// # Errors
    ///
    /// Returns [`AxisError::Empty`] for an empty list,
    /// [`AxisError::DegenerateSegment`] for a zero-length segment and
    /// [`AxisError::NonContiguous`] when a segment does not start at the end of
    /// the previous one.
    ///
    /// # Examples
    /// ```
    /// use beamaxis::{point, segment, PolyAxis};
    ///
    /// let axis = PolyAxis::new(vec![
    ///     segment(point(0.0, 0.0, 0.0), point(10.0, 0.0, 0.0)),
    ///     segment(point(10.0, 0.0, 0.0), point(20.0, 5.0, 0.0)),
    /// ])
    /// .expect("contiguous segments");
    /// assert_eq!(axis.segment_count(), 2);
    /// ```
    pub fn new(segments: Vec<Segment>) -> Result<Self, AxisError> {
        if segments.is_empty() {
            return Err(AxisError::Empty);
        }
        for (index, segment) in segments.iter().enumerate() {
            if segment.length() <= TOLERANCE {
                return Err(AxisError::DegenerateSegment { index });
            }
        }
        for (index, pair) in segments.windows(2).enumerate() {
            let gap = pair[0].end.distance(pair[1].start);
            if gap > TOLERANCE {
                return Err(AxisError::NonContiguous {
                    index: index + 1,
                    gap,
                });
            }
        }
        Ok(Self { segments })
    }

    /// Build an axis from polyline vertices.
    ///
    /// # Errors
    ///
    /// Returns [`AxisError::Empty`] for fewer than two vertices and
    /// [`AxisError::DegenerateSegment`] for repeated consecutive vertices.
    pub fn from_points(points: &[Point]) -> Result<Self, AxisError> {
        let segments = points
            .windows(2)
            .map(|pair| Segment::new(pair[0], pair[1]))
            .collect();
        Self::new(segments)
    }

    /// Segments in travel order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments, which is also the largest valid parameter.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Total length of the axis.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.segments.iter().map(Segment::length).sum()
    }

    /// Split a parameter into the owning segment and the fraction within it.
    ///
    /// A parameter on a segment boundary belongs to the following segment,
    /// except the final parameter which belongs to the last segment.
    fn locate(&self, parameter: f64) -> Result<(usize, f64), AxisError> {
        let max = self.segments.len() as f64;
        if !(0.0..=max).contains(&parameter) {
            return Err(AxisError::ParameterOutOfRange { parameter, max });
        }
        let index = (parameter.floor() as usize).min(self.segments.len() - 1);
        Ok((index, parameter - index as f64))
    }

    /// Evaluate the axis at `parameter`.
    ///
    /// # Errors
    ///
    /// Returns [`AxisError::ParameterOutOfRange`] when `parameter` lies outside
    /// `[0, segment_count]`.
    pub fn point_at_parameter(&self, parameter: f64) -> Result<Point, AxisError> {
        let (index, fraction) = self.locate(parameter)?;
        Ok(self.segments[index].lerp(fraction))
    }

    /// Arc length from the start of the axis to `parameter`.
    ///
    /// # Errors
    ///
    /// Returns [`AxisError::ParameterOutOfRange`] when `parameter` lies outside
    /// `[0, segment_count]`.
    pub fn chainage(&self, parameter: f64) -> Result<f64, AxisError> {
        let (index, fraction) = self.locate(parameter)?;
        let before: f64 = self.segments[..index].iter().map(Segment::length).sum();
        Ok(before + self.segments[index].length() * fraction)
    }

    /// Unit travel direction of the segment owning `parameter`.
    ///
    /// # Errors
    ///
    /// Returns [`AxisError::ParameterOutOfRange`] when `parameter` lies outside
    /// `[0, segment_count]`.
    pub fn direction_at(&self, parameter: f64) -> Result<Vector3<f64>, AxisError> {
        let (index, _) = self.locate(parameter)?;
        self.segments[index]
            .direction()
            .ok_or(AxisError::DegenerateSegment { index })
    }

    /// All distinct crossings of `section` with the axis, in travel order.
    ///
    /// Crossings are computed in the plan perpendicular to the unit vector `up`.
    /// Axis segments parallel to the section are skipped. Two hits closer than
    /// [`TOLERANCE`] in parameter (a shared vertex) count once and keep the
    /// later parameter.
    #[must_use]
    pub fn crossings(&self, section: &Section, up: &Vector3<f64>) -> Vec<AxisHit> {
        let section_origin = section.line.start.to_vector();
        let section_dir = section.line.delta();
        let mut hits: Vec<AxisHit> = Vec::new();

        for (index, axis_segment) in self.segments.iter().enumerate() {
            let Some((t, u)) = plan_line_intersection(
                &axis_segment.start.to_vector(),
                &axis_segment.delta(),
                &section_origin,
                &section_dir,
                up,
            ) else {
                trace!("section is parallel to axis segment {index}");
                continue;
            };

            let axis_slack = TOLERANCE / axis_segment.length();
            if t < -axis_slack || t > 1.0 + axis_slack {
                continue;
            }
            if section.extent == Extent::Bounded {
                let section_slack = TOLERANCE / section.line.length();
                if u < -section_slack || u > 1.0 + section_slack {
                    continue;
                }
            }

            let fraction = t.clamp(0.0, 1.0);
            let (segment_index, fraction) =
                if fraction >= 1.0 && index + 1 < self.segments.len() {
                    (index + 1, 0.0)
                } else {
                    (index, fraction)
                };
            let hit = AxisHit {
                point: self.segments[segment_index].lerp(fraction),
                parameter: segment_index as f64 + fraction,
                segment_index,
            };

            if let Some(last) = hits.last_mut() {
                if (hit.parameter - last.parameter).abs() <= TOLERANCE {
                    *last = hit;
                    continue;
                }
            }
            hits.push(hit);
        }
        hits
    }

    /// Find the single crossing of `section` with the axis.
    ///
    /// `section_index` identifies the section in error reports.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::NoIntersection`] when the section misses the
    /// axis and [`GenerationError::AmbiguousIntersection`] when it crosses more
    /// than once.
    pub fn intersect(
        &self,
        section: &Section,
        section_index: usize,
        up: &Vector3<f64>,
    ) -> Result<AxisHit, GenerationError> {
        let hits = self.crossings(section, up);
        match hits.as_slice() {
            [] => Err(GenerationError::NoIntersection {
                section: section_index,
            }),
            [hit] => Ok(*hit),
            _ => Err(GenerationError::AmbiguousIntersection {
                section: section_index,
                crossings: hits.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::{point, segment};

    fn straight_axis() -> PolyAxis {
        PolyAxis::from_points(&[
            point(0.0, 0.0, 0.0),
            point(10.0, 0.0, 0.0),
            point(20.0, 0.0, 0.0),
        ])
        .expect("valid axis")
    }

    fn cross_at(x: f64) -> Section {
        Section::bounded(segment(point(x, -1.0, 0.0), point(x, 1.0, 0.0)))
    }

    #[test]
    fn empty_and_broken_axes_are_rejected() {
        assert_eq!(PolyAxis::new(Vec::new()), Err(AxisError::Empty));
        assert_eq!(PolyAxis::from_points(&[point(1.0, 0.0, 0.0)]), Err(AxisError::Empty));

        let broken = PolyAxis::new(vec![
            segment(point(0.0, 0.0, 0.0), point(1.0, 0.0, 0.0)),
            segment(point(1.5, 0.0, 0.0), point(2.0, 0.0, 0.0)),
        ])
        .expect_err("gap detected");
        assert!(matches!(broken, AxisError::NonContiguous { index: 1, .. }));

        let degenerate = PolyAxis::from_points(&[
            point(0.0, 0.0, 0.0),
            point(0.0, 0.0, 0.0),
            point(1.0, 0.0, 0.0),
        ])
        .expect_err("zero length detected");
        assert_eq!(degenerate, AxisError::DegenerateSegment { index: 0 });
    }

    #[test]
    fn boundary_parameter_resolves_to_next_segment() {
        let axis = PolyAxis::from_points(&[
            point(0.0, 0.0, 0.0),
            point(10.0, 0.0, 0.0),
            point(10.0, 10.0, 0.0),
        ])
        .expect("valid axis");
        assert_eq!(axis.locate(1.0), Ok((1, 0.0)));
        assert_eq!(axis.locate(2.0), Ok((1, 1.0)));
        assert_eq!(
            axis.point_at_parameter(1.0).expect("in range"),
            point(10.0, 0.0, 0.0)
        );
        assert_relative_eq!(axis.direction_at(1.0).expect("in range"), Vector3::y());
        assert_relative_eq!(axis.chainage(1.5).expect("in range"), 15.0);
    }

    #[test]
    fn out_of_range_parameter_is_rejected() {
        let axis = straight_axis();
        for parameter in [-0.1, 2.1, f64::NAN] {
            assert!(matches!(
                axis.point_at_parameter(parameter),
                Err(AxisError::ParameterOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn intersection_round_trips_through_evaluation() {
        let axis = PolyAxis::from_points(&[
            point(0.0, 0.0, 0.0),
            point(10.0, 2.0, 1.0),
            point(25.0, -3.0, 2.0),
        ])
        .expect("valid axis");
        let up = Vector3::z();
        for x in [1.0, 7.5, 10.0, 12.0, 24.0] {
            let section = Section::unbounded(segment(point(x, 0.0, 0.0), point(x, 1.0, 0.0)));
            let hit = axis.intersect(&section, 0, &up).expect("section crosses");
            let evaluated = axis.point_at_parameter(hit.parameter).expect("in range");
            assert_relative_eq!(evaluated.to_vector(), hit.point.to_vector(), epsilon = 1.0e-9);
            assert_relative_eq!(hit.point.x, x, epsilon = 1.0e-9);
        }
    }

    #[test]
    fn crossing_at_shared_vertex_counts_once() {
        let axis = straight_axis();
        let hit = axis
            .intersect(&cross_at(10.0), 0, &Vector3::z())
            .expect("single crossing");
        assert_eq!(hit.segment_index, 1);
        assert_relative_eq!(hit.parameter, 1.0);
    }

    #[test]
    fn section_beyond_axis_does_not_intersect() {
        let axis = straight_axis();
        let error = axis
            .intersect(&cross_at(25.0), 3, &Vector3::z())
            .expect_err("no crossing");
        assert_eq!(error, GenerationError::NoIntersection { section: 3 });
    }

    #[test]
    fn parallel_section_does_not_intersect() {
        let axis = straight_axis();
        let section = Section::unbounded(segment(point(0.0, 1.0, 0.0), point(5.0, 1.0, 0.0)));
        assert!(axis.crossings(&section, &Vector3::z()).is_empty());
    }

    #[test]
    fn section_crossing_a_bend_twice_is_ambiguous() {
        let axis = PolyAxis::from_points(&[
            point(0.0, 0.0, 0.0),
            point(10.0, 10.0, 0.0),
            point(20.0, 0.0, 0.0),
        ])
        .expect("valid axis");
        let section = Section::bounded(segment(point(0.0, 5.0, 0.0), point(20.0, 5.0, 0.0)));
        let error = axis
            .intersect(&section, 1, &Vector3::z())
            .expect_err("two crossings");
        assert_eq!(
            error,
            GenerationError::AmbiguousIntersection {
                section: 1,
                crossings: 2
            }
        );
    }

    #[test]
    fn short_bounded_section_misses_but_unbounded_hits() {
        let axis = straight_axis();
        let line = segment(point(5.0, 2.0, 0.0), point(5.0, 4.0, 0.0));
        let up = Vector3::z();
        assert!(axis.crossings(&Section::bounded(line), &up).is_empty());
        assert_eq!(axis.crossings(&Section::unbounded(line), &up).len(), 1);
    }
}
