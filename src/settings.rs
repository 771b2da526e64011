//! Job files and persisted element identifier lists.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use log::{debug, warn};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::axis::{PolyAxis, Section};
use crate::errors::SettingsError;
use crate::geometry::{Point, Segment};
use crate::synthesis::{GenerationInput, OffsetPlacement, OffsetSpec};
use crate::units::{LengthScale, LengthUnit};

/// Ordered list of host element identifiers, persisted as `"Id12, Id34"`.
///
/// # Examples
/// ```
/// use beamaxis::ElementIds;
///
/// let ids: ElementIds = "Id101, Id102 Id7".parse().expect("well formed");
/// assert_eq!(ids.as_slice(), &[101, 102, 7]);
/// assert_eq!(ids.to_string(), "Id101, Id102, Id7");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementIds(Vec<i64>);

impl ElementIds {
    /// Wrap a list of identifiers.
    #[must_use]
    pub fn new(ids: Vec<i64>) -> Self {
        Self(ids)
    }

    /// The identifiers in their persisted order.
    #[must_use]
    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for ElementIds {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split([',', ' '])
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .strip_prefix("Id")
                    .and_then(|digits| digits.parse().ok())
                    .ok_or_else(|| SettingsError::MalformedElementId(token.to_owned()))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl fmt::Display for ElementIds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, id) in self.0.iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            write!(f, "Id{id}")?;
        }
        Ok(())
    }
}

/// Road axis as written in a job file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisGeometry {
    /// Polyline vertices.
    Points(Vec<Point>),
    /// Explicit contiguous segments.
    Segments(Vec<Segment>),
}

fn default_project_unit() -> LengthUnit {
    LengthUnit::Millimeter
}

fn default_kernel_unit() -> LengthUnit {
    LengthUnit::Foot
}

fn default_up() -> [f64; 3] {
    [0.0, 0.0, 1.0]
}

/// Complete description of one generation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JobFile {
    /// Road axis geometry in kernel units.
    pub road_axis: AxisGeometry,
    /// Host elements the road axis was taken from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub road_axis_ids: Option<String>,
    /// Section lines in kernel units.
    pub sections: Vec<Section>,
    /// Host elements the section lines were taken from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_ids: Option<String>,
    /// Beam offsets in project units.
    pub offsets: Vec<OffsetSpec>,
    /// Unit of the offset distances.
    #[serde(default = "default_project_unit")]
    pub project_unit: LengthUnit,
    /// Unit of the geometry.
    #[serde(default = "default_kernel_unit")]
    pub kernel_unit: LengthUnit,
    /// Vertical direction of the geometry.
    #[serde(default = "default_up")]
    pub up: [f64; 3],
    /// Offset point placement rule.
    #[serde(default)]
    pub placement: OffsetPlacement,
}

impl JobFile {
    /// Parse a job from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Parse`] when the text is not a valid job.
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a job file.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] when the file cannot be read and
    /// [`SettingsError::Parse`] when it is not a valid job.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        debug!("loaded job file {}", path.display());
        Self::from_json(&text)
    }

    /// Parsed road axis element identifiers, if any were recorded.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MalformedElementId`] for a malformed token.
    pub fn road_axis_element_ids(&self) -> Result<ElementIds, SettingsError> {
        parse_optional_ids(self.road_axis_ids.as_deref())
    }

    /// Parsed section line element identifiers, if any were recorded.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MalformedElementId`] for a malformed token.
    pub fn section_element_ids(&self) -> Result<ElementIds, SettingsError> {
        parse_optional_ids(self.section_ids.as_deref())
    }

    /// Build the generation inputs described by this job.
    ///
    /// Recorded element id lists are checked for well-formedness; a list whose
    /// length differs from the geometry it describes is logged as a warning.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Axis`] for an invalid road axis and
    /// [`SettingsError::MalformedElementId`] for a malformed id list.
    pub fn to_input(&self) -> Result<GenerationInput, SettingsError> {
        let axis = match &self.road_axis {
            AxisGeometry::Points(points) => PolyAxis::from_points(points)?,
            AxisGeometry::Segments(segments) => PolyAxis::new(segments.clone())?,
        };

        let section_ids = self.section_element_ids()?;
        if !section_ids.is_empty() && section_ids.as_slice().len() != self.sections.len() {
            warn!(
                "job lists {} section element ids for {} section lines",
                section_ids.as_slice().len(),
                self.sections.len()
            );
        }
        let axis_ids = self.road_axis_element_ids()?;
        if !axis_ids.is_empty() {
            debug!("road axis taken from elements {axis_ids}");
        }

        Ok(GenerationInput {
            axis,
            sections: self.sections.clone(),
            offsets: self.offsets.clone(),
            scale: LengthScale::between_units(self.project_unit, self.kernel_unit),
            up: Vector3::from(self.up),
            placement: self.placement,
        })
    }
}

fn parse_optional_ids(ids: Option<&str>) -> Result<ElementIds, SettingsError> {
    ids.map_or_else(|| Ok(ElementIds::default()), str::parse)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::axis::Extent;
    use crate::geometry::point;

    const JOB: &str = r#"{
        "road_axis": [[0, 0, 0], [10, 0, 0], [20, 0, 0]],
        "road_axis_ids": "Id101",
        "sections": [
            {"start": [5, -1, 0], "end": [5, 1, 0]},
            {"start": [15, -1, 0], "end": [15, 1, 0], "extent": "unbounded"}
        ],
        "section_ids": "Id201, Id202",
        "offsets": [{"name": "B1", "distance": 0}, {"name": "B2", "distance": 2000}],
        "project_unit": "millimeter",
        "kernel_unit": "meter"
    }"#;

    #[test]
    fn job_file_builds_generation_input() {
        let job = JobFile::from_json(JOB).expect("valid job");
        assert_eq!(job.placement, OffsetPlacement::AlongSection);
        assert_eq!(job.sections[1].extent, Extent::Unbounded);
        assert_eq!(job.section_element_ids().expect("valid ids").as_slice(), &[201, 202]);

        let input = job.to_input().expect("valid input");
        assert_eq!(input.axis.segment_count(), 2);
        assert_eq!(input.up, Vector3::z());
        assert_relative_eq!(input.scale.to_kernel(2_000.0), 2.0, epsilon = 1.0e-12);
    }

    #[test]
    fn axis_may_be_given_as_segments() {
        let job = JobFile::from_json(
            r#"{
                "road_axis": [{"start": [0, 0, 0], "end": [4, 0, 0]}],
                "sections": [],
                "offsets": []
            }"#,
        )
        .expect("valid job");
        assert_eq!(job.project_unit, LengthUnit::Millimeter);
        assert_eq!(job.kernel_unit, LengthUnit::Foot);
        let input = job.to_input().expect("valid input");
        assert_eq!(
            input.axis.segments(),
            &[Segment::new(point(0.0, 0.0, 0.0), point(4.0, 0.0, 0.0))]
        );
    }

    #[test]
    fn malformed_element_ids_are_rejected() {
        for text in ["Id12, 13", "Idx", "id5"] {
            let error = text.parse::<ElementIds>().expect_err("malformed");
            assert!(matches!(error, SettingsError::MalformedElementId(_)));
        }
        assert!("".parse::<ElementIds>().expect("empty is fine").is_empty());
    }

    #[test]
    fn broken_axis_is_reported() {
        let job = JobFile::from_json(
            r#"{"road_axis": [[0, 0, 0]], "sections": [], "offsets": []}"#,
        )
        .expect("valid json");
        assert!(matches!(job.to_input(), Err(SettingsError::Axis(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let error = JobFile::load(Path::new("/nonexistent/job.json")).expect_err("missing");
        assert!(matches!(error, SettingsError::Io { .. }));
    }
}
