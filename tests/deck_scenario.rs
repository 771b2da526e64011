#![warn(clippy::pedantic)]

use approx::assert_relative_eq;
use beamaxis::{
    generate, generate_with_frames, point, segment, GenerationError, GenerationInput,
    JobFile, OffsetSpec, PolyAxis, Section,
};
use nalgebra::Vector3;

#[derive(Debug, Clone, Copy)]
struct DeckProperties {
    span_start: f64,
    span_end: f64,
    half_width: f64,
}

impl Default for DeckProperties {
    fn default() -> Self {
        Self {
            span_start: 5.0,
            span_end: 15.0,
            half_width: 1.0,
        }
    }
}

fn build_two_segment_axis() -> PolyAxis {
    PolyAxis::from_points(&[
        point(0.0, 0.0, 0.0),
        point(10.0, 0.0, 0.0),
        point(20.0, 0.0, 0.0),
    ])
    .expect("collinear segments form a valid axis")
}

fn section_at(x: f64, half_width: f64) -> Section {
    Section::bounded(segment(point(x, -half_width, 0.0), point(x, half_width, 0.0)))
}

fn build_deck(offsets: Vec<OffsetSpec>) -> GenerationInput {
    let properties = DeckProperties::default();
    GenerationInput::new(
        build_two_segment_axis(),
        vec![
            section_at(properties.span_start, properties.half_width),
            section_at(properties.span_end, properties.half_width),
        ],
        offsets,
    )
}

#[test]
fn two_station_deck_matches_hand_calculation() {
    let input = build_deck(vec![OffsetSpec::new("B1", 0.0), OffsetSpec::new("B2", 2.0)]);
    let generation = generate_with_frames(&input).expect("deck generates");

    assert_eq!(generation.frames.len(), 2);
    let first = input
        .axis
        .point_at_parameter(generation.frames[0].station.parameter)
        .expect("parameter on axis");
    let second = input
        .axis
        .point_at_parameter(generation.frames[1].station.parameter)
        .expect("parameter on axis");
    assert_relative_eq!(first.x, 5.0, epsilon = 1.0e-9);
    assert_relative_eq!(second.x, 15.0, epsilon = 1.0e-9);
    for frame in &generation.frames {
        assert_relative_eq!(frame.transverse, Vector3::y(), epsilon = 1.0e-12);
    }

    let beams = &generation.beams;
    assert_eq!(beams.len(), 2);
    assert_eq!(beams[0].offset.name, "B1");
    assert_eq!(beams[0].segment, segment(point(5.0, 0.0, 0.0), point(15.0, 0.0, 0.0)));
    assert_eq!(beams[1].offset.name, "B2");
    assert_eq!(beams[1].segment, segment(point(5.0, 2.0, 0.0), point(15.0, 2.0, 0.0)));
}

#[test]
fn section_outside_the_axis_aborts_generation() {
    let mut input = build_deck(vec![OffsetSpec::new("B1", 0.0)]);
    input.sections.push(section_at(25.0, 1.0));

    let error = generate(&input).expect_err("x = 25 lies beyond the axis");
    assert_eq!(error, GenerationError::NoIntersection { section: 2 });
}

#[test]
fn displacement_is_linear_in_offset_distance() {
    let skewed = |offsets| {
        let mut input = build_deck(offsets);
        input.sections = vec![
            Section::bounded(segment(point(4.0, -1.0, 0.0), point(6.0, 1.0, 0.0))),
            Section::bounded(segment(point(16.0, 2.0, 0.0), point(14.0, -2.0, 0.0))),
        ];
        input
    };
    let single = generate(&skewed(vec![OffsetSpec::new("B", 1.5)])).expect("valid");
    let double = generate(&skewed(vec![OffsetSpec::new("B", 3.0)])).expect("valid");
    let axis_start = Vector3::new(5.0, 0.0, 0.0);
    let axis_end = Vector3::new(15.0, 0.0, 0.0);

    let single_start = single[0].segment.start.to_vector() - axis_start;
    let double_start = double[0].segment.start.to_vector() - axis_start;
    assert_relative_eq!(double_start, single_start * 2.0, epsilon = 1.0e-12);

    let single_end = single[0].segment.end.to_vector() - axis_end;
    let double_end = double[0].segment.end.to_vector() - axis_end;
    assert_relative_eq!(double_end, single_end * 2.0, epsilon = 1.0e-12);
    assert!(single_start.y > 0.0 && single_end.y > 0.0);
}

#[test]
fn fewer_than_two_stations_is_not_an_error() {
    let mut input = build_deck(vec![OffsetSpec::new("B1", 0.0)]);
    input.sections.truncate(1);
    assert!(generate(&input).expect("one station is fine").is_empty());

    input.sections.clear();
    assert!(generate(&input).expect("no station is fine").is_empty());
}

#[test]
fn job_file_runs_end_to_end() {
    let job = JobFile::from_json(
        r#"{
            "road_axis": [[0, 0, 0], [10, 0, 0], [20, 0, 0]],
            "road_axis_ids": "Id11, Id12",
            "sections": [
                {"start": [15, 1, 0], "end": [15, -1, 0]},
                {"start": [5, -1, 0], "end": [5, 1, 0]}
            ],
            "section_ids": "Id21, Id22",
            "offsets": [{"name": "B1", "distance": -1500}, {"name": "B2", "distance": 1500}],
            "project_unit": "millimeter",
            "kernel_unit": "meter"
        }"#,
    )
    .expect("valid job");
    let beams = generate(&job.to_input().expect("valid input")).expect("deck generates");

    assert_eq!(beams.len(), 2);
    assert_relative_eq!(beams[0].segment.start.y, -1.5, epsilon = 1.0e-12);
    assert_relative_eq!(beams[1].segment.end.to_vector(), Vector3::new(15.0, 1.5, 0.0), epsilon = 1.0e-12);
}
