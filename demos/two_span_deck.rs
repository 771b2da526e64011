use beamaxis::{generate, point, segment, GenerationInput, LengthScale, OffsetSpec, PolyAxis, Section};
use uom::si::length::{meter, millimeter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Road axis with a gentle bend after the first span
    let axis = PolyAxis::from_points(&[
        point(0.0, 0.0, 0.0),
        point(30.0, 0.0, 0.0),
        point(60.0, 3.0, 0.0),
    ])?;

    // Section lines at the piers, drawn in both directions
    let sections = vec![
        Section::bounded(segment(point(2.0, -6.0, 0.0), point(2.0, 6.0, 0.0))),
        Section::bounded(segment(point(30.5, 6.0, 0.0), point(29.5, -6.0, 0.0))),
        Section::bounded(segment(point(57.0, -6.0, 0.0), point(58.0, 8.0, 0.0))),
    ];

    // Girder offsets in millimetres, geometry in metres
    let offsets = vec![
        OffsetSpec::new("G1", -3_000.0),
        OffsetSpec::new("G2", 0.0),
        OffsetSpec::new("G3", 3_000.0),
    ];
    let mut input = GenerationInput::new(axis, sections, offsets);
    input.scale = LengthScale::between::<millimeter, meter>();

    for beam in generate(&input)? {
        let (start, end) = (beam.segment.start, beam.segment.end);
        println!(
            "span {} {}: ({:.3}, {:.3}) -> ({:.3}, {:.3})",
            beam.pair_index, beam.offset.name, start.x, start.y, end.x, end.y
        );
    }

    Ok(())
}
