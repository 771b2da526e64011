use beamaxis::{Generation, PolyAxis};
use std::fmt::Write;

/// Render a textual summary of a generation run.
///
/// Stations are listed in travel order with their chainage so the numbers can
/// be checked against the drawing before the beam axes are committed.
#[must_use]
pub fn render_summary(axis: &PolyAxis, generation: &Generation) -> String {
    let mut output = String::new();

    // Describe the road axis first so chainages below have a reference.
    writeln!(
        &mut output,
        "Road axis: {} segments, length {:.3}",
        axis.segment_count(),
        axis.length()
    )
    .expect("writing to string cannot fail");

    // Stations in travel order. The transverse direction shows which side the
    // positive offsets land on.
    writeln!(&mut output, "Stations ({}):", generation.frames.len())
        .expect("writing to string cannot fail");
    for (position, frame) in generation.frames.iter().enumerate() {
        let station = &frame.station;
        let chainage = axis.chainage(station.parameter).unwrap_or(f64::NAN);
        writeln!(
            &mut output,
            "  {position:>3}: section {:>3} at chainage {chainage:>10.3} ({:.3}, {:.3}, {:.3}), transverse ({:+.4}, {:+.4}, {:+.4})",
            station.input_index,
            station.point.x,
            station.point.y,
            station.point.z,
            frame.transverse.x,
            frame.transverse.y,
            frame.transverse.z,
        )
        .expect("writing to string cannot fail");
    }

    // One line per generated centerline, grouped by span then offset.
    writeln!(&mut output, "Beam axes ({}):", generation.beams.len())
        .expect("writing to string cannot fail");
    for beam in &generation.beams {
        let (start, end) = (beam.segment.start, beam.segment.end);
        writeln!(
            &mut output,
            "  span {:>3} {:<8} ({:.3}, {:.3}, {:.3}) -> ({:.3}, {:.3}, {:.3})",
            beam.pair_index, beam.offset.name, start.x, start.y, start.z, end.x, end.y, end.z
        )
        .expect("writing to string cannot fail");
    }

    // A single section is valid input but produces nothing to draw.
    if generation.beams.is_empty() {
        output.push_str("No beam axes: at least two sections are required\n");
    }

    output
}
