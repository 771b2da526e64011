mod report;

use beamaxis::{generate_with_frames, JobFile};
use report::render_summary;
use std::error::Error;
use std::path::PathBuf;

const USAGE: &str = "usage: beamaxis <job.json> [--json]";

fn main() -> Result<(), Box<dyn Error>> {
    // Log at info by default; RUST_LOG still overrides the level.
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // One positional job path plus the optional output switch.
    let mut job_path: Option<PathBuf> = None;
    let mut as_json = false;
    for argument in std::env::args().skip(1) {
        match argument.as_str() {
            "--json" => as_json = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            _ if job_path.is_none() => job_path = Some(PathBuf::from(argument)),
            _ => return Err(USAGE.into()),
        }
    }
    let job_path = job_path.ok_or(USAGE)?;

    // Load the job file and turn it into generation inputs. The job file
    // stands in for the host selection: axis, sections and offsets.
    let job = JobFile::load(&job_path)?;
    let input = job.to_input()?;
    log::info!(
        "beamaxis v{}: {} sections, {} offsets from {}",
        env!("CARGO_PKG_VERSION"),
        input.sections.len(),
        input.offsets.len(),
        job_path.display()
    );

    // Locate the sections, orient them and connect the offset points. Any
    // failing section aborts the run; nothing is printed in that case.
    let generation = generate_with_frames(&input)?;

    // Print either the raw beam axes for other tools or a report a person can
    // check against the drawing.
    if as_json {
        println!("{}", serde_json::to_string_pretty(&generation.beams)?);
    } else {
        println!("{}", render_summary(&input.axis, &generation));
    }

    Ok(())
}
