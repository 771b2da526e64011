#![warn(clippy::all)]
#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod axis;
mod errors;
mod frame;
mod geometry;
mod settings;
mod station;
mod synthesis;
mod units;

pub use axis::{AxisHit, Extent, PolyAxis, Section};
pub use errors::{AxisError, ConfigurationError, GenerationError, SettingsError};
pub use frame::{build_frames, Frame};
pub use geometry::{point, segment, Point, Segment, TOLERANCE};
pub use settings::{AxisGeometry, ElementIds, JobFile};
pub use station::{order_stations, Station};
pub use synthesis::{
    generate, generate_with_frames, synthesize, BeamAxisSegment, Generation, GenerationInput,
    OffsetPlacement, OffsetSpec,
};
pub use units::{LengthScale, LengthUnit};
