#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod geography;
mod schema;
mod template;

pub use geography::{GeographyRecord, geographic_map, load_geographic_map};
pub use schema::{HardwareConfig, MidasConfig, RunConfig};
pub use template::render_run_pattern;
