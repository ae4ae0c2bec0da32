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

pub mod emit;
pub mod error;
pub mod extract;
pub mod hardware;
pub mod navigate;
mod pipeline;
pub mod reconcile;
pub mod types;

pub use emit::{render_table, write_lines};
pub use error::{ConditionError, Result};
pub use extract::{HEADER_LEN, extract_object, parse_config_tree};
pub use hardware::{DEFAULT_HARDWARE_TABLE, HardwareRow, build_hardware_query, hardware_conditions};
pub use navigate::{DEFAULT_TREE_PATH, MASK_CHANNELS, readout_conditions, readout_conditions_at};
pub use pipeline::{ConditionRequest, ConfigSource, HardwareSource, collect_conditions};
pub use reconcile::{merge_record, reconcile};
pub use types::{
    AllowedSet, Channel, ConditionField, Coordinate, GeographicMap, PanelConditions, PanelLabel,
    PanelRecord, StatusEntry, StatusLevel, StatusScheme,
};
