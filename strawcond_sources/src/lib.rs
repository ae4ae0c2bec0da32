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

mod archive;
mod command;
mod store;

pub use archive::{MidasArchive, decompress_frame};
pub use command::{CommandSpec, capture_stdout, remote_cat};
pub use store::HardwareStore;
