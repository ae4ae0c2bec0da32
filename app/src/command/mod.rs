//! Output strategies for the collected conditions.
//!
//! Every strategy runs the same collection (archive, then hardware store,
//! then reconciliation) and differs only in what it writes to stdout.

use std::path::PathBuf;
use strawcond_config::RunConfig;
use strawcond_core::{ConditionRequest, PanelConditions, PanelLabel, collect_conditions};
use strawcond_sources::{HardwareStore, MidasArchive};
use tracing::info;

mod json;
mod table;

pub use json::JsonStrategy;
pub use table::TableStrategy;

/// Command-line inputs shared by every strategy.
#[derive(Debug, Clone)]
pub struct RunInput {
    pub run: u32,
    /// Explicit panel selection; `None` selects every panel
    pub panels: Option<Vec<PanelLabel>>,
    pub mapping: PathBuf,
    pub config: PathBuf,
}

/// Contract for one way of presenting a run's conditions.
pub trait CommandStrategy: Send + Sync + 'static {
    type Input;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Collects the reconciled conditions for `input.run`.
async fn gather_conditions(config: &RunConfig, input: &RunInput) -> anyhow::Result<PanelConditions> {
    let archive = MidasArchive::new(&config.midas);
    let store = HardwareStore::new(&config.hardware);

    match &input.panels {
        Some(panels) => info!("Collecting run {} for {} selected panels", input.run, panels.len()),
        None => info!("Collecting run {} for all panels", input.run),
    }

    let request = ConditionRequest {
        run: input.run,
        panels: input.panels.as_deref(),
        tree_path: &config.midas.tree_path,
    };
    collect_conditions(&archive, &store, &request).await
}
