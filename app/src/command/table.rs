use anyhow::Context;
use strawcond_config::{RunConfig, load_geographic_map};
use strawcond_core::{render_table, write_lines};
use tracing::info;

use super::{RunInput, gather_conditions};

/// Strategy for writing the offline status table.
///
/// The table is rendered in full before anything is written, so a panel
/// missing from the geographic map produces no output at all.
#[derive(Debug, Clone, Copy)]
pub struct TableStrategy;

impl super::CommandStrategy for TableStrategy {
    type Input = RunInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = RunConfig::load(&input.config)?;
        let geography = load_geographic_map(&input.mapping)?;

        let conditions = gather_conditions(&config, &input).await?;
        let lines = render_table(&conditions, &geography, &config.status_levels)?;
        info!("Writing {} table lines", lines.len());

        write_lines(&lines, std::io::stdout().lock()).context("Cannot write status table")
    }
}
