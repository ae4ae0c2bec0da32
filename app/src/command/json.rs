use anyhow::Context;
use std::io::Write;
use strawcond_config::RunConfig;

use super::{RunInput, gather_conditions};

/// Strategy for dumping the merged per-panel records as JSON.
#[derive(Debug, Clone, Copy)]
pub struct JsonStrategy;

impl super::CommandStrategy for JsonStrategy {
    type Input = RunInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = RunConfig::load(&input.config)?;
        let conditions = gather_conditions(&config, &input).await?;

        let rendered = serde_json::to_string_pretty(&conditions)?;
        let mut out = std::io::stdout().lock();
        writeln!(out, "{rendered}").context("Cannot write conditions")
    }
}
