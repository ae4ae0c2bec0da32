use async_trait::async_trait;
use tracing::info;

use crate::extract::parse_config_tree;
use crate::hardware::{HardwareRow, hardware_conditions};
use crate::navigate::readout_conditions_at;
use crate::reconcile::reconcile;
use crate::types::{AllowedSet, PanelConditions, PanelLabel};

/// Supplies the decompressed run configuration payload.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    async fn fetch_payload(&self, run: u32) -> anyhow::Result<Vec<u8>>;
}

/// Supplies panel rows from the hardware store, restricted to `panel_ids`
/// when non-empty.
#[async_trait]
pub trait HardwareSource: Send + Sync {
    async fn fetch_rows(&self, panel_ids: &[u32]) -> anyhow::Result<Vec<HardwareRow>>;
}

/// What to collect: the run, an optional panel selection, and where the
/// detector node lives in the configuration tree.
#[derive(Debug, Clone)]
pub struct ConditionRequest<'a> {
    pub run: u32,
    pub panels: Option<&'a [PanelLabel]>,
    pub tree_path: &'a [String],
}

impl ConditionRequest<'_> {
    /// Panel ids for the hardware filter, in label order.
    #[must_use]
    pub fn panel_ids(&self) -> Vec<u32> {
        let mut labels: Vec<&PanelLabel> = self.panels.unwrap_or_default().iter().collect();
        labels.sort();
        labels.into_iter().filter_map(PanelLabel::panel_id).collect()
    }

    #[must_use]
    pub fn allowed(&self) -> Option<AllowedSet> {
        self.panels.map(|labels| labels.iter().cloned().collect())
    }
}

/// Fetches both sources once, in sequence, and reconciles them.
pub async fn collect_conditions<C, H>(
    config: &C,
    hardware: &H,
    request: &ConditionRequest<'_>,
) -> anyhow::Result<PanelConditions>
where
    C: ConfigSource + ?Sized,
    H: HardwareSource + ?Sized,
{
    let payload = config.fetch_payload(request.run).await?;
    let tree = parse_config_tree(&payload)?;
    let readout = readout_conditions_at(&tree, request.tree_path)?;
    info!("Recovered readout masks for {} panels", readout.len());

    let rows = hardware.fetch_rows(&request.panel_ids()).await?;
    let defects = hardware_conditions(rows);
    info!("Recovered hardware defects for {} panels", defects.len());

    let merged = reconcile(&readout, &defects, request.allowed().as_ref());
    info!("Reconciled conditions for {} panels", merged.len());
    Ok(merged)
}
