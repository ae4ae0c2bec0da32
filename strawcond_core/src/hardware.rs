//! Query construction and row mapping for the quality-control panel table.

use crate::types::{Channel, ConditionField, PanelConditions, PanelLabel, PanelRecord};

/// Table holding per-panel hardware defects.
pub const DEFAULT_HARDWARE_TABLE: &str = "qc.panels";

/// One row of the panel table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HardwareRow {
    pub panel_id: i32,
    pub missing_straws: Vec<Channel>,
    pub missing_wires: Vec<Channel>,
}

/// Builds the panel defect query, restricted to `panel_ids` when non-empty.
///
/// Rows always come back ordered by panel id.
#[must_use]
pub fn build_hardware_query(table: &str, panel_ids: &[u32]) -> String {
    let mut query = format!("SELECT panel_id,missing_straws,missing_wires from {table}");
    if !panel_ids.is_empty() {
        query.push_str(" WHERE");
    }
    for (i, id) in panel_ids.iter().enumerate() {
        if i > 0 {
            query.push_str(" OR");
        }
        query.push_str(&format!(" panel_id = {id}"));
    }
    query.push_str(" ORDER BY panel_id ASC;");
    query
}

/// Keys rows by `MN%03d` label. A repeated panel id keeps the last row.
pub fn hardware_conditions(rows: impl IntoIterator<Item = HardwareRow>) -> PanelConditions {
    rows.into_iter()
        .map(|row| {
            let record = PanelRecord::new()
                .with_field(ConditionField::MissingStraws, row.missing_straws)
                .with_field(ConditionField::MissingWires, row.missing_wires);
            (PanelLabel::from_id(i64::from(row.panel_id)), record)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfiltered_query_selects_every_panel() {
        assert_eq!(
            build_hardware_query(DEFAULT_HARDWARE_TABLE, &[]),
            "SELECT panel_id,missing_straws,missing_wires from qc.panels ORDER BY panel_id ASC;"
        );
    }

    #[test]
    fn filtered_query_chains_equality_predicates() {
        assert_eq!(
            build_hardware_query(DEFAULT_HARDWARE_TABLE, &[12, 3, 12]),
            "SELECT panel_id,missing_straws,missing_wires from qc.panels \
             WHERE panel_id = 12 OR panel_id = 3 OR panel_id = 12 ORDER BY panel_id ASC;"
        );
    }

    #[test]
    fn single_id_has_no_disjunction() {
        let query = build_hardware_query("qc.test_panels", &[5]);
        assert!(query.contains("from qc.test_panels WHERE panel_id = 5 ORDER BY"));
        assert!(!query.contains(" OR"));
    }

    #[test]
    fn rows_are_keyed_by_padded_label() {
        let conditions = hardware_conditions(vec![
            HardwareRow {
                panel_id: 5,
                missing_straws: vec![3, 7],
                missing_wires: vec![],
            },
            HardwareRow {
                panel_id: 250,
                missing_straws: vec![],
                missing_wires: vec![11],
            },
        ]);

        let mn005 = &conditions[&PanelLabel::new("MN005")];
        assert_eq!(mn005.get(ConditionField::MissingStraws), Some(&[3, 7][..]));
        assert_eq!(mn005.get(ConditionField::MissingWires), Some(&[][..]));
        assert_eq!(mn005.get(ConditionField::ReadoutDisabled), None);
        assert_eq!(
            conditions[&PanelLabel::new("MN250")].get(ConditionField::MissingWires),
            Some(&[11][..])
        );
    }
}
