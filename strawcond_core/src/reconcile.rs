use std::borrow::Cow;

use crate::types::{AllowedSet, PanelConditions, PanelRecord};

/// Merges the two partial records for one panel.
///
/// Readout fields are copied first and hardware fields second, so the
/// hardware record wins if both carry the same field.
#[must_use]
pub fn merge_record(readout: Option<&PanelRecord>, hardware: Option<&PanelRecord>) -> PanelRecord {
    [readout, hardware]
        .into_iter()
        .flatten()
        .fold(PanelRecord::new(), PanelRecord::overlay)
}

/// Joins readout and hardware conditions by label.
///
/// Keeps every label present in either input that is also allowed; `None`
/// allows the full `MN001`..`MN999` range.
#[must_use]
pub fn reconcile(
    readout: &PanelConditions,
    hardware: &PanelConditions,
    allowed: Option<&AllowedSet>,
) -> PanelConditions {
    let allowed = allowed.map_or_else(|| Cow::Owned(AllowedSet::full_range()), Cow::Borrowed);

    readout
        .keys()
        .chain(hardware.keys())
        .filter(|label| allowed.contains(label))
        .map(|label| {
            (
                label.clone(),
                merge_record(readout.get(label), hardware.get(label)),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ConditionField, PanelLabel};

    fn readout(entries: &[(&str, Vec<i32>)]) -> PanelConditions {
        entries
            .iter()
            .map(|(label, disabled)| {
                (
                    PanelLabel::new(*label),
                    PanelRecord::new().with_field(ConditionField::ReadoutDisabled, disabled.clone()),
                )
            })
            .collect()
    }

    fn hardware(entries: &[(&str, Vec<i32>, Vec<i32>)]) -> PanelConditions {
        entries
            .iter()
            .map(|(label, straws, wires)| {
                (
                    PanelLabel::new(*label),
                    PanelRecord::new()
                        .with_field(ConditionField::MissingStraws, straws.clone())
                        .with_field(ConditionField::MissingWires, wires.clone()),
                )
            })
            .collect()
    }

    #[test]
    fn single_source_labels_keep_only_their_fields() {
        let merged = reconcile(
            &readout(&[("MN001", vec![4])]),
            &hardware(&[("MN002", vec![1], vec![2])]),
            None,
        );

        let mn001: Vec<_> = merged[&PanelLabel::new("MN001")].fields().collect();
        assert_eq!(mn001, [ConditionField::ReadoutDisabled]);
        let mn002: Vec<_> = merged[&PanelLabel::new("MN002")].fields().collect();
        assert_eq!(
            mn002,
            [ConditionField::MissingStraws, ConditionField::MissingWires]
        );
    }

    #[test]
    fn shared_labels_take_the_union_of_fields() {
        let merged = reconcile(
            &readout(&[("MN010", vec![0, 1])]),
            &hardware(&[("MN010", vec![5], vec![])]),
            None,
        );

        let record = &merged[&PanelLabel::new("MN010")];
        assert_eq!(record.get(ConditionField::ReadoutDisabled), Some(&[0, 1][..]));
        assert_eq!(record.get(ConditionField::MissingStraws), Some(&[5][..]));
        assert_eq!(record.get(ConditionField::MissingWires), Some(&[][..]));
    }

    #[test]
    fn disallowed_labels_are_dropped_even_when_in_both_sources() {
        let allowed: AllowedSet = [PanelLabel::new("MN001")].into_iter().collect();
        let merged = reconcile(
            &readout(&[("MN001", vec![]), ("MN002", vec![3])]),
            &hardware(&[("MN001", vec![], vec![]), ("MN002", vec![1], vec![1])]),
            Some(&allowed),
        );

        assert_eq!(merged.len(), 1);
        assert!(merged.contains_key(&PanelLabel::new("MN001")));
    }

    #[test]
    fn allowed_labels_absent_from_both_sources_do_not_appear() {
        let allowed: AllowedSet = ["MN001", "MN002", "MN003"]
            .into_iter()
            .map(PanelLabel::new)
            .collect();
        let merged = reconcile(&readout(&[("MN002", vec![])]), &PanelConditions::new(), Some(&allowed));

        let labels: Vec<_> = merged.keys().map(PanelLabel::as_str).collect();
        assert_eq!(labels, ["MN002"]);
    }

    #[test]
    fn default_allow_list_drops_non_canonical_labels() {
        let merged = reconcile(
            &readout(&[("MN000", vec![]), ("MN1000", vec![]), ("spare", vec![]), ("MN999", vec![])]),
            &PanelConditions::new(),
            None,
        );

        let labels: Vec<_> = merged.keys().map(PanelLabel::as_str).collect();
        assert_eq!(labels, ["MN999"]);
    }

    #[test]
    fn hardware_wins_on_field_collision() {
        let first = PanelRecord::new().with_field(ConditionField::MissingStraws, vec![1]);
        let second = PanelRecord::new().with_field(ConditionField::MissingStraws, vec![2]);
        let merged = merge_record(Some(&first), Some(&second));
        assert_eq!(merged.get(ConditionField::MissingStraws), Some(&[2][..]));
    }

    #[test]
    fn inputs_are_left_untouched() {
        let nav = readout(&[("MN004", vec![8])]);
        let hw = hardware(&[("MN004", vec![9], vec![])]);
        let before = (nav.clone(), hw.clone());
        let _ = reconcile(&nav, &hw, None);
        assert_eq!((nav, hw), before);
    }
}
