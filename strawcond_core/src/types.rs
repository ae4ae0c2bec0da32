//! Domain types shared by every stage of the conditions pipeline.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::error::{ConditionError, Result};

/// Straw channel index within a panel.
pub type Channel = i32;

/// Lowest panel id covered by the default allow-list.
pub const FIRST_PANEL_ID: i64 = 1;
/// Highest panel id covered by the default allow-list.
pub const LAST_PANEL_ID: i64 = 999;

const LABEL_PREFIX: &str = "MN";

/// Canonical panel identifier, `MN` followed by a zero-padded number.
///
/// Labels read from the run configuration are taken verbatim, so a label is
/// not guaranteed to follow the canonical format.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelLabel(String);

impl PanelLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Label for a numeric panel id, zero-padded to width 3.
    #[must_use]
    pub fn from_id(id: i64) -> Self {
        Self(format!("{LABEL_PREFIX}{id:03}"))
    }

    /// Numeric panel id, when the label is in canonical form.
    #[must_use]
    pub fn panel_id(&self) -> Option<u32> {
        let digits = self.0.strip_prefix(LABEL_PREFIX)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PanelLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parses a panel selector: either a bare id (`5`) or a label (`MN005`, `MN5`).
impl FromStr for PanelLabel {
    type Err = ConditionError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix(LABEL_PREFIX).unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConditionError::InvalidPanelSelector(s.to_string()));
        }
        digits
            .parse::<i64>()
            .map(Self::from_id)
            .map_err(|_| ConditionError::InvalidPanelSelector(s.to_string()))
    }
}

/// Field names a panel record may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionField {
    ReadoutDisabled,
    MissingStraws,
    MissingWires,
}

impl ConditionField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReadoutDisabled => "readout_disabled",
            Self::MissingStraws => "missing_straws",
            Self::MissingWires => "missing_wires",
        }
    }
}

impl fmt::Display for ConditionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-panel channel lists, keyed by field. A record accumulates fields from
/// the configuration tree and the hardware store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PanelRecord(BTreeMap<ConditionField, Vec<Channel>>);

impl PanelRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_field(mut self, field: ConditionField, channels: Vec<Channel>) -> Self {
        self.0.insert(field, channels);
        self
    }

    #[must_use]
    pub fn get(&self, field: ConditionField) -> Option<&[Channel]> {
        self.0.get(&field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = ConditionField> + '_ {
        self.0.keys().copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copies every field of `other` over `self`; `other` wins on collision.
    #[must_use]
    pub fn overlay(mut self, other: &Self) -> Self {
        for (field, channels) in &other.0 {
            self.0.insert(*field, channels.clone());
        }
        self
    }
}

/// Panel records keyed (and therefore ordered) by label.
pub type PanelConditions = BTreeMap<PanelLabel, PanelRecord>;

/// Labels permitted to reach the output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedSet(BTreeSet<PanelLabel>);

impl AllowedSet {
    /// Every canonical label from `MN001` through `MN999`.
    #[must_use]
    pub fn full_range() -> Self {
        (FIRST_PANEL_ID..=LAST_PANEL_ID)
            .map(PanelLabel::from_id)
            .collect()
    }

    #[must_use]
    pub fn contains(&self, label: &PanelLabel) -> bool {
        self.0.contains(label)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PanelLabel> {
        self.0.iter()
    }
}

impl FromIterator<PanelLabel> for AllowedSet {
    fn from_iter<I: IntoIterator<Item = PanelLabel>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Position of a panel in the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinate {
    pub plane: u32,
    pub panel: u32,
}

/// Panel label to detector coordinate lookup.
#[derive(Debug, Clone, Default)]
pub struct GeographicMap(HashMap<PanelLabel, Coordinate>);

impl GeographicMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the coordinate previously stored for `label`, if any.
    pub fn insert(&mut self, label: PanelLabel, coordinate: Coordinate) -> Option<Coordinate> {
        self.0.insert(label, coordinate)
    }

    pub fn locate(&self, label: &PanelLabel) -> Result<Coordinate> {
        self.0
            .get(label)
            .copied()
            .ok_or_else(|| ConditionError::UnmappedPanel(label.clone()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(PanelLabel, Coordinate)> for GeographicMap {
    fn from_iter<I: IntoIterator<Item = (PanelLabel, Coordinate)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One output label and the record field it draws channels from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub label: String,
    pub field: ConditionField,
}

/// A named output table level and its entries, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLevel {
    pub level: String,
    pub labels: Vec<StatusEntry>,
}

/// Declares how merged fields become output rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusScheme(Vec<StatusLevel>);

impl StatusScheme {
    #[must_use]
    pub const fn new(levels: Vec<StatusLevel>) -> Self {
        Self(levels)
    }

    /// Long-lived hardware defects and run-level readout masking.
    #[must_use]
    pub fn offline() -> Self {
        let entry = |label: &str, field| StatusEntry {
            label: label.to_string(),
            field,
        };
        Self(vec![
            StatusLevel {
                level: "TrkStrawStatusLong".to_string(),
                labels: vec![
                    entry("Absent", ConditionField::MissingStraws),
                    entry("NoWire", ConditionField::MissingWires),
                ],
            },
            StatusLevel {
                level: "TrkStrawStatusShort".to_string(),
                labels: vec![entry("Disabled", ConditionField::ReadoutDisabled)],
            },
        ])
    }

    pub fn levels(&self) -> impl Iterator<Item = &StatusLevel> {
        self.0.iter()
    }
}

impl Default for StatusScheme {
    fn default() -> Self {
        Self::offline()
    }
}
