//! Readout-mask recovery from the run configuration tree.
//!
//! Below the detector node the tree is keyed by station, then plane, then
//! panel. Keys that do not match the naming pattern of their level are
//! skipped.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;
use tracing::debug;

use crate::error::{ConditionError, Result};
use crate::types::{Channel, ConditionField, PanelConditions, PanelLabel, PanelRecord};

/// Channels per panel readout mask.
pub const MASK_CHANNELS: usize = 96;

/// Keys leading from the tree root to the station-keyed detector node.
pub const DEFAULT_TREE_PATH: [&str; 4] = ["Mu2e", "RunConfigurations", "train_station", "Tracker"];

const NAME_KEY: &str = "Name";
const MASK_KEY: &str = "ch_mask";

static STATION_PATTERN: OnceLock<Regex> = OnceLock::new();
static PLANE_PATTERN: OnceLock<Regex> = OnceLock::new();
static PANEL_PATTERN: OnceLock<Regex> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("Static regex pattern is guaranteed to be valid"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TreeLevel {
    Station,
    Plane,
    Panel,
}

impl TreeLevel {
    fn pattern(self) -> &'static Regex {
        match self {
            Self::Station => compiled(&STATION_PATTERN, r"^Station_0{2}"),
            Self::Plane => compiled(&PLANE_PATTERN, r"^Plane_[0-9]{2}"),
            Self::Panel => compiled(&PANEL_PATTERN, r"^Panel_[0-9]{2}"),
        }
    }

    fn accepts(self, key: &str) -> bool {
        self.pattern().is_match(key)
    }

    const fn below(self) -> Option<Self> {
        match self {
            Self::Station => Some(Self::Plane),
            Self::Plane => Some(Self::Panel),
            Self::Panel => None,
        }
    }
}

/// A panel node reached by the descent, not yet validated.
#[derive(Debug)]
struct PanelNode<'a> {
    label: PanelLabel,
    mask: Option<&'a Value>,
}

/// Result of stepping into one accepted key.
enum Step<'a> {
    Descend(TreeLevel, &'a Map<String, Value>, String),
    Panel(PanelNode<'a>),
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| ConditionError::UnexpectedType {
        path: path.to_string(),
        expected: "an object",
    })
}

fn step<'a>(level: TreeLevel, value: &'a Value, path: String) -> Result<Step<'a>> {
    let node = as_object(value, &path)?;
    if let Some(next) = level.below() {
        return Ok(Step::Descend(next, node, path));
    }

    let name = node.get(NAME_KEY).ok_or_else(|| ConditionError::MissingKey {
        path: path.clone(),
        key: NAME_KEY.to_string(),
    })?;
    let label = name
        .as_str()
        .map(PanelLabel::new)
        .ok_or_else(|| ConditionError::UnexpectedType {
            path: format!("{path}/{NAME_KEY}"),
            expected: "a string",
        })?;

    Ok(Step::Panel(PanelNode {
        label,
        mask: node.get(MASK_KEY),
    }))
}

fn walk<'a>(
    level: TreeLevel,
    node: &'a Map<String, Value>,
    path: &str,
    panels: &mut Vec<PanelNode<'a>>,
) -> Result<()> {
    for (key, value) in node.iter().filter(|(key, _)| level.accepts(key)) {
        match step(level, value, format!("{path}/{key}"))? {
            Step::Descend(next, child, child_path) => walk(next, child, &child_path, panels)?,
            Step::Panel(panel) => panels.push(panel),
        }
    }
    Ok(())
}

/// Follows `path` from the root, requiring an object at every step.
fn descend_path<'a, S: AsRef<str>>(
    tree: &'a Value,
    path: &[S],
) -> Result<&'a Map<String, Value>> {
    let mut node = as_object(tree, "")?;
    let mut walked = String::new();
    for key in path {
        let key = key.as_ref();
        let child = node.get(key).ok_or_else(|| ConditionError::MissingKey {
            path: walked.clone(),
            key: key.to_string(),
        })?;
        walked.push('/');
        walked.push_str(key);
        node = as_object(child, &walked)?;
    }
    Ok(node)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|x| x.abs() > 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// Indices of the channels a readout mask leaves disabled, ascending.
pub fn disabled_channels(label: &PanelLabel, mask: Option<&Value>) -> Result<Vec<Channel>> {
    let malformed = |detail: String| ConditionError::MalformedMask {
        label: label.clone(),
        detail,
    };
    let entries = mask
        .ok_or_else(|| malformed(format!("missing '{MASK_KEY}'")))?
        .as_array()
        .ok_or_else(|| malformed(format!("'{MASK_KEY}' is not an array")))?;
    if entries.len() != MASK_CHANNELS {
        return Err(malformed(format!(
            "expected {MASK_CHANNELS} channels, found {}",
            entries.len()
        )));
    }

    Ok((0..)
        .zip(entries)
        .filter(|(_, enabled)| !is_truthy(enabled))
        .map(|(channel, _)| channel)
        .collect())
}

/// Readout-disabled channels per panel, below the default detector path.
pub fn readout_conditions(tree: &Value) -> Result<PanelConditions> {
    readout_conditions_at(tree, &DEFAULT_TREE_PATH)
}

/// Readout-disabled channels per panel, below the detector node at `path`.
///
/// Fails on the first repeated panel name or malformed mask, in traversal
/// order.
pub fn readout_conditions_at<S: AsRef<str>>(tree: &Value, path: &[S]) -> Result<PanelConditions> {
    let detector = descend_path(tree, path)?;
    let root: String = path.iter().map(|k| format!("/{}", k.as_ref())).collect();

    let mut panels = Vec::new();
    walk(TreeLevel::Station, detector, &root, &mut panels)?;
    debug!("Found {} panel nodes under '{}'", panels.len(), root);

    panels
        .into_iter()
        .try_fold(PanelConditions::new(), |mut conditions, panel| {
            if conditions.contains_key(&panel.label) {
                return Err(ConditionError::DuplicateLabel(panel.label));
            }
            let disabled = disabled_channels(&panel.label, panel.mask)?;
            conditions.insert(
                panel.label,
                PanelRecord::new().with_field(ConditionField::ReadoutDisabled, disabled),
            );
            Ok(conditions)
        })
}
