use thiserror::Error;

use crate::types::PanelLabel;

pub type Result<T> = std::result::Result<T, ConditionError>;

/// Failures raised while extracting, navigating, reconciling or emitting
/// panel conditions. Panel-scoped variants render with the label first.
#[derive(Debug, Error)]
pub enum ConditionError {
    #[error("malformed configuration stream: {0}")]
    MalformedStream(String),

    #[error("{label}: malformed readout mask: {detail}")]
    MalformedMask { label: PanelLabel, detail: String },

    #[error("{0}: encountered duplicate panel")]
    DuplicateLabel(PanelLabel),

    #[error("{0}: panel has no entry in the geographic map")]
    UnmappedPanel(PanelLabel),

    #[error("missing key '{key}' under '{path}'")]
    MissingKey { path: String, key: String },

    #[error("expected {expected} at '{path}'")]
    UnexpectedType {
        path: String,
        expected: &'static str,
    },

    #[error("invalid configuration object: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid panel selector '{0}': expected a panel id or an MN### label")]
    InvalidPanelSelector(String),
}

impl ConditionError {
    /// The panel this error is scoped to, if any.
    #[must_use]
    pub const fn label(&self) -> Option<&PanelLabel> {
        match self {
            Self::MalformedMask { label, .. } => Some(label),
            Self::DuplicateLabel(label) | Self::UnmappedPanel(label) => Some(label),
            _ => None,
        }
    }
}
