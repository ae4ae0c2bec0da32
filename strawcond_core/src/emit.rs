//! Projection of merged conditions into the offline status table.
//!
//! Each level of the scheme produces a bare header line followed by one
//! `"{plane}_{panel}_{straw}, {label}"` line per flagged channel. Panels are
//! visited in label order and channels in ascending order.

use std::io::{self, Write};

use crate::error::Result;
use crate::types::{Channel, Coordinate, GeographicMap, PanelConditions, StatusScheme};

#[must_use]
pub fn format_status_line(coordinate: Coordinate, channel: Channel, label: &str) -> String {
    format!(
        "{}_{}_{channel}, {label}",
        coordinate.plane, coordinate.panel
    )
}

/// Renders the whole table, failing before any line is produced if a panel
/// has no coordinate.
pub fn render_table(
    conditions: &PanelConditions,
    geography: &GeographicMap,
    scheme: &StatusScheme,
) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for level in scheme.levels() {
        lines.push(level.level.clone());
        for entry in &level.labels {
            for (panel, record) in conditions {
                let coordinate = geography.locate(panel)?;
                let mut channels = record.get(entry.field).unwrap_or_default().to_vec();
                channels.sort_unstable();
                lines.extend(
                    channels
                        .into_iter()
                        .map(|channel| format_status_line(coordinate, channel, &entry.label)),
                );
            }
        }
    }
    Ok(lines)
}

/// Writes rendered lines to `out`, one per line.
pub fn write_lines<W: Write>(lines: &[String], mut out: W) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
