use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use strawcond_core::{Coordinate, GeographicMap, PanelLabel};
use tracing::{info, warn};

/// One entry of the geographic mapping file.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GeographyRecord {
    #[serde(alias = "panel_id")]
    pub minnesota: i64,
    pub plane: u32,
    pub panel: u32,
}

/// Builds the label lookup from mapping records; a repeated panel id keeps
/// the last record.
pub fn geographic_map(records: impl IntoIterator<Item = GeographyRecord>) -> GeographicMap {
    let mut map = GeographicMap::new();
    for record in records {
        let label = PanelLabel::from_id(record.minnesota);
        let coordinate = Coordinate {
            plane: record.plane,
            panel: record.panel,
        };
        if let Some(previous) = map.insert(label.clone(), coordinate) {
            warn!(
                "{label}: mapped more than once, replacing plane {} panel {}",
                previous.plane, previous.panel
            );
        }
    }
    map
}

/// Loads the JSON array of `{minnesota, plane, panel}` records at `path`.
pub fn load_geographic_map(path: &Path) -> anyhow::Result<GeographicMap> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read geographic map {}", path.display()))?;
    let records: Vec<GeographyRecord> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid geographic map {}", path.display()))?;

    let map = geographic_map(records);
    info!("Loaded {} panel coordinates from {}", map.len(), path.display());
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_are_keyed_by_padded_label() {
        let map = geographic_map([
            GeographyRecord {
                minnesota: 5,
                plane: 1,
                panel: 2,
            },
            GeographyRecord {
                minnesota: 140,
                plane: 35,
                panel: 4,
            },
        ]);

        assert_eq!(
            map.locate(&PanelLabel::new("MN005")).unwrap(),
            Coordinate { plane: 1, panel: 2 }
        );
        assert_eq!(
            map.locate(&PanelLabel::new("MN140")).unwrap(),
            Coordinate { plane: 35, panel: 4 }
        );
    }

    #[test]
    fn last_record_wins_for_repeated_ids() {
        let map = geographic_map([
            GeographyRecord {
                minnesota: 9,
                plane: 0,
                panel: 0,
            },
            GeographyRecord {
                minnesota: 9,
                plane: 7,
                panel: 3,
            },
        ]);
        assert_eq!(map.len(), 1);
        assert_eq!(
            map.locate(&PanelLabel::from_id(9)).unwrap(),
            Coordinate { plane: 7, panel: 3 }
        );
    }

    #[test]
    fn panel_id_alias_is_accepted() {
        let records: Vec<GeographyRecord> =
            serde_json::from_str(r#"[{"panel_id": 12, "plane": 2, "panel": 5}]"#).unwrap();
        assert_eq!(records[0].minnesota, 12);
    }
}
