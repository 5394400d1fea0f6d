//! Spectroscopic term labels keyed by level index.
//!
//! Labels are configuration: callers load them from a JSON object such as
//! `{"1": "3d10 4s2 1S0", "2": "3d10 4s 4p 3P0"}` and hand the immutable map to
//! the pipeline, so nothing in the core is tied to one atomic system.

use crate::domain::{TransError, TransResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LevelLabels {
    labels: BTreeMap<u32, String>,
}

impl LevelLabels {
    pub fn new(labels: BTreeMap<u32, String>) -> Self {
        Self { labels }
    }

    pub fn load(path: &Path) -> TransResult<Self> {
        let source = fs::read_to_string(path).map_err(|source| {
            TransError::io_system(
                "IO.LEVEL_LABELS_READ",
                format!(
                    "failed to read level labels '{}': {}",
                    path.display(),
                    source
                ),
            )
        })?;
        Self::from_json_str(&source, &path.display().to_string())
    }

    pub fn from_json_str(source: &str, origin: &str) -> TransResult<Self> {
        let raw: BTreeMap<String, String> = serde_json::from_str(source).map_err(|source| {
            TransError::parse(
                "PARSE.LEVEL_LABELS",
                format!("level labels '{}' are not a JSON string map: {}", origin, source),
            )
        })?;

        let mut labels = BTreeMap::new();
        for (key, label) in raw {
            let level = key.trim().parse::<u32>().map_err(|_| {
                TransError::parse(
                    "PARSE.LEVEL_LABELS",
                    format!(
                        "level labels '{}' contain non-integer level key '{}'",
                        origin, key
                    ),
                )
            })?;
            labels.insert(level, label);
        }

        Ok(Self { labels })
    }

    pub fn label(&self, level: u32) -> Option<&str> {
        self.labels.get(&level).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::LevelLabels;
    use crate::domain::TransErrorCategory;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn json_map_is_keyed_by_level_index() {
        let labels = LevelLabels::from_json_str(
            r#"{ "1": "3d10 4s2 1S0", "275": "3d9 4s2 4f 3D1" }"#,
            "inline",
        )
        .expect("labels should parse");

        assert_eq!(labels.len(), 2);
        assert_eq!(labels.label(1), Some("3d10 4s2 1S0"));
        assert_eq!(labels.label(275), Some("3d9 4s2 4f 3D1"));
        assert_eq!(labels.label(2), None);
    }

    #[test]
    fn non_integer_keys_are_rejected() {
        let error = LevelLabels::from_json_str(r#"{ "1.5": "bad" }"#, "inline")
            .expect_err("float key should fail");
        assert_eq!(error.category(), TransErrorCategory::ParseError);
        assert!(error.message().contains("'1.5'"));
    }

    #[test]
    fn load_reads_labels_from_disk() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("levels.json");
        fs::write(&path, r#"{ "8": "3d10 4p2 1D2" }"#).expect("labels staged");

        let labels = LevelLabels::load(&path).expect("labels should load");
        assert_eq!(labels.label(8), Some("3d10 4p2 1D2"));

        let missing = LevelLabels::load(&temp.path().join("missing.json"))
            .expect_err("missing file should fail");
        assert_eq!(missing.placeholder(), "IO.LEVEL_LABELS_READ");
    }
}
