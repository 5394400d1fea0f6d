use super::CliError;
use anyhow::Context;
use chrono::Local;
use serde::Serialize;
use std::fs;
use std::path::Path;
use trans_core::common::LevelLabels;
use trans_core::domain::{TransResult, TransitionPair};
use trans_core::modules::RunSummary;

pub(super) const FIGURE_EXTENSION: &str = "pdf";

/// Today's date as `YYYY_MM_DD`.
pub(super) fn date_stamp() -> String {
    Local::now().format("%Y_%m_%d").to_string()
}

/// `{om|ups}-{lower}_{upper}-{description}-{YYYY_MM_DD}.pdf`
pub(super) fn figure_file_name(stem: &str, description: &str, date: &str) -> String {
    format!("{}-{}-{}.{}", stem, description, date, FIGURE_EXTENSION)
}

pub(super) fn load_level_labels(path: Option<&Path>) -> TransResult<LevelLabels> {
    match path {
        Some(path) => {
            let labels = LevelLabels::load(path)?;
            tracing::debug!(path = %path.display(), count = labels.len(), "level labels loaded");
            Ok(labels)
        }
        None => Ok(LevelLabels::default()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RunReport {
    pub(super) sink: String,
    pub(super) transitions: Vec<String>,
    pub(super) figures: usize,
    pub(super) series: usize,
    pub(super) artifacts: Vec<String>,
    pub(super) empty_transitions: Vec<String>,
}

impl RunReport {
    pub(super) fn new(pairs: &[TransitionPair], summary: &RunSummary, sink: &str) -> Self {
        Self {
            sink: sink.to_string(),
            transitions: pairs.iter().map(ToString::to_string).collect(),
            figures: summary.figures,
            series: summary.series,
            artifacts: summary
                .artifacts
                .iter()
                .map(|path| path.display().to_string())
                .collect(),
            empty_transitions: summary
                .empty_transitions
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

pub(super) fn write_report(path: &Path, report: &RunReport) -> Result<(), CliError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create report directory '{}'", parent.display()))?;
    }

    let content = serde_json::to_string_pretty(report).context("failed to serialize run report")?;
    fs::write(path, content)
        .with_context(|| format!("failed to write run report '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{RunReport, date_stamp, figure_file_name, load_level_labels, write_report};
    use std::fs;
    use tempfile::TempDir;
    use trans_core::domain::TransitionPair;
    use trans_core::modules::RunSummary;

    #[test]
    fn figure_name_follows_stem_description_date() {
        assert_eq!(
            figure_file_name("om-2_3", "compare", "2024_01_31"),
            "om-2_3-compare-2024_01_31.pdf"
        );
    }

    #[test]
    fn date_stamp_uses_underscores() {
        let stamp = date_stamp();
        let parts = stamp.split('_').collect::<Vec<_>>();
        assert_eq!(parts.len(), 3, "stamp was {stamp}");
        assert_eq!(parts[0].len(), 4);
        assert!(parts.iter().all(|part| part.chars().all(|c| c.is_ascii_digit())));
    }

    #[test]
    fn missing_level_file_is_an_io_error() {
        let temp = TempDir::new().expect("tempdir should be created");
        let error = load_level_labels(Some(&temp.path().join("absent.json")))
            .expect_err("missing labels should fail");
        assert_eq!(error.placeholder(), "IO.LEVEL_LABELS_READ");
        assert!(load_level_labels(None).expect("no labels").is_empty());
    }

    #[test]
    fn report_is_written_as_camel_case_json() {
        let temp = TempDir::new().expect("tempdir should be created");
        let pair = TransitionPair::new("2", "3", 2, 3);
        let summary = RunSummary {
            figures: 1,
            series: 0,
            artifacts: Vec::new(),
            empty_transitions: vec![pair.clone()],
        };
        let path = temp.path().join("reports").join("run.json");

        write_report(&path, &RunReport::new(&[pair], &summary, "console")).expect("report");

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).expect("report readable"))
                .expect("report is JSON");
        assert_eq!(value["sink"], "console");
        assert_eq!(value["transitions"][0], "2-3");
        assert_eq!(value["emptyTransitions"][0], "2-3");
        assert_eq!(value["figures"], 1);
    }
}
