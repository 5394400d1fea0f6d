use crate::domain::{QuantityKind, ScaledMode, TransError, TransResult, TransitionPair};
use globset::{Glob, GlobMatcher};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResolver {
    data_dir: PathBuf,
    quantity: QuantityKind,
    scaled: ScaledMode,
}

impl FileResolver {
    pub fn new(data_dir: impl Into<PathBuf>, quantity: QuantityKind, scaled: ScaledMode) -> Self {
        Self {
            data_dir: data_dir.into(),
            quantity,
            scaled,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// `{om|ups}-{lower}_{upper}-*.{trns|burg}`
    pub fn pattern(&self, pair: &TransitionPair) -> String {
        format!(
            "{}-*.{}",
            pair.file_stem(self.quantity),
            self.scaled.file_extension()
        )
    }

    /// Result files for `pair` in the data directory, sorted by file name.
    /// No match is an empty list, not an error.
    pub fn resolve(&self, pair: &TransitionPair) -> TransResult<Vec<PathBuf>> {
        let pattern = self.pattern(pair);
        let matcher = compile_matcher(&pattern)?;

        let entries = fs::read_dir(&self.data_dir).map_err(|source| {
            TransError::io_system(
                "IO.DATA_DIR_READ",
                format!(
                    "failed to list data directory '{}': {}",
                    self.data_dir.display(),
                    source
                ),
            )
        })?;

        let mut file_names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| {
                TransError::io_system(
                    "IO.DATA_DIR_READ",
                    format!(
                        "failed to read entry in data directory '{}': {}",
                        self.data_dir.display(),
                        source
                    ),
                )
            })?;

            let Some(file_name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            if matcher.is_match(&file_name) && entry.path().is_file() {
                file_names.push(file_name);
            }
        }

        file_names.sort();
        Ok(file_names
            .into_iter()
            .map(|file_name| self.data_dir.join(file_name))
            .collect())
    }
}

fn compile_matcher(pattern: &str) -> TransResult<GlobMatcher> {
    Glob::new(pattern)
        .map(|glob| glob.compile_matcher())
        .map_err(|source| {
            TransError::internal(
                "RUN.RESOLVER_GLOB",
                format!("invalid file pattern '{}': {}", pattern, source),
            )
        })
}
