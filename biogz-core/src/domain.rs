// biogz_core/src/domain.rs
use crate::classify::Category;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// One eligible file, carried through the pipeline exactly once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileTask {
    pub source: PathBuf,
    pub category: Category,
    pub archive: PathBuf,
}

impl FileTask {
    pub fn new(source: PathBuf, category: Category, suffix: &str) -> Self {
        let archive = archive_path(&source, suffix);
        Self {
            source,
            category,
            archive,
        }
    }

    pub fn source_name(&self) -> String {
        base_name(&self.source)
    }

    pub fn archive_name(&self) -> String {
        base_name(&self.archive)
    }
}

/// `source` with `suffix` appended to the full file name (`a.fa` -> `a.fa.gz`).
pub fn archive_path(source: &Path, suffix: &str) -> PathBuf {
    let mut s: OsString = source.as_os_str().to_owned();
    s.push(suffix);
    PathBuf::from(s)
}

fn base_name(p: &Path) -> String {
    p.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| p.display().to_string())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompressionOutcome {
    /// Sizes are read from disk only after the archiver reported success.
    Compressed {
        original_size: u64,
        compressed_size: u64,
    },
    Failed {
        diagnostic: String,
    },
}

impl CompressionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Compressed { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerificationOutcome {
    Passed,
    Failed { diagnostic: String },
}

impl VerificationOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReclaimOutcome {
    Deleted,
    /// Verification failed; both files stay on disk.
    Retained,
    /// Verification passed but the original could not be removed.
    RetainedOnDeleteError { error: String },
}

/// Terminal state of one discovered file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FileState {
    Skipped,
    CompressFailed,
    Retained,
    Deleted,
    RetainedOnDeleteError,
}

impl FileState {
    pub const fn is_failure(self) -> bool {
        matches!(
            self,
            Self::CompressFailed | Self::Retained | Self::RetainedOnDeleteError
        )
    }
}

/// Everything that happened to one task.
#[derive(Clone, Debug)]
pub struct FileReport {
    pub task: FileTask,
    pub compression: CompressionOutcome,
    pub verification: Option<VerificationOutcome>,
    pub reclaim: Option<ReclaimOutcome>,
}

impl FileReport {
    pub fn state(&self) -> FileState {
        match (&self.compression, &self.reclaim) {
            (CompressionOutcome::Failed { .. }, _) => FileState::CompressFailed,
            (_, Some(ReclaimOutcome::Deleted)) => FileState::Deleted,
            (_, Some(ReclaimOutcome::RetainedOnDeleteError { .. })) => {
                FileState::RetainedOnDeleteError
            }
            (_, Some(ReclaimOutcome::Retained) | None) => FileState::Retained,
        }
    }
}
