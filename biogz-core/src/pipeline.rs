//! Discovery and the per-file compress -> verify -> reclaim state machine.

use crate::accounting::{LogEntry, RunAccountant, RunSummary};
use crate::classify::{CategorySet, classify};
use crate::codec::Archiver;
use crate::domain::{CompressionOutcome, FileReport, FileState, FileTask, ReclaimOutcome};
use crate::error::{BiogzError, Result};
use crate::{exec, reclaim};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

#[derive(Clone, Debug)]
pub struct RunOptions {
    pub enabled: CategorySet,
    /// 1 keeps the sequential reference behaviour.
    pub jobs: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            enabled: CategorySet::empty(),
            jobs: 1,
        }
    }
}

/// What a run did: per-file reports in discovery order, the log entries and totals.
#[derive(Debug)]
pub struct RunReport {
    pub files: Vec<FileReport>,
    pub entries: Vec<LogEntry>,
    pub summary: RunSummary,
    /// Regular files that matched no enabled category.
    pub skipped: usize,
}

impl RunReport {
    pub fn count(&self, state: FileState) -> usize {
        if state == FileState::Skipped {
            return self.skipped;
        }
        self.files.iter().filter(|r| r.state() == state).count()
    }
}

/// Eligible files under `root`, each exactly once, sorted by path.
/// Returns the tasks and the number of ineligible regular files.
pub fn discover(
    root: &Path,
    enabled: CategorySet,
    suffix: &str,
) -> Result<(Vec<FileTask>, usize)> {
    let root = fs::canonicalize(root).map_err(|e| BiogzError::path_io(root, e))?;
    let mut tasks = Vec::new();
    let mut skipped = 0usize;
    for entry in WalkDir::new(&root).follow_links(false).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let category = classify(&entry.file_name().to_string_lossy(), enabled);
        match category {
            Some(category) => tasks.push(FileTask::new(entry.into_path(), category, suffix)),
            None => {
                debug!(path = %entry.path().display(), "not eligible");
                skipped += 1;
            }
        }
    }
    Ok((tasks, skipped))
}

/// Carry one task through every state. Never fails: each failure is
/// folded into the returned report.
pub fn process_file(archiver: &dyn Archiver, task: FileTask) -> FileReport {
    info!(
        category = %task.category,
        "Compressing file {} to {}",
        task.source_name(),
        task.archive_name()
    );
    let compression = exec::compress(archiver, &task);
    match &compression {
        CompressionOutcome::Failed { diagnostic } => {
            error!("Error compressing {}: {}", task.source.display(), diagnostic);
            return FileReport {
                task,
                compression,
                verification: None,
                reclaim: None,
            };
        }
        CompressionOutcome::Compressed {
            original_size,
            compressed_size,
        } => info!(
            original_size,
            compressed_size,
            "Successfully compressed {} to {}",
            task.source.display(),
            task.archive.display()
        ),
    }

    info!("Checking integrity of {}", task.archive.display());
    let verification = exec::verify(archiver, &task.archive);
    let status = if verification.passed() { "Pass" } else { "Fail" };
    info!("Integrity check for {}: {}", task.archive.display(), status);

    let reclaimed = reclaim::reclaim(&task.source, &verification);
    match &reclaimed {
        ReclaimOutcome::Deleted => {
            info!("Removed original file {} after compression", task.source.display())
        }
        ReclaimOutcome::RetainedOnDeleteError { error } => {
            warn!("Error removing file {}: {}", task.source.display(), error)
        }
        ReclaimOutcome::Retained => warn!(
            "Integrity check failed for {}, keeping the original file.",
            task.archive.display()
        ),
    }

    FileReport {
        task,
        compression,
        verification: Some(verification),
        reclaim: Some(reclaimed),
    }
}

pub struct Pipeline {
    archiver: Box<dyn Archiver>,
    options: RunOptions,
}

impl Pipeline {
    pub fn new(archiver: Box<dyn Archiver>, options: RunOptions) -> Self {
        Self { archiver, options }
    }

    pub fn run(&self, root: &Path) -> Result<RunReport> {
        let (tasks, skipped) = discover(root, self.options.enabled, self.archiver.suffix())?;
        info!(eligible = tasks.len(), skipped, "discovered files under {}", root.display());

        let mut acc = RunAccountant::new();
        let files = if self.options.jobs > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.options.jobs)
                .build()
                .map_err(|e| BiogzError::InvalidArgument(format!("worker pool: {e}")))?;
            let archiver = self.archiver.as_ref();
            // Workers only produce reports; the accountant is fed here, in discovery order.
            let files: Vec<FileReport> = pool.install(|| {
                tasks
                    .into_par_iter()
                    .map(|t| process_file(archiver, t))
                    .collect()
            });
            for r in &files {
                acc.record_report(r);
            }
            files
        } else {
            let mut files = Vec::with_capacity(tasks.len());
            for t in tasks {
                let r = process_file(self.archiver.as_ref(), t);
                acc.record_report(&r);
                files.push(r);
            }
            files
        };

        let summary = acc.finalize();
        Ok(RunReport {
            files,
            entries: acc.into_entries(),
            summary,
            skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Category;
    use crate::codec::ZstdArchiver;

    fn tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("run1/nested")).unwrap();
        fs::write(dir.path().join("run1/a.fa"), b">a\nACGT\n").unwrap();
        fs::write(dir.path().join("run1/nested/b.fq"), b"@b\nAC\n+\nII\n").unwrap();
        fs::write(dir.path().join("run1/c.sam"), b"@HD\n").unwrap();
        fs::write(dir.path().join("notes.txt"), b"hello").unwrap();
        dir
    }

    #[test]
    fn discover_filters_by_enabled_categories() {
        let dir = tree();
        let enabled: CategorySet = [Category::Fasta, Category::Fastq].into_iter().collect();
        let (tasks, skipped) = discover(dir.path(), enabled, ".zst").unwrap();
        let names: Vec<_> = tasks.iter().map(FileTask::source_name).collect();
        assert_eq!(names, vec!["a.fa", "b.fq"]);
        assert_eq!(skipped, 2);
        assert!(tasks.iter().all(|t| t.source.is_absolute()));
    }

    #[test]
    fn discover_missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(&dir.path().join("nope"), CategorySet::all(), ".gz").is_err());
    }

    #[test]
    fn empty_category_set_is_a_no_op_run() {
        let dir = tree();
        let p = Pipeline::new(Box::new(ZstdArchiver::default()), RunOptions::default());
        let report = p.run(dir.path()).unwrap();
        assert!(report.files.is_empty());
        assert!(report.entries.is_empty());
        assert_eq!(report.count(FileState::Skipped), 4);
        assert!(dir.path().join("run1/a.fa").exists());
    }

    #[test]
    fn parallel_run_matches_sequential_accounting() {
        let seq_dir = tree();
        let par_dir = tree();
        let opts = |jobs| RunOptions {
            enabled: CategorySet::all(),
            jobs,
        };
        let seq = Pipeline::new(Box::new(ZstdArchiver::default()), opts(1))
            .run(seq_dir.path())
            .unwrap();
        let par = Pipeline::new(Box::new(ZstdArchiver::default()), opts(4))
            .run(par_dir.path())
            .unwrap();
        assert_eq!(seq.summary, par.summary);
        assert_eq!(par.count(FileState::Deleted), 3);
        let names = |r: &RunReport| {
            r.entries
                .iter()
                .map(|e| e.compressed_file.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(names(&seq), names(&par));
    }
}
