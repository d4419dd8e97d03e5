//! Per-file log entries and run totals.

use crate::classify::Category;
use crate::domain::{CompressionOutcome, FileReport, FileTask, ReclaimOutcome, VerificationOutcome};
use crate::size::format_bytes;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum IntegrityStatus {
    Pass,
    Fail,
}

impl fmt::Display for IntegrityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IntegrityStatus::Pass => "Pass",
            IntegrityStatus::Fail => "Fail",
        })
    }
}

/// `(1 - compressed/original) * 100`; negative when the archive grew.
/// Used for both per-file and run-level figures. Zero input reports 0.
pub fn efficiency_pct(original: u64, compressed: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (1.0 - compressed as f64 / original as f64) * 100.0
}

/// One row per successfully compressed file.
#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub original_file: PathBuf,
    pub compressed_file: String,
    pub category: Category,
    pub original_size: u64,
    pub compressed_size: u64,
    pub efficiency: f64,
    pub integrity: IntegrityStatus,
}

/// Report-ready rendering of a [`LogEntry`]; keys are the column headers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LogRow {
    #[serde(rename = "Original File")]
    pub original_file: String,
    #[serde(rename = "Compressed File")]
    pub compressed_file: String,
    #[serde(rename = "Original Size")]
    pub original_size: String,
    #[serde(rename = "Compressed Size")]
    pub compressed_size: String,
    #[serde(rename = "Compression Efficiency")]
    pub efficiency: String,
    #[serde(rename = "Integrity Check")]
    pub integrity: String,
}

impl LogRow {
    pub const HEADERS: [&'static str; 6] = [
        "Original File",
        "Compressed File",
        "Original Size",
        "Compressed Size",
        "Compression Efficiency",
        "Integrity Check",
    ];

    pub fn fields(&self) -> [&str; 6] {
        [
            self.original_file.as_str(),
            self.compressed_file.as_str(),
            self.original_size.as_str(),
            self.compressed_size.as_str(),
            self.efficiency.as_str(),
            self.integrity.as_str(),
        ]
    }
}

impl LogEntry {
    pub fn row(&self) -> LogRow {
        LogRow {
            original_file: self.original_file.display().to_string(),
            compressed_file: self.compressed_file.clone(),
            original_size: format_bytes(self.original_size),
            compressed_size: format_bytes(self.compressed_size),
            efficiency: format!("{:.2}%", self.efficiency),
            integrity: self.integrity.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RunSummary {
    /// Sum over every log entry, Pass and Fail alike.
    pub total_original: u64,
    pub total_compressed: u64,
    pub efficiency: f64,
    pub entries: usize,
    pub deleted: usize,
    pub compress_failures: usize,
    pub verify_failures: usize,
    pub delete_failures: usize,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        self.compress_failures + self.verify_failures + self.delete_failures > 0
    }

    /// The three-line plain-text summary.
    pub fn text(&self) -> String {
        format!(
            "Before Compression: {}\nAfter Compression: {}\nCompression Efficiency: {:.2}%\n",
            format_bytes(self.total_original),
            format_bytes(self.total_compressed),
            self.efficiency
        )
    }
}

/// Log entries of one category, summed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CategoryTotals {
    pub category: Category,
    pub files: usize,
    pub original_size: u64,
    pub compressed_size: u64,
}

/// Per-category breakdown in `Category::ALL` order; empty categories are left out.
pub fn totals_by_category(entries: &[LogEntry]) -> Vec<CategoryTotals> {
    Category::ALL
        .into_iter()
        .filter_map(|category| {
            let mut t = CategoryTotals {
                category,
                files: 0,
                original_size: 0,
                compressed_size: 0,
            };
            for e in entries.iter().filter(|e| e.category == category) {
                t.files += 1;
                t.original_size = t.original_size.saturating_add(e.original_size);
                t.compressed_size = t.compressed_size.saturating_add(e.compressed_size);
            }
            (t.files > 0).then_some(t)
        })
        .collect()
}

/// Owns the log entries and running totals of one run.
#[derive(Debug, Default)]
pub struct RunAccountant {
    entries: Vec<LogEntry>,
    total_original: u64,
    total_compressed: u64,
    deleted: usize,
    compress_failures: usize,
    verify_failures: usize,
    delete_failures: usize,
}

impl RunAccountant {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a task that reached a compression outcome. Failed compressions
    /// are counted but produce no entry and stay out of the totals. A
    /// compressed file without a verification result is logged as `Fail`.
    pub fn record(
        &mut self,
        task: &FileTask,
        compression: &CompressionOutcome,
        verification: Option<&VerificationOutcome>,
    ) {
        let (original_size, compressed_size) = match compression {
            CompressionOutcome::Compressed {
                original_size,
                compressed_size,
            } => (*original_size, *compressed_size),
            CompressionOutcome::Failed { .. } => {
                self.compress_failures += 1;
                return;
            }
        };
        let integrity = if verification.is_some_and(VerificationOutcome::passed) {
            IntegrityStatus::Pass
        } else {
            self.verify_failures += 1;
            IntegrityStatus::Fail
        };
        self.total_original = self.total_original.saturating_add(original_size);
        self.total_compressed = self.total_compressed.saturating_add(compressed_size);
        self.entries.push(LogEntry {
            original_file: task.source.clone(),
            compressed_file: task.archive_name(),
            category: task.category,
            original_size,
            compressed_size,
            efficiency: efficiency_pct(original_size, compressed_size),
            integrity,
        });
    }

    pub fn record_reclaim(&mut self, reclaim: &ReclaimOutcome) {
        match reclaim {
            ReclaimOutcome::Deleted => self.deleted += 1,
            ReclaimOutcome::RetainedOnDeleteError { .. } => self.delete_failures += 1,
            ReclaimOutcome::Retained => {}
        }
    }

    pub fn record_report(&mut self, report: &FileReport) {
        self.record(
            &report.task,
            &report.compression,
            report.verification.as_ref(),
        );
        if let Some(r) = &report.reclaim {
            self.record_reclaim(r);
        }
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }

    /// Pure over the recorded state: repeated calls return equal summaries.
    pub fn finalize(&self) -> RunSummary {
        RunSummary {
            total_original: self.total_original,
            total_compressed: self.total_compressed,
            efficiency: efficiency_pct(self.total_original, self.total_compressed),
            entries: self.entries.len(),
            deleted: self.deleted,
            compress_failures: self.compress_failures,
            verify_failures: self.verify_failures,
            delete_failures: self.delete_failures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(name: &str) -> FileTask {
        FileTask::new(format!("/data/{name}").into(), Category::Fasta, ".gz")
    }

    fn ok(o: u64, c: u64) -> CompressionOutcome {
        CompressionOutcome::Compressed {
            original_size: o,
            compressed_size: c,
        }
    }

    fn bad_verify() -> VerificationOutcome {
        VerificationOutcome::Failed {
            diagnostic: "crc".into(),
        }
    }

    #[test]
    fn efficiency_formula() {
        assert_eq!(efficiency_pct(1000, 250), 75.0);
        assert_eq!(efficiency_pct(100, 150), -50.0);
        assert_eq!(efficiency_pct(0, 20), 0.0);
    }

    #[test]
    fn run_level_efficiency_uses_the_per_file_formula() {
        // An archive larger than its source stays negative at run level too.
        let mut acc = RunAccountant::new();
        acc.record(&task("a.fa"), &ok(100, 150), Some(&VerificationOutcome::Passed));
        let s = acc.finalize();
        assert_eq!(s.efficiency, -50.0);
        assert_eq!(acc.entries()[0].efficiency, s.efficiency);
        assert!(s.text().ends_with("Compression Efficiency: -50.00%\n"));
    }

    #[test]
    fn totals_include_pass_and_fail_entries() {
        let mut acc = RunAccountant::new();
        acc.record(&task("a.fa"), &ok(1000, 100), Some(&VerificationOutcome::Passed));
        acc.record(&task("b.fa"), &ok(3000, 900), Some(&bad_verify()));
        acc.record(
            &task("c.fa"),
            &CompressionOutcome::Failed {
                diagnostic: "tar: boom".into(),
            },
            None,
        );
        let s = acc.finalize();
        assert_eq!(s.entries, 2);
        assert_eq!(s.total_original, 4000);
        assert_eq!(s.total_compressed, 1000);
        assert_eq!(
            s.total_original,
            acc.entries().iter().map(|e| e.original_size).sum::<u64>()
        );
        assert_eq!(s.compress_failures, 1);
        assert_eq!(s.verify_failures, 1);
        assert!(s.has_failures());
        let statuses: Vec<_> = acc.entries().iter().map(|e| e.integrity).collect();
        assert_eq!(statuses, vec![IntegrityStatus::Pass, IntegrityStatus::Fail]);
    }

    #[test]
    fn category_breakdown_reconciles_with_totals() {
        let mut acc = RunAccountant::new();
        acc.record(&task("a.fa"), &ok(1000, 100), Some(&VerificationOutcome::Passed));
        let bam = FileTask::new("/data/r.bam".into(), Category::Bam, ".gz");
        acc.record(&bam, &ok(500, 450), Some(&bad_verify()));
        acc.record(&task("b.fa"), &ok(2000, 300), Some(&VerificationOutcome::Passed));

        let by_cat = totals_by_category(acc.entries());
        assert_eq!(
            by_cat.iter().map(|t| (t.category, t.files)).collect::<Vec<_>>(),
            vec![(Category::Fasta, 2), (Category::Bam, 1)]
        );
        assert_eq!(by_cat[0].original_size, 3000);
        assert_eq!(by_cat[0].compressed_size, 400);
        let s = acc.finalize();
        assert_eq!(
            by_cat.iter().map(|t| t.original_size).sum::<u64>(),
            s.total_original
        );
        assert!(totals_by_category(&[]).is_empty());
    }

    #[test]
    fn finalize_is_idempotent() {
        let mut acc = RunAccountant::new();
        acc.record(&task("a.fa"), &ok(10_000, 2_500), Some(&VerificationOutcome::Passed));
        acc.record_reclaim(&ReclaimOutcome::Deleted);
        let first = acc.finalize();
        let second = acc.finalize();
        assert_eq!(first, second);
        assert_eq!(first.deleted, 1);
        assert!(!first.has_failures());
    }

    #[test]
    fn missing_verification_is_logged_as_fail() {
        let mut acc = RunAccountant::new();
        acc.record(&task("a.fa"), &ok(10, 5), None);
        assert_eq!(acc.entries()[0].integrity, IntegrityStatus::Fail);
    }

    #[test]
    fn row_rendering() {
        let mut acc = RunAccountant::new();
        acc.record(&task("x.fa"), &ok(10_000, 2_048), Some(&VerificationOutcome::Passed));
        let row = acc.entries()[0].row();
        assert_eq!(row.original_file, "/data/x.fa");
        assert_eq!(row.compressed_file, "x.fa.gz");
        assert_eq!(row.original_size, "9.77 KB");
        assert_eq!(row.compressed_size, "2.00 KB");
        assert_eq!(row.efficiency, "79.52%");
        assert_eq!(row.integrity, "Pass");
    }

    #[test]
    fn summary_text_has_three_lines() {
        let s = RunSummary {
            total_original: 2048,
            total_compressed: 512,
            efficiency: efficiency_pct(2048, 512),
            ..Default::default()
        };
        assert_eq!(
            s.text(),
            "Before Compression: 2.00 KB\nAfter Compression: 512.00 bytes\nCompression Efficiency: 75.00%\n"
        );
    }
}
