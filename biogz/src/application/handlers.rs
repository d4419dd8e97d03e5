use std::path::Path;

use biogz_core::error::Result;
use biogz_core::report::{ReportPaths, local_now, report_stem};
use biogz_core::{
    ArchiverKind, Category, CategorySet, Pipeline, ReportFormat, RunOptions, RunReport,
    format_bytes, open_archiver, totals_by_category, write_report,
};
use time::OffsetDateTime;
use tracing::{error, info, warn};

use crate::presentation::cli::{Cli, Codec, LogFormat};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunStatus {
    Clean,
    /// At least one file failed to compress, verify or be removed, or the log
    /// could not be written.
    WithFailures,
}

pub fn enabled_categories(cli: &Cli) -> CategorySet {
    [
        (cli.fasta, Category::Fasta),
        (cli.fastq, Category::Fastq),
        (cli.sam, Category::Sam),
        (cli.bam, Category::Bam),
    ]
    .into_iter()
    .filter_map(|(on, c)| on.then_some(c))
    .collect()
}

pub fn archiver_kind(cli: &Cli) -> ArchiverKind {
    match cli.codec {
        Codec::TarGz => ArchiverKind::TarGz {
            program: cli.tar_program.clone(),
        },
        Codec::Zstd => ArchiverKind::Zstd { level: cli.level },
    }
}

fn report_format(f: LogFormat) -> ReportFormat {
    match f {
        LogFormat::Csv => ReportFormat::Csv,
        LogFormat::Jsonl => ReportFormat::Jsonl,
    }
}

pub fn handle_run(cli: Cli) -> Result<RunStatus> {
    let options = RunOptions {
        enabled: enabled_categories(&cli),
        jobs: usize::from(cli.jobs),
    };
    if options.enabled.is_empty() {
        warn!("no file type enabled (--fasta, --fastq, --sam, --bam); nothing will be compressed");
    }
    let started = local_now();
    let pipeline = Pipeline::new(open_archiver(archiver_kind(&cli)), options);
    let report = pipeline.run(&cli.folder)?;

    let mut status = if report.summary.has_failures() {
        RunStatus::WithFailures
    } else {
        RunStatus::Clean
    };

    if let Some(dir) = &cli.log {
        match persist(dir, started, &report, report_format(cli.log_format)) {
            Ok(Some(paths)) => info!(
                summary = %paths.summary.display(),
                "Log saved to {}",
                paths.table.display()
            ),
            Ok(None) => info!("no files were compressed; no log written"),
            Err(e) => {
                error!(code = e.code(), "Error writing log to {}: {}", dir.display(), e);
                status = RunStatus::WithFailures;
            }
        }
    }

    for t in totals_by_category(&report.entries) {
        info!(
            category = %t.category,
            files = t.files,
            before = %format_bytes(t.original_size),
            after = %format_bytes(t.compressed_size),
            "category totals"
        );
    }
    let s = &report.summary;
    info!(
        compressed = s.entries,
        deleted = s.deleted,
        compress_failures = s.compress_failures,
        verify_failures = s.verify_failures,
        delete_failures = s.delete_failures,
        skipped = report.skipped,
        "Compression process completed."
    );
    Ok(status)
}

fn persist(
    dir: &Path,
    started: OffsetDateTime,
    report: &RunReport,
    format: ReportFormat,
) -> Result<Option<ReportPaths>> {
    let stem = report_stem(started)?;
    write_report(dir, &stem, &report.entries, &report.summary, format)
}
