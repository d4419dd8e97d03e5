//! Persisted run report: one table of log entries plus a text summary.

use crate::accounting::{LogEntry, LogRow, RunSummary};
use crate::error::{BiogzError, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::macros::format_description;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Csv,
    Jsonl,
}

impl ReportFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Jsonl => "jsonl",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportPaths {
    pub table: PathBuf,
    pub summary: PathBuf,
}

/// `log_<YYYYmmddHHMMSS>` for the given instant.
pub fn report_stem(at: OffsetDateTime) -> Result<String> {
    let fmt = format_description!("[year][month][day][hour][minute][second]");
    let stamp = at
        .format(&fmt)
        .map_err(|e| BiogzError::Serialization(format!("timestamp: {e}")))?;
    Ok(format!("log_{stamp}"))
}

/// Local wall clock, falling back to UTC when the offset is unknown.
pub fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Write `<stem>.<csv|jsonl>` and `<stem>.txt` under `dir`.
/// Returns `None` without touching the filesystem when there are no entries.
pub fn write_report(
    dir: &Path,
    stem: &str,
    entries: &[LogEntry],
    summary: &RunSummary,
    format: ReportFormat,
) -> Result<Option<ReportPaths>> {
    if entries.is_empty() {
        return Ok(None);
    }
    fs::create_dir_all(dir).map_err(|e| BiogzError::path_io(dir, e))?;

    let paths = ReportPaths {
        table: dir.join(format!("{stem}.{}", format.extension())),
        summary: dir.join(format!("{stem}.txt")),
    };

    let f = File::create(&paths.table).map_err(|e| BiogzError::path_io(&paths.table, e))?;
    let mut w = BufWriter::new(f);
    match format {
        ReportFormat::Csv => {
            write_csv_line(&mut w, &LogRow::HEADERS)?;
            for e in entries {
                write_csv_line(&mut w, &e.row().fields())?;
            }
        }
        ReportFormat::Jsonl => {
            for e in entries {
                serde_json::to_writer(&mut w, &e.row())?;
                w.write_all(b"\n")?;
            }
        }
    }
    w.flush()?;

    fs::write(&paths.summary, summary.text())
        .map_err(|e| BiogzError::path_io(&paths.summary, e))?;
    Ok(Some(paths))
}

fn write_csv_line<W: Write>(w: &mut W, fields: &[&str]) -> Result<()> {
    let line: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
    writeln!(w, "{}", line.join(","))?;
    Ok(())
}

fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
