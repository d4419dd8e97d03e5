#![forbid(unsafe_code)]

pub mod error;

pub mod accounting;
pub mod archiver_factory;
pub mod classify;
pub mod codec;
pub mod domain;
pub mod exec;
pub mod pipeline;
pub mod reclaim;
pub mod report;
pub mod size;

// Re-exports: stable API surface
pub use accounting::{
    CategoryTotals, LogEntry, RunAccountant, RunSummary, efficiency_pct, totals_by_category,
};
pub use archiver_factory::{ArchiverKind, open_archiver};
pub use classify::{Category, CategorySet, classify};
pub use pipeline::{Pipeline, RunOptions, RunReport};
pub use report::{ReportFormat, write_report};
pub use size::{format_bytes, format_size};
