use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Compress sequencing data files, verify each archive, then remove the original",
    long_about = None
)]
pub struct Cli {
    /// Path to the directory containing the files to be compressed
    #[arg(long)]
    pub folder: PathBuf,

    /// Directory where the run log (table + summary) is written
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// Process FASTA files (.fasta, .fna, .fas, .fa)
    #[arg(long)]
    pub fasta: bool,

    /// Process FASTQ files (.fastq, .fq)
    #[arg(long)]
    pub fastq: bool,

    /// Process SAM files (.sam)
    #[arg(long)]
    pub sam: bool,

    /// Process BAM files (.bam)
    #[arg(long)]
    pub bam: bool,

    /// Archive format
    #[arg(long, value_enum, default_value_t = Codec::TarGz)]
    pub codec: Codec,

    /// tar program used by the tar-gz codec
    #[arg(long = "tar", default_value = "tar")]
    pub tar_program: PathBuf,

    /// zstd compression level; negative values are the fast levels
    #[arg(
        long,
        default_value_t = 3,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i32).range(-7..=22)
    )]
    pub level: i32,

    /// Files processed concurrently (1 = sequential)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: u16,

    /// Format of the log table
    #[arg(long = "log-format", value_enum, default_value_t = LogFormat::Csv)]
    pub log_format: LogFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Codec {
    /// `<file>.gz` via external tar
    TarGz,
    /// `<file>.zst`, in-process
    Zstd,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Csv,
    Jsonl,
}
