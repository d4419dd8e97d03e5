use crate::error::Result;
use std::path::Path;

/// Produces and checks a one-file archive next to its source.
pub trait Archiver: Send + Sync {
    /// Appended to the source path to name the archive.
    fn suffix(&self) -> &'static str;
    /// Write an archive of `src` at `dst`. `Err` carries the diagnostic text.
    fn compress(&self, src: &Path, dst: &Path) -> Result<()>;
    /// Format-level consistency check of an existing archive.
    fn verify(&self, archive: &Path) -> Result<()>;
}

pub mod tar;
pub mod zstdc;

pub use tar::TarGz;
pub use zstdc::ZstdArchiver;
