use crate::codec::{Archiver, TarGz, ZstdArchiver};
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArchiverKind {
    /// External `tar -czf` / `tar -tzf`.
    TarGz { program: PathBuf },
    Zstd { level: i32 },
}

impl Default for ArchiverKind {
    fn default() -> Self {
        ArchiverKind::TarGz {
            program: PathBuf::from("tar"),
        }
    }
}

pub fn open_archiver(kind: ArchiverKind) -> Box<dyn Archiver> {
    match kind {
        ArchiverKind::TarGz { program } => Box::new(TarGz::new(program)),
        ArchiverKind::Zstd { level } => Box::new(ZstdArchiver::new(level)),
    }
}
