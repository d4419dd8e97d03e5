use super::Archiver;
use crate::error::{BiogzError, Result};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// In-process zstd stream with frame checksums; no external tool needed.
pub struct ZstdArchiver {
    level: i32,
}

impl ZstdArchiver {
    /// `level` goes to zstd unchanged; negative values select the fast levels.
    pub fn new(level: i32) -> Self {
        Self { level }
    }
}

impl Default for ZstdArchiver {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Archiver for ZstdArchiver {
    fn suffix(&self) -> &'static str {
        ".zst"
    }

    fn compress(&self, src: &Path, dst: &Path) -> Result<()> {
        let mut input = File::open(src).map_err(|e| BiogzError::path_io(src, e))?;
        let out = File::create(dst).map_err(|e| BiogzError::path_io(dst, e))?;
        let mut enc = zstd::stream::Encoder::new(out, self.level)?;
        enc.include_checksum(true)?;
        io::copy(&mut input, &mut enc)?;
        let mut out = enc.finish()?;
        out.flush()?;
        out.sync_all()?;
        Ok(())
    }

    fn verify(&self, archive: &Path) -> Result<()> {
        let mut f = File::open(archive).map_err(|e| BiogzError::path_io(archive, e))?;
        let mut magic = [0u8; 4];
        f.read_exact(&mut magic)
            .map_err(|e| BiogzError::path_io(archive, e))?;
        if magic != ZSTD_MAGIC {
            return Err(BiogzError::InvalidArgument(format!(
                "{} is not a zstd frame",
                archive.display()
            )));
        }
        // Full decode: zstd validates the frame checksum at the end.
        let mut dec = zstd::stream::Decoder::new(io::Cursor::new(magic).chain(f))?;
        io::copy(&mut dec, &mut io::sink()).map_err(|e| BiogzError::path_io(archive, e))?;
        Ok(())
    }
}
