//! Compression and integrity steps for a single task.

use crate::codec::Archiver;
use crate::domain::{CompressionOutcome, FileTask, VerificationOutcome};
use crate::error::{BiogzError, Result};
use std::fs;
use std::path::Path;

/// Archive `task.source` to `task.archive`.
///
/// Sizes are only read once the archiver has returned successfully; any
/// error along the way (including a failed size read) yields `Failed`.
/// A partial archive left behind by a failed run is not touched.
pub fn compress(archiver: &dyn Archiver, task: &FileTask) -> CompressionOutcome {
    let sizes = archiver
        .compress(&task.source, &task.archive)
        .and_then(|()| Ok((file_len(&task.source)?, file_len(&task.archive)?)));
    match sizes {
        Ok((original_size, compressed_size)) => CompressionOutcome::Compressed {
            original_size,
            compressed_size,
        },
        Err(e) => CompressionOutcome::Failed {
            diagnostic: e.to_string(),
        },
    }
}

pub fn verify(archiver: &dyn Archiver, archive: &Path) -> VerificationOutcome {
    match archiver.verify(archive) {
        Ok(()) => VerificationOutcome::Passed,
        Err(e) => VerificationOutcome::Failed {
            diagnostic: e.to_string(),
        },
    }
}

fn file_len(p: &Path) -> Result<u64> {
    Ok(fs::metadata(p).map_err(|e| BiogzError::path_io(p, e))?.len())
}
