//! Removal of originals whose archive passed verification.

use crate::domain::{ReclaimOutcome, VerificationOutcome};
use std::fs;
use std::path::Path;

/// Delete `source` iff `verification` passed. Deletion errors are returned
/// as `RetainedOnDeleteError`, never propagated.
pub fn reclaim(source: &Path, verification: &VerificationOutcome) -> ReclaimOutcome {
    if !verification.passed() {
        return ReclaimOutcome::Retained;
    }
    match fs::remove_file(source) {
        Ok(()) => ReclaimOutcome::Deleted,
        Err(e) => ReclaimOutcome::RetainedOnDeleteError {
            error: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passed_verification_deletes() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("a.bam");
        fs::write(&p, b"BAM\x01").unwrap();
        assert_eq!(
            reclaim(&p, &VerificationOutcome::Passed),
            ReclaimOutcome::Deleted
        );
        assert!(!p.exists());
    }

    #[test]
    fn failed_verification_never_deletes() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("a.bam");
        fs::write(&p, b"BAM\x01").unwrap();
        let v = VerificationOutcome::Failed {
            diagnostic: "crc".into(),
        };
        assert_eq!(reclaim(&p, &v), ReclaimOutcome::Retained);
        assert!(p.exists());
    }

    #[test]
    fn concurrent_removal_is_recorded_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("already-gone.sam");
        let out = reclaim(&p, &VerificationOutcome::Passed);
        assert!(matches!(out, ReclaimOutcome::RetainedOnDeleteError { .. }));
    }

    #[test]
    fn directory_in_place_of_file_is_retained() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("odd.fa");
        fs::create_dir(&p).unwrap();
        let out = reclaim(&p, &VerificationOutcome::Passed);
        assert!(matches!(out, ReclaimOutcome::RetainedOnDeleteError { .. }));
        assert!(p.exists());
    }
}
