use super::Archiver;
use crate::error::{BiogzError, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// gzip'd tarball through an external `tar` binary.
pub struct TarGz {
    program: PathBuf,
}

impl TarGz {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, args: &[&OsStr]) -> Result<()> {
        let tool = self.program.display().to_string();
        let out = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| BiogzError::Tool {
                tool: tool.clone(),
                status: "not started".to_string(),
                diagnostic: e.to_string(),
            })?;
        if out.status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&out.stderr);
        Err(BiogzError::tool(tool, out.status, stderr.trim()))
    }
}

impl Default for TarGz {
    fn default() -> Self {
        Self::new("tar")
    }
}

impl Archiver for TarGz {
    fn suffix(&self) -> &'static str {
        ".gz"
    }

    fn compress(&self, src: &Path, dst: &Path) -> Result<()> {
        let name = src.file_name().ok_or_else(|| {
            BiogzError::InvalidArgument(format!("no file name in {}", src.display()))
        })?;
        // Store the entry under its base name so extraction recreates the file, not its path.
        let dir = match src.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        self.run(&[
            OsStr::new("-czf"),
            dst.as_os_str(),
            OsStr::new("-C"),
            dir.as_os_str(),
            // A leading '-' in the name must not be read as an option.
            OsStr::new("--"),
            name,
        ])
    }

    fn verify(&self, archive: &Path) -> Result<()> {
        self.run(&[OsStr::new("-tzf"), archive.as_os_str()])
    }
}
