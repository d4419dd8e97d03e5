use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BiogzError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("I/O error at {path}: {source}")]
    PathIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// External tool exited unsuccessfully (or could not be spawned).
    #[error("{tool} failed ({status}): {diagnostic}")]
    Tool {
        tool: String,
        status: String,
        diagnostic: String,
    },

    #[error("directory walk failed: {0}")]
    Walk(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl BiogzError {
    /// Stable short code for log lines.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "BGZ-IO",
            Self::PathIo { .. } => "BGZ-PATH-IO",
            Self::InvalidArgument(_) => "BGZ-ARG",
            Self::Tool { .. } => "BGZ-TOOL",
            Self::Walk(_) => "BGZ-WALK",
            Self::Serialization(_) => "BGZ-SER",
        }
    }

    pub fn path_io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::PathIo {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn tool(
        tool: impl Into<String>,
        status: ExitStatus,
        diagnostic: impl Into<String>,
    ) -> Self {
        Self::Tool {
            tool: tool.into(),
            status: status.to_string(),
            diagnostic: diagnostic.into(),
        }
    }
}

impl From<serde_json::Error> for BiogzError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value.to_string())
    }
}

impl From<walkdir::Error> for BiogzError {
    fn from(value: walkdir::Error) -> Self {
        Self::Walk(value.to_string())
    }
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, BiogzError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct_per_variant() {
        let errs = [
            BiogzError::Io(std::io::Error::other("x")),
            BiogzError::path_io("/tmp/a", std::io::Error::other("x")),
            BiogzError::InvalidArgument("x".into()),
            BiogzError::Walk("x".into()),
            BiogzError::Serialization("x".into()),
        ];
        let mut codes: Vec<_> = errs.iter().map(BiogzError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errs.len());
    }

    #[test]
    fn path_io_names_the_path() {
        let e = BiogzError::path_io("/data/x.fa", std::io::Error::other("denied"));
        assert!(e.to_string().contains("/data/x.fa"));
        assert!(e.to_string().contains("denied"));
    }
}
