//! Driver parameter file
//!
//! Two lines: a comma-separated list of input JSON files, then the output
//! directory. Anything else is a fatal error before any input is read.

use crate::diagnostics::{RefdocsError, RefdocsResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Parsed parameter file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamFile {
    /// Input JSON files, in order
    pub sources: Vec<PathBuf>,
    /// Output directory, relative to the working directory unless absolute
    pub output_dir: PathBuf,
}

impl ParamFile {
    /// Parse parameter file contents.
    pub fn parse(text: &str) -> RefdocsResult<Self> {
        let mut lines = text.lines().map(|line| line.trim_end_matches('\r'));

        let sources_line = lines
            .next()
            .ok_or_else(|| RefdocsError::param_file("file is empty"))?;
        let output_line = lines
            .next()
            .ok_or_else(|| RefdocsError::param_file("missing output directory on line 2"))?;

        let sources: Vec<PathBuf> = sources_line
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .collect();
        if sources.is_empty() {
            return Err(RefdocsError::param_file("no input files on line 1"));
        }

        let output_dir = output_line.trim();
        if output_dir.is_empty() {
            return Err(RefdocsError::param_file("output directory on line 2 is empty"));
        }

        Ok(Self {
            sources,
            output_dir: PathBuf::from(output_dir),
        })
    }

    /// Read and parse a parameter file from disk.
    pub fn read(path: &Path) -> RefdocsResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            RefdocsError::param_file(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&text)
    }
}
