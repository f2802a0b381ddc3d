//! Coverage Model Snapshot
//!
//! The per-file coverage data a printer is built from. Snapshots are produced
//! upstream (by whatever parsed the native coverage format) and handed over
//! as JSON:
//!
//! ```text
//! {
//!   "files": [
//!     {
//!       "path": "src/main/Foo.java",
//!       "lines_with_coverage": [3, 4, 10],
//!       "covered_counters":    [1, 0, 2],
//!       "missed_counters":     [0, 1, 2],
//!       "modified_lines":      [4, 11]
//!     }
//!   ]
//! }
//! ```
//!
//! The line list is sparse: only lines that carry coverage data appear in it,
//! and both counter arrays are aligned to it by index.

use crate::result::{CovpaintError, CovpaintResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Coverage data of a single source file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCoverage {
    /// Path of the file relative to the source root
    path: String,
    /// Ascending line numbers that carry coverage data
    lines_with_coverage: Vec<u32>,
    /// Covered counter per entry of `lines_with_coverage`
    covered_counters: Vec<u32>,
    /// Missed counter per entry of `lines_with_coverage`
    missed_counters: Vec<u32>,
    /// Lines changed relative to the baseline
    #[serde(default)]
    modified_lines: BTreeSet<u32>,
}

impl FileCoverage {
    /// Create an empty model for the given path
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Add (or replace) the counters of a line, keeping the line list sorted.
    ///
    /// Counter arrays of a malformed model are first aligned to the line
    /// list, missing counters reading as 0.
    #[must_use]
    pub fn with_line(mut self, line: u32, covered: u32, missed: u32) -> Self {
        let len = self.lines_with_coverage.len();
        self.covered_counters.resize(len, 0);
        self.missed_counters.resize(len, 0);

        match self.lines_with_coverage.binary_search(&line) {
            Ok(index) => {
                self.covered_counters[index] = covered;
                self.missed_counters[index] = missed;
            }
            Err(index) => {
                self.lines_with_coverage.insert(index, line);
                self.covered_counters.insert(index, covered);
                self.missed_counters.insert(index, missed);
            }
        }
        self
    }

    /// Mark a line as modified
    #[must_use]
    pub fn with_modified_line(mut self, line: u32) -> Self {
        let _ = self.modified_lines.insert(line);
        self
    }

    /// Mark several lines as modified
    #[must_use]
    pub fn with_modified_lines(mut self, lines: impl IntoIterator<Item = u32>) -> Self {
        self.modified_lines.extend(lines);
        self
    }

    /// Path of the file relative to the source root
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Ascending line numbers that carry coverage data
    #[must_use]
    pub fn lines_with_coverage(&self) -> &[u32] {
        &self.lines_with_coverage
    }

    /// Covered counters, aligned to [`Self::lines_with_coverage`]
    #[must_use]
    pub fn covered_counters(&self) -> &[u32] {
        &self.covered_counters
    }

    /// Missed counters, aligned to [`Self::lines_with_coverage`]
    #[must_use]
    pub fn missed_counters(&self) -> &[u32] {
        &self.missed_counters
    }

    /// Lines changed relative to the baseline
    #[must_use]
    pub fn modified_lines(&self) -> &BTreeSet<u32> {
        &self.modified_lines
    }

    /// Sum of all covered counters
    #[must_use]
    pub fn total_covered(&self) -> u64 {
        self.covered_counters.iter().map(|&c| u64::from(c)).sum()
    }

    /// Sum of all missed counters
    #[must_use]
    pub fn total_missed(&self) -> u64 {
        self.missed_counters.iter().map(|&m| u64::from(m)).sum()
    }

    /// Check the invariants a printer relies on.
    ///
    /// Printers trust their input and never call this; loaders should.
    pub fn validate(&self) -> CovpaintResult<()> {
        let lines = self.lines_with_coverage.len();
        if self.covered_counters.len() != lines || self.missed_counters.len() != lines {
            return Err(CovpaintError::invalid_model(
                &self.path,
                format!(
                    "{} lines with coverage but {} covered and {} missed counters",
                    lines,
                    self.covered_counters.len(),
                    self.missed_counters.len()
                ),
            ));
        }

        if self.lines_with_coverage.first() == Some(&0) || self.modified_lines.contains(&0) {
            return Err(CovpaintError::invalid_model(
                &self.path,
                "line numbers start at 1",
            ));
        }

        if let Some(pair) = self
            .lines_with_coverage
            .windows(2)
            .find(|pair| pair[0] >= pair[1])
        {
            return Err(CovpaintError::invalid_model(
                &self.path,
                format!(
                    "lines with coverage must be strictly ascending, found {} before {}",
                    pair[0], pair[1]
                ),
            ));
        }

        Ok(())
    }
}

/// Coverage snapshot of a whole report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageSnapshot {
    files: Vec<FileCoverage>,
}

impl CoverageSnapshot {
    /// Create a snapshot from file models
    #[must_use]
    pub fn new(files: Vec<FileCoverage>) -> Self {
        Self { files }
    }

    /// Parse a snapshot from JSON
    pub fn from_json_str(json: &str) -> CovpaintResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a snapshot from a JSON file
    pub fn load(path: &Path) -> CovpaintResult<Self> {
        tracing::debug!(path = %path.display(), "loading coverage snapshot");
        let content = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json_str(&content)?;
        tracing::debug!(files = snapshot.files.len(), "coverage snapshot loaded");
        Ok(snapshot)
    }

    /// All file models
    #[must_use]
    pub fn files(&self) -> &[FileCoverage] {
        &self.files
    }

    /// Find the model of a file by path
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&FileCoverage> {
        self.files.iter().find(|file| file.path == path)
    }

    /// Validate every file model
    pub fn validate(&self) -> CovpaintResult<()> {
        self.files.iter().try_for_each(FileCoverage::validate)
    }
}
