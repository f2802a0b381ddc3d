//! Whole-File and Batch Rendering
//!
//! Helpers on top of [`LineCoveragePrinter::render_line`]: render every line
//! of a file, render many files on worker threads, and summarize a file's
//! coverage for report overviews.

use crate::printer::LineCoveragePrinter;
use crate::sanitizer::Sanitizer;
use serde::{Deserialize, Serialize};

/// Render all lines of `source`, numbered from 1, one row per line.
///
/// Lines are split at `\n`; a trailing `\r` is dropped. Rows are joined with
/// `\n`.
#[must_use]
pub fn render_source<S: Sanitizer>(printer: &LineCoveragePrinter<S>, source: &str) -> String {
    (1u32..)
        .zip(source.lines())
        .map(|(line, text)| printer.render_line(line, text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A file waiting to be rendered
#[derive(Debug)]
pub struct RenderJob<'a, S> {
    /// Printer of the file
    pub printer: &'a LineCoveragePrinter<S>,
    /// Full source text of the file
    pub source: &'a str,
}

impl<'a, S: Sanitizer> RenderJob<'a, S> {
    /// Create a job
    #[must_use]
    pub fn new(printer: &'a LineCoveragePrinter<S>, source: &'a str) -> Self {
        Self { printer, source }
    }

    /// Render the file
    #[must_use]
    pub fn render(&self) -> String {
        render_source(self.printer, self.source)
    }
}

/// Number of worker threads to use when none is configured
#[must_use]
pub fn available_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Render many files on up to `threads` scoped worker threads
/// (0 = one per available CPU).
///
/// Printers are only read, so workers borrow them directly. The result has
/// one entry per job, in job order.
#[must_use]
pub fn render_parallel<S: Sanitizer>(jobs: &[RenderJob<'_, S>], threads: usize) -> Vec<String> {
    if jobs.is_empty() {
        return Vec::new();
    }

    let threads = if threads == 0 {
        available_threads()
    } else {
        threads
    };
    let chunk_size = jobs.len().div_ceil(threads);
    tracing::debug!(
        jobs = jobs.len(),
        threads,
        chunk_size,
        "rendering source files"
    );

    if chunk_size == jobs.len() {
        return jobs.iter().map(RenderJob::render).collect();
    }

    std::thread::scope(|scope| {
        let workers: Vec<_> = jobs
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || chunk.iter().map(RenderJob::render).collect::<Vec<_>>())
            })
            .collect();

        workers
            .into_iter()
            .flat_map(|worker| {
                worker
                    .join()
                    .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
            })
            .collect()
    })
}

/// Coverage overview of one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSummary {
    /// Path of the file
    pub path: String,
    /// Lines that carry coverage data
    pub annotated_lines: usize,
    /// Lines changed relative to the baseline
    pub modified_lines: usize,
    /// Annotated lines without missed outcomes
    pub fully_covered: usize,
    /// Annotated lines with both covered and missed outcomes
    pub partially_covered: usize,
    /// Annotated lines that were never covered
    pub not_covered: usize,
    /// Sum of covered counters
    pub covered: u64,
    /// Sum of missed counters
    pub missed: u64,
}

impl FileSummary {
    /// Summarize the file behind `printer`
    #[must_use]
    pub fn from_printer<S: Sanitizer>(printer: &LineCoveragePrinter<S>) -> Self {
        let mut summary = Self {
            path: printer.path().to_string(),
            annotated_lines: printer.size(),
            modified_lines: printer.modified_count(),
            fully_covered: 0,
            partially_covered: 0,
            not_covered: 0,
            covered: 0,
            missed: 0,
        };

        for line in printer.annotated_lines() {
            let covered = printer.covered(line);
            let missed = printer.missed(line);
            summary.covered += u64::from(covered);
            summary.missed += u64::from(missed);
            if covered == 0 {
                summary.not_covered += 1;
            } else if missed == 0 {
                summary.fully_covered += 1;
            } else {
                summary.partially_covered += 1;
            }
        }

        summary
    }

    /// Percentage of covered outcomes
    #[must_use]
    pub fn coverage_percent(&self) -> f64 {
        let total = self.covered + self.missed;
        if total == 0 {
            return 100.0; // Vacuously true
        }
        (self.covered as f64 / total as f64) * 100.0
    }
}
