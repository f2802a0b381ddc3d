//! Render command handler

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::ProgressReporter;
use crate::RenderArgs;
use covpaint::html::escape_text;
use covpaint::{render_parallel, CoverageSnapshot, FileCoverage, LineCoveragePrinter, RenderJob};
use std::io::Write;
use std::path::{Component, Path, PathBuf};

/// Execute the render command, returning the number of rendered files
pub fn execute_render(config: &CliConfig, args: &RenderArgs) -> CliResult<usize> {
    let snapshot = load_snapshot(&args.snapshot)?;
    let selected = select_files(&snapshot, &args.files)?;
    // Nothing is read or written until every selected path is known to be safe.
    let relative_paths = selected
        .iter()
        .map(|&file| relative_path(file.path()))
        .collect::<CliResult<Vec<_>>>()?;
    let mut reporter = ProgressReporter::new(config.color.should_color(), config.verbosity.is_quiet());

    let mut printers = Vec::with_capacity(selected.len());
    let mut sources = Vec::with_capacity(selected.len());
    for (file, relative) in selected.into_iter().zip(relative_paths) {
        let source_path = args.source_root.join(relative);
        match std::fs::read_to_string(&source_path) {
            Ok(source) => {
                printers.push(LineCoveragePrinter::new(file));
                sources.push(source);
            }
            Err(e) => {
                tracing::warn!(path = %source_path.display(), error = %e, "skipping unreadable source file");
                reporter.warning(&format!("Source not available: {}", source_path.display()));
            }
        }
    }

    let jobs: Vec<_> = printers
        .iter()
        .zip(&sources)
        .map(|(printer, source)| RenderJob::new(printer, source))
        .collect();
    let rendered = render_parallel(&jobs, config.effective_jobs());
    tracing::info!(files = rendered.len(), "rendered source files");

    match &config.output_dir {
        Some(dir) => {
            reporter.start_progress(rendered.len() as u64, "writing");
            for (printer, html) in printers.iter().zip(&rendered) {
                let target = output_path(dir, printer.path())?;
                if let Some(parent) = target.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&target, html).map_err(|e| {
                    CliError::report_generation(format!("Failed to write {}: {e}", target.display()))
                })?;
                tracing::debug!(path = %target.display(), "wrote rendered rows");
                reporter.increment(1);
            }
            reporter.finish();
            reporter.success(&format!(
                "Rendered {} file(s) to {}",
                rendered.len(),
                dir.display()
            ));
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            for (printer, html) in printers.iter().zip(&rendered) {
                writeln!(out, "{}", file_marker(printer.path()))?;
                if !html.is_empty() {
                    writeln!(out, "{html}")?;
                }
            }
        }
    }

    Ok(rendered.len())
}

/// Load a snapshot and check its invariants
pub fn load_snapshot(path: &Path) -> CliResult<CoverageSnapshot> {
    let snapshot = CoverageSnapshot::load(path)?;
    snapshot.validate()?;
    Ok(snapshot)
}

/// Pick the requested files from the snapshot, all of them when `filter` is empty
pub fn select_files<'a>(
    snapshot: &'a CoverageSnapshot,
    filter: &[String],
) -> CliResult<Vec<&'a FileCoverage>> {
    if filter.is_empty() {
        return Ok(snapshot.files().iter().collect());
    }

    filter
        .iter()
        .map(|path| {
            snapshot
                .find(path)
                .ok_or_else(|| CliError::invalid_argument(format!("{path} is not in the snapshot")))
        })
        .collect()
}

/// A snapshot path as a path relative to the source root and output directory.
///
/// Empty paths, absolute paths and paths with `..` are rejected.
pub fn relative_path(file_path: &str) -> CliResult<&Path> {
    let relative = Path::new(file_path);
    let escapes = relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes || file_path.is_empty() {
        return Err(CliError::invalid_argument(format!(
            "{file_path} must be a relative path inside the source root"
        )));
    }
    Ok(relative)
}

/// Location of the rendered rows of `file_path` below `output_dir`
pub fn output_path(output_dir: &Path, file_path: &str) -> CliResult<PathBuf> {
    relative_path(file_path)?;
    Ok(output_dir.join(format!("{file_path}.html")))
}

/// HTML comment that opens the rows of one file on stdout
#[must_use]
pub fn file_marker(file_path: &str) -> String {
    format!("<!-- {} -->", escape_text(file_path).replace("--", "&#45;&#45;"))
}
