//! Summary command handler

use crate::commands::{SummaryArgs, SummaryFormat};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::handlers::render::load_snapshot;
use console::style;
use covpaint::{CoverageSnapshot, FileSummary, LineCoveragePrinter};

/// Execute the summary command
pub fn execute_summary(config: &CliConfig, args: &SummaryArgs) -> CliResult<()> {
    let snapshot = load_snapshot(&args.snapshot)?;
    let summaries = summarize(&snapshot);
    tracing::info!(files = summaries.len(), "summarized coverage snapshot");

    let output = match args.format {
        SummaryFormat::Text => render_summary_text(&summaries, config.color.should_color()),
        SummaryFormat::Json => serde_json::to_string_pretty(&summaries)
            .map_err(|e| CliError::report_generation(e.to_string()))?,
    };
    println!("{output}");
    Ok(())
}

/// One summary per file, in snapshot order
#[must_use]
pub fn summarize(snapshot: &CoverageSnapshot) -> Vec<FileSummary> {
    snapshot
        .files()
        .iter()
        .map(|file| FileSummary::from_printer(&LineCoveragePrinter::new(file)))
        .collect()
}

/// Render summaries as a plain table
#[must_use]
pub fn render_summary_text(summaries: &[FileSummary], use_color: bool) -> String {
    let width = summaries
        .iter()
        .map(|s| s.path.len())
        .max()
        .unwrap_or(0)
        .max("File".len());

    let mut output = format!(
        "{:<width$}  {:>6}  {:>6}  {:>6}  {:>6}  {:>8}  {:>8}\n",
        "File", "Lines", "Full", "Part", "None", "Modified", "Coverage"
    );

    for summary in summaries {
        let percent = summary.coverage_percent();
        let coverage = format!("{percent:>7.1}%");
        let coverage = if use_color {
            let styled = style(coverage);
            if percent >= 80.0 {
                styled.green().to_string()
            } else if percent >= 50.0 {
                styled.yellow().to_string()
            } else {
                styled.red().to_string()
            }
        } else {
            coverage
        };

        output.push_str(&format!(
            "{:<width$}  {:>6}  {:>6}  {:>6}  {:>6}  {:>8}  {}\n",
            summary.path,
            summary.annotated_lines,
            summary.fully_covered,
            summary.partially_covered,
            summary.not_covered,
            summary.modified_lines,
            coverage
        ));
    }

    output.trim_end().to_string()
}
