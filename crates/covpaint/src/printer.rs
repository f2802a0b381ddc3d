//! Line Coverage Printer
//!
//! Provides everything needed to render the source code of one file
//! together with its line and branch coverage as HTML table rows.
//!
//! Coverage is stored sparsely: a sorted list of the lines that carry data
//! plus two counter arrays aligned to it. Every per-line query is a binary
//! search over that list, so a file with tens of thousands of lines and a few
//! hundred annotated ones costs only the annotated ones in memory.
//!
//! A printer is immutable once built and can be shared between rendering
//! threads as long as its sanitizer can.

use crate::html::CoverageRow;
use crate::model::FileCoverage;
use crate::sanitizer::{MarkupSanitizer, Sanitizer};
use std::collections::HashSet;

/// Row class of lines without any coverage signal
pub const UNDEFINED: &str = "noCover";
/// Class of lines changed relative to the baseline
pub const MODIFIED: &str = "modified";
/// Class of lines that were never executed
pub const NO_COVERAGE: &str = "coverNone";
/// Class of fully covered lines
pub const FULL_COVERAGE: &str = "coverFull";
/// Class of partially covered lines
pub const PARTIAL_COVERAGE: &str = "coverPart";
/// Non-breaking space entity used for whitespace in code cells
pub const NBSP: &str = "&nbsp;";
/// Number of non-breaking spaces a tab expands to
pub const TAB_WIDTH: usize = 8;

/// Renders the lines of one source file with their coverage
#[derive(Debug, Clone)]
pub struct LineCoveragePrinter<S = MarkupSanitizer> {
    path: String,
    lines_to_paint: Vec<u32>,
    covered_per_line: Vec<u32>,
    missed_per_line: Vec<u32>,
    modified_lines: HashSet<u32>,
    sanitizer: S,
}

impl LineCoveragePrinter {
    /// Create a printer for `file` using the default [`MarkupSanitizer`]
    #[must_use]
    pub fn new(file: &FileCoverage) -> Self {
        Self::with_sanitizer(file, MarkupSanitizer::new())
    }

    /// Normalize whitespace of a source line before sanitizing.
    ///
    /// Line breaks are dropped, every space becomes `&nbsp;` and every tab
    /// becomes [`TAB_WIDTH`] of them, regardless of the column it sits in.
    #[must_use]
    pub fn cleanup_code(content: &str) -> String {
        let mut cleaned = String::with_capacity(content.len() * 2);
        for ch in content.chars() {
            match ch {
                '\n' | '\r' => {}
                ' ' => cleaned.push_str(NBSP),
                '\t' => {
                    for _ in 0..TAB_WIDTH {
                        cleaned.push_str(NBSP);
                    }
                }
                _ => cleaned.push(ch),
            }
        }
        cleaned
    }
}

impl<S: Sanitizer> LineCoveragePrinter<S> {
    /// Create a printer for `file` that passes code through `sanitizer`.
    ///
    /// The model is trusted: line numbers must be strictly ascending and the
    /// counter arrays as long as the line list (see [`FileCoverage::validate`]).
    #[must_use]
    pub fn with_sanitizer(file: &FileCoverage, sanitizer: S) -> Self {
        tracing::trace!(
            path = file.path(),
            lines = file.lines_with_coverage().len(),
            modified = file.modified_lines().len(),
            "creating line coverage printer"
        );
        Self {
            path: file.path().to_string(),
            lines_to_paint: file.lines_with_coverage().to_vec(),
            covered_per_line: file.covered_counters().to_vec(),
            missed_per_line: file.missed_counters().to_vec(),
            modified_lines: file.modified_lines().iter().copied().collect(),
            sanitizer,
        }
    }

    /// Render one source line as a `<tr>` fragment
    #[must_use]
    pub fn render_line(&self, line: u32, source_code: &str) -> String {
        let is_painted = self.is_painted(line);
        let class = if is_painted {
            self.color_class(line)
        } else {
            UNDEFINED.to_string()
        };
        let tooltip = is_painted.then(|| self.tooltip(line));
        let hits = if is_painted {
            self.summary_column(line)
        } else {
            String::new()
        };
        let code = self.sanitizer.render(&LineCoveragePrinter::cleanup_code(source_code));

        CoverageRow {
            class: &class,
            tooltip: tooltip.as_deref(),
            line,
            hits: &hits,
            code: &code,
        }
        .render()
    }

    /// Number of lines that carry coverage data
    #[must_use]
    pub fn size(&self) -> usize {
        self.lines_to_paint.len()
    }

    /// Path of the rendered file
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// `"modified"` for modified lines, empty otherwise
    #[must_use]
    pub fn modified_color_class(&self, line: u32) -> &'static str {
        if self.is_modified(line) {
            MODIFIED
        } else {
            ""
        }
    }

    /// CSS classes of a line: the modified class first, then the coverage
    /// class, separated by a space. Lines without coverage data get no
    /// coverage class, so a modified line without data is just `"modified"`
    /// rather than `"modified coverNone"`.
    #[must_use]
    pub fn color_class(&self, line: u32) -> String {
        let coverage_class = match self.line_index(line) {
            None => "",
            Some(_) if self.covered(line) == 0 => NO_COVERAGE,
            Some(_) if self.missed(line) == 0 => FULL_COVERAGE,
            Some(_) => PARTIAL_COVERAGE,
        };

        [self.modified_color_class(line), coverage_class]
            .into_iter()
            .filter(|class| !class.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `"Modified"` for modified lines, empty otherwise
    #[must_use]
    pub fn tooltip_prefix(&self, line: u32) -> &'static str {
        if self.is_modified(line) {
            "Modified"
        } else {
            ""
        }
    }

    /// Human readable description of the coverage of a line
    #[must_use]
    pub fn tooltip(&self, line: u32) -> String {
        let covered = self.covered(line);
        let missed = self.missed(line);
        let total = u64::from(covered) + u64::from(missed);

        let suffix = if total > 1 {
            if missed == 0 {
                "All branches covered".to_string()
            } else if covered == 0 {
                "No branches covered".to_string()
            } else {
                format!("Partially covered, branch coverage: {covered}/{total}")
            }
        } else if covered == 1 {
            "Covered at least once".to_string()
        } else {
            "Not covered".to_string()
        };

        let prefix = self.tooltip_prefix(line);
        if prefix.is_empty() {
            suffix
        } else {
            format!("{prefix}, {}", uncapitalize(&suffix))
        }
    }

    /// Compact counter text: `covered/total` for branch data, otherwise the
    /// covered count
    #[must_use]
    pub fn summary_column(&self, line: u32) -> String {
        let covered = self.covered(line);
        let total = u64::from(covered) + u64::from(self.missed(line));
        if total > 1 {
            format!("{covered}/{total}")
        } else {
            covered.to_string()
        }
    }

    /// Whether a line gets any coverage styling at all
    #[must_use]
    pub fn is_painted(&self, line: u32) -> bool {
        self.line_index(line).is_some() || self.is_modified(line)
    }

    /// Whether a line changed relative to the baseline
    #[must_use]
    pub fn is_modified(&self, line: u32) -> bool {
        self.modified_lines.contains(&line)
    }

    /// Position of `line` in the sorted list of annotated lines
    #[must_use]
    pub fn line_index(&self, line: u32) -> Option<usize> {
        self.lines_to_paint.binary_search(&line).ok()
    }

    /// Covered counter of a line, 0 when it has no coverage data
    #[must_use]
    pub fn covered(&self, line: u32) -> u32 {
        self.counter(line, &self.covered_per_line)
    }

    /// Missed counter of a line, 0 when it has no coverage data
    #[must_use]
    pub fn missed(&self, line: u32) -> u32 {
        self.counter(line, &self.missed_per_line)
    }

    fn counter(&self, line: u32, counters: &[u32]) -> u32 {
        self.line_index(line)
            .and_then(|index| counters.get(index).copied())
            .unwrap_or(0)
    }

    /// Label of the extra column; this printer has none
    #[must_use]
    pub fn column_header(&self) -> &'static str {
        ""
    }

    /// Lines that carry coverage data, ascending
    pub fn annotated_lines(&self) -> impl Iterator<Item = u32> + '_ {
        self.lines_to_paint.iter().copied()
    }

    /// Number of modified lines
    #[must_use]
    pub fn modified_count(&self) -> usize {
        self.modified_lines.len()
    }
}

/// Lower-case the first character, leave the rest alone
fn uncapitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::sanitizer::PassthroughSanitizer;

    /// Lines 3..=7 carry coverage, 7 and 12 are modified
    fn create_test_file() -> FileCoverage {
        FileCoverage::new("src/main/Foo.java")
            .with_line(3, 0, 0)
            .with_line(4, 1, 0)
            .with_line(5, 3, 0)
            .with_line(6, 2, 3)
            .with_line(7, 0, 4)
            .with_modified_lines([7, 12])
    }

    fn create_test_printer() -> LineCoveragePrinter<PassthroughSanitizer> {
        LineCoveragePrinter::with_sanitizer(&create_test_file(), PassthroughSanitizer)
    }

    mod lookup_tests {
        use super::*;

        #[test]
        fn test_size_and_path() {
            let printer = create_test_printer();
            assert_eq!(printer.size(), 5);
            assert_eq!(printer.path(), "src/main/Foo.java");
            assert_eq!(printer.modified_count(), 2);
        }

        #[test]
        fn test_line_index() {
            let printer = create_test_printer();
            assert_eq!(printer.line_index(3), Some(0));
            assert_eq!(printer.line_index(7), Some(4));
            assert_eq!(printer.line_index(1), None);
            assert_eq!(printer.line_index(12), None);
            assert_eq!(printer.line_index(u32::MAX), None);
        }

        #[test]
        fn test_counters() {
            let printer = create_test_printer();
            assert_eq!((printer.covered(6), printer.missed(6)), (2, 3));
            assert_eq!((printer.covered(5), printer.missed(5)), (3, 0));
            assert_eq!((printer.covered(100), printer.missed(100)), (0, 0));
        }

        #[test]
        fn test_annotated_lines() {
            let printer = create_test_printer();
            assert_eq!(printer.annotated_lines().collect::<Vec<_>>(), vec![3, 4, 5, 6, 7]);
        }

        #[test]
        fn test_short_counter_arrays_read_as_zero() {
            let json = r#"{
                "path": "Broken.java",
                "lines_with_coverage": [1, 2],
                "covered_counters": [5],
                "missed_counters": []
            }"#;
            let file: FileCoverage = serde_json::from_str(json).unwrap();
            let printer = LineCoveragePrinter::new(&file);
            assert_eq!(printer.covered(1), 5);
            assert_eq!(printer.covered(2), 0);
            assert_eq!(printer.missed(1), 0);
        }

        #[test]
        fn test_column_header_is_empty() {
            assert_eq!(create_test_printer().column_header(), "");
        }
    }

    mod paint_tests {
        use super::*;

        #[test]
        fn test_unknown_line_is_not_painted() {
            let printer = create_test_printer();
            assert!(!printer.is_painted(1));
            assert!(!printer.is_modified(1));
            assert_eq!(printer.color_class(1), "");
            assert_eq!(printer.summary_column(1), "0");
            assert_eq!(printer.tooltip(1), "Not covered");
        }

        #[test]
        fn test_modified_line_without_coverage_is_painted() {
            let printer = create_test_printer();
            assert!(printer.is_painted(12));
            assert!(printer.is_modified(12));
            assert_eq!(printer.color_class(12), "modified");
            assert_eq!(printer.tooltip(12), "Modified, not covered");
            assert_eq!(printer.summary_column(12), "0");
        }

        #[test]
        fn test_zero_counters_are_no_coverage() {
            let printer = create_test_printer();
            assert!(printer.is_painted(3));
            assert_eq!(printer.color_class(3), "coverNone");
            assert_eq!(printer.tooltip(3), "Not covered");
            assert_eq!(printer.summary_column(3), "0");
        }

        #[test]
        fn test_single_covered_line() {
            let printer = create_test_printer();
            assert_eq!(printer.color_class(4), "coverFull");
            assert_eq!(printer.tooltip(4), "Covered at least once");
            assert_eq!(printer.summary_column(4), "1");
        }

        #[test]
        fn test_all_branches_covered() {
            let printer = create_test_printer();
            assert_eq!(printer.color_class(5), "coverFull");
            assert_eq!(printer.tooltip(5), "All branches covered");
            assert_eq!(printer.summary_column(5), "3/3");
        }

        #[test]
        fn test_partially_covered() {
            let printer = create_test_printer();
            assert_eq!(printer.color_class(6), "coverPart");
            assert_eq!(printer.tooltip(6), "Partially covered, branch coverage: 2/5");
            assert_eq!(printer.summary_column(6), "2/5");
        }

        #[test]
        fn test_modified_and_no_branches_covered() {
            let printer = create_test_printer();
            assert_eq!(printer.modified_color_class(7), "modified");
            assert_eq!(printer.color_class(7), "modified coverNone");
            assert_eq!(printer.tooltip_prefix(7), "Modified");
            assert_eq!(printer.tooltip(7), "Modified, no branches covered");
            assert_eq!(printer.summary_column(7), "0/4");
        }

        #[test]
        fn test_modified_prefix_lowercases_first_letter_only() {
            let file = FileCoverage::new("Foo.java")
                .with_line(9, 4, 0)
                .with_line(10, 1, 1)
                .with_modified_lines([9, 10]);
            let printer = LineCoveragePrinter::new(&file);
            assert_eq!(printer.tooltip(9), "Modified, all branches covered");
            assert_eq!(
                printer.tooltip(10),
                "Modified, partially covered, branch coverage: 1/2"
            );
            assert_eq!(printer.color_class(10), "modified coverPart");
        }

        #[test]
        fn test_single_missed_outcome() {
            let file = FileCoverage::new("Foo.java").with_line(2, 0, 1);
            let printer = LineCoveragePrinter::new(&file);
            assert_eq!(printer.color_class(2), "coverNone");
            assert_eq!(printer.tooltip(2), "Not covered");
            assert_eq!(printer.summary_column(2), "0");
        }

        #[test]
        fn test_counter_sum_does_not_overflow() {
            let file = FileCoverage::new("Foo.java").with_line(1, u32::MAX, u32::MAX);
            let printer = LineCoveragePrinter::new(&file);
            assert_eq!(
                printer.summary_column(1),
                format!("{}/{}", u32::MAX, u64::from(u32::MAX) * 2)
            );
        }
    }

    mod cleanup_tests {
        use super::*;

        #[test]
        fn test_tab_and_spaces() {
            let cleaned = LineCoveragePrinter::cleanup_code("\t   x");
            assert_eq!(cleaned, format!("{}{}x", NBSP.repeat(8), NBSP.repeat(3)));
        }

        #[test]
        fn test_line_breaks_are_removed() {
            let cleaned = LineCoveragePrinter::cleanup_code("a\r\nb\n");
            assert_eq!(cleaned, "ab");
        }

        #[test]
        fn test_tab_is_not_column_aligned() {
            let cleaned = LineCoveragePrinter::cleanup_code("ab\tc");
            assert_eq!(cleaned, format!("ab{}c", NBSP.repeat(8)));
        }
    }

    mod render_tests {
        use super::*;

        #[test]
        fn test_render_painted_line() {
            let printer = create_test_printer();
            assert_eq!(
                printer.render_line(6, "if (a && b) {"),
                "<tr class=\"coverPart\" \
                 data-html-tooltip=\"Partially covered, branch coverage: 2/5\">\
                 <td class=\"line\"><a name=\"6\">6</a></td>\
                 <td class=\"hits\">2/5</td>\
                 <td class=\"code\">if&nbsp;(a&nbsp;&&&nbsp;b)&nbsp;{</td></tr>"
            );
        }

        #[test]
        fn test_render_unpainted_line() {
            let printer = create_test_printer();
            assert_eq!(
                printer.render_line(1, "import java.util.List;"),
                "<tr class=\"noCover\"><td class=\"line\"><a name=\"1\">1</a></td>\
                 <td class=\"hits\"></td>\
                 <td class=\"code\">import&nbsp;java.util.List;</td></tr>"
            );
        }

        #[test]
        fn test_render_modified_line_without_coverage() {
            let printer = create_test_printer();
            let html = printer.render_line(12, "}");
            assert!(html.starts_with(
                "<tr class=\"modified\" data-html-tooltip=\"Modified, not covered\">"
            ));
            assert!(html.contains("<td class=\"hits\">0</td>"));
        }

        #[test]
        fn test_render_uses_markup_sanitizer_by_default() {
            let printer = LineCoveragePrinter::new(&create_test_file());
            let html = printer.render_line(4, "List<String> s = a && b;\r\n");
            assert!(html.contains(
                "<td class=\"code\">List&lt;String&gt;&nbsp;s&nbsp;=&nbsp;a&nbsp;&amp;&amp;&nbsp;b;</td>"
            ));
        }

        #[test]
        fn test_render_with_closure_sanitizer() {
            let printer = LineCoveragePrinter::with_sanitizer(&create_test_file(), |text: &str| {
                format!("[{text}]")
            });
            assert!(printer
                .render_line(4, "x")
                .contains("<td class=\"code\">[x]</td>"));
        }

        #[test]
        fn test_render_is_repeatable() {
            let printer = create_test_printer();
            let first = printer.render_line(6, "\treturn x;");
            let second = printer.render_line(6, "\treturn x;");
            assert_eq!(first, second);
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::BTreeMap;

        fn arb_file() -> impl Strategy<Value = FileCoverage> {
            (
                prop::collection::btree_map(1u32..500, (0u32..6, 0u32..6), 0..60),
                prop::collection::btree_set(1u32..500, 0..20),
            )
                .prop_map(|(lines, modified): (BTreeMap<u32, (u32, u32)>, _)| {
                    lines
                        .into_iter()
                        .fold(FileCoverage::new("Prop.java"), |file, (line, (c, m))| {
                            file.with_line(line, c, m)
                        })
                        .with_modified_lines(modified)
                })
        }

        proptest! {
            #[test]
            fn prop_line_index_matches_membership(file in arb_file(), line in 1u32..520) {
                let printer = LineCoveragePrinter::new(&file);
                let member = file.lines_with_coverage().contains(&line);
                prop_assert_eq!(printer.line_index(line).is_some(), member);
                if let Some(index) = printer.line_index(line) {
                    prop_assert_eq!(file.lines_with_coverage()[index], line);
                }
            }

            #[test]
            fn prop_indices_follow_line_order(file in arb_file()) {
                let printer = LineCoveragePrinter::new(&file);
                let indices: Vec<usize> = file
                    .lines_with_coverage()
                    .iter()
                    .filter_map(|&line| printer.line_index(line))
                    .collect();
                prop_assert_eq!(indices, (0..file.lines_with_coverage().len()).collect::<Vec<_>>());
            }

            #[test]
            fn prop_unpainted_lines_have_no_signal(file in arb_file(), line in 1u32..520) {
                let printer = LineCoveragePrinter::new(&file);
                if !printer.is_painted(line) {
                    prop_assert_eq!(printer.covered(line), 0);
                    prop_assert_eq!(printer.missed(line), 0);
                    prop_assert_eq!(printer.color_class(line), "");
                    prop_assert_eq!(printer.summary_column(line), "0");
                    let html = printer.render_line(line, "x");
                    prop_assert!(html.starts_with("<tr class=\"noCover\">"));
                }
            }

            #[test]
            fn prop_modified_class_comes_first(file in arb_file(), line in 1u32..520) {
                let printer = LineCoveragePrinter::new(&file);
                let class = printer.color_class(line);
                prop_assert_eq!(class.starts_with(MODIFIED), printer.is_modified(line));
                prop_assert_eq!(printer.tooltip(line).starts_with("Modified, "), printer.is_modified(line));
            }

            #[test]
            fn prop_cleanup_removes_raw_whitespace(source in "[ \t\r\na-z<&>]{0,40}") {
                let cleaned = LineCoveragePrinter::cleanup_code(&source);
                prop_assert!(!cleaned.contains(&[' ', '\t', '\r', '\n'][..]));
                let spaces = source.matches(' ').count() + source.matches('\t').count() * TAB_WIDTH;
                prop_assert_eq!(cleaned.matches(NBSP).count(), spaces);
            }

            #[test]
            fn prop_queries_are_pure(file in arb_file(), line in 1u32..520) {
                let printer = LineCoveragePrinter::new(&file);
                prop_assert_eq!(printer.tooltip(line), printer.tooltip(line));
                prop_assert_eq!(printer.render_line(line, "a b"), printer.render_line(line, "a b"));
            }
        }
    }
}
