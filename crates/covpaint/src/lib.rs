//! covpaint: Source Code Painted with Coverage
//!
//! Renders the lines of a source file as HTML table rows annotated with line
//! and branch coverage, ready to be embedded in a coverage report viewer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    COVPAINT Architecture                         │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌──────────────┐    ┌─────────────────┐    ┌──────────────┐   │
//! │   │ FileCoverage │───►│ LineCoverage-   │───►│ <tr> rows    │   │
//! │   │ (snapshot)   │    │ Printer         │    │ (HTML)       │   │
//! │   └──────────────┘    └────────┬────────┘    └──────────────┘   │
//! │                                │ injected                        │
//! │                         ┌──────▼──────┐                          │
//! │                         │  Sanitizer  │                          │
//! │                         └─────────────┘                          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use covpaint::{FileCoverage, LineCoveragePrinter};
//!
//! let file = FileCoverage::new("src/Foo.java")
//!     .with_line(3, 2, 3)
//!     .with_modified_line(3);
//! let printer = LineCoveragePrinter::new(&file);
//!
//! assert_eq!(printer.color_class(3), "modified coverPart");
//! assert_eq!(printer.tooltip(3), "Modified, partially covered, branch coverage: 2/5");
//! assert!(printer.render_line(3, "if (a) {").starts_with("<tr class=\"modified coverPart\""));
//! ```

#![warn(missing_docs)]

pub mod html;
mod model;
mod printer;
mod render;
mod result;
mod sanitizer;

pub use model::{CoverageSnapshot, FileCoverage};
pub use printer::{
    LineCoveragePrinter, FULL_COVERAGE, MODIFIED, NBSP, NO_COVERAGE, PARTIAL_COVERAGE, TAB_WIDTH,
    UNDEFINED,
};
pub use render::{available_threads, render_parallel, render_source, FileSummary, RenderJob};
pub use result::{CovpaintError, CovpaintResult};
pub use sanitizer::{MarkupSanitizer, PassthroughSanitizer, Sanitizer};
