//! Command handlers - extracted from main.rs for testability

pub mod render;
pub mod summary;

pub use render::{execute_render, file_marker, load_snapshot, output_path, relative_path, select_files};
pub use summary::{execute_summary, render_summary_text, summarize};
