//! nbsplit: split Jupyter notebooks by markdown heading
//!
//! This library loads a notebook, groups its cells into sections at a chosen
//! heading depth, and writes every section out as a standalone notebook.

pub mod config;
pub mod discovery;
pub mod error;
pub mod materialize;
pub mod notebook;
pub mod preview;
pub mod prompt;
pub mod workflow;

/// When to style terminal output
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default)]
pub enum ColorMode {
    /// Style output when stdout is a terminal and NO_COLOR is unset
    #[default]
    Auto,
    Always,
    Never,
}

// Re-export commonly used types
pub use error::{ExtractError, LoadError, MaterializeError, SplitError};
pub use notebook::{Cell, Notebook, Section, SplitLevel};
pub use workflow::{SplitReport, Workflow, WorkflowState, split_notebook};
