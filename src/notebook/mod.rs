//! Notebook parsing and data structures module
//!
//! This module loads Jupyter notebooks, models their cells, and derives the
//! sections and heading outline used to split them.

pub(crate) mod io;
pub mod loader;
pub mod models;
pub(crate) mod parsing;
pub mod query;

pub use io::{to_notebook_json, validate_notebook_path};
pub use loader::load_notebook;
pub use models::*;
pub use query::*;
