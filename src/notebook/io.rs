//! File I/O operations and validation
//!
//! This module handles input path validation and writing notebooks to disk.

use anyhow::{Result, bail};
use std::path::Path;

use super::models::Notebook;

/// Validates that the path names an existing `.ipynb` file
pub fn validate_notebook_path(file_path: &Path) -> Result<()> {
    if !file_path.exists() {
        bail!("File not found: {}", file_path.display());
    }

    let extension = file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    if extension != "ipynb" {
        bail!(
            "Invalid file format. Expected .ipynb file, got .{}\n\
            Note: nbsplit only splits Jupyter notebooks",
            extension
        );
    }

    Ok(())
}

/// Notebook JSON as written to disk: two-space indentation, keys in input order
pub fn to_notebook_json(notebook: &Notebook) -> serde_json::Result<String> {
    serde_json::to_string_pretty(notebook)
}
