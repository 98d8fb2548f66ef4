//! Notebook loading
//!
//! Reads a `.ipynb` file and parses it into a [`Notebook`]. The top level must
//! be a mapping with a `cells` list; `metadata`, `nbformat` and
//! `nbformat_minor` are optional and default the way Jupyter does.

use serde_json::Value;
use std::path::Path;
use tracing::info;

use super::models::Notebook;
use crate::error::LoadError;

pub async fn load_notebook(path: &Path) -> Result<Notebook, LoadError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let notebook = parse_notebook(path, &content)?;
    info!(path = %path.display(), cells = notebook.cells.len(), "loaded notebook");
    Ok(notebook)
}

/// Parse notebook JSON, telling malformed JSON apart from JSON of the wrong shape
pub(crate) fn parse_notebook(path: &Path, content: &str) -> Result<Notebook, LoadError> {
    let value: Value = serde_json::from_str(content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    // A JSON array would otherwise deserialize positionally into the struct
    if !value.is_object() {
        return Err(LoadError::Shape {
            path: path.to_path_buf(),
            source: serde::de::Error::custom("expected a mapping at the top level"),
        });
    }

    serde_json::from_value(value).map_err(|source| LoadError::Shape {
        path: path.to_path_buf(),
        source,
    })
}
