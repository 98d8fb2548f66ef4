//! Writing sections out as standalone notebooks
//!
//! Each section becomes a notebook carrying the source notebook's metadata and
//! format versions, written to `<sanitized title>.<extension>`. File names are
//! not de-duplicated: two sections whose titles sanitize to the same name
//! write to the same file and the later one wins.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::MaterializeError;
use crate::notebook::{Notebook, Section, to_notebook_json};

static UNSAFE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").unwrap());
static SEPARATOR_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-\s]+").unwrap());

#[derive(Debug, Clone)]
pub struct MaterializeOptions {
    /// Output file extension, without the dot
    pub extension: String,
}

impl Default for MaterializeOptions {
    fn default() -> Self {
        Self {
            extension: "ipynb".to_string(),
        }
    }
}

/// File-safe base name for a section title
///
/// Characters other than word characters, whitespace and `-` become `_`, then
/// every run of `-` and whitespace becomes `__`.
pub fn sanitize_title(title: &str) -> String {
    let safe = UNSAFE_CHARS.replace_all(title, "_");
    SEPARATOR_RUNS.replace_all(&safe, "__").into_owned()
}

pub fn section_file_name(section: &Section, options: &MaterializeOptions) -> String {
    format!("{}.{}", sanitize_title(&section.title), options.extension)
}

/// Write one notebook per section into `output_dir`, returning the written paths
///
/// The directory is created if missing. On a write failure the notebooks
/// already written stay on disk.
pub async fn materialize_sections(
    notebook: &Notebook,
    sections: &[Section],
    output_dir: &Path,
    options: &MaterializeOptions,
) -> Result<Vec<PathBuf>, MaterializeError> {
    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|source| MaterializeError::CreateDir {
            path: output_dir.to_path_buf(),
            source,
        })?;

    let mut created = Vec::with_capacity(sections.len());
    let mut written = HashSet::new();

    for section in sections {
        let content = to_notebook_json(&notebook.for_section(section)).map_err(|source| {
            MaterializeError::Serialize {
                title: section.title.clone(),
                source,
            }
        })?;

        let path = output_dir.join(section_file_name(section, options));
        if !written.insert(path.clone()) {
            warn!(title = %section.title, path = %path.display(), "section overwrites an earlier one");
        }

        tokio::fs::write(&path, content)
            .await
            .map_err(|source| MaterializeError::Write {
                path: path.clone(),
                source,
            })?;

        info!(path = %path.display(), cells = section.cells.len(), "created notebook");
        created.push(path);
    }

    Ok(created)
}
