//! Notebook discovery
//!
//! Finds candidate notebooks under a directory for the interactive picker and
//! the `list` command.

use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct NotebookEntry {
    pub path: PathBuf,
    pub size: Option<u64>,
    pub modified: Option<SystemTime>,
}

impl NotebookEntry {
    pub fn size_label(&self) -> String {
        self.size.map_or_else(|| "Unknown".to_string(), format_size)
    }

    pub fn modified_label(&self) -> String {
        self.modified
            .map_or_else(|| "Unknown".to_string(), format_modified)
    }
}

/// Every `.ipynb` file under `root` whose name does not start with a dot, sorted by path
///
/// Symlinks to files are listed; symlinked directories are not descended into.
pub fn discover_notebooks(root: &Path) -> Vec<NotebookEntry> {
    let mut entries: Vec<NotebookEntry> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!("skipping unreadable entry: {err}");
                None
            }
        })
        .filter(|entry| is_file(entry) && is_notebook_name(entry.file_name()))
        .map(|entry| {
            let metadata = fs::metadata(entry.path()).ok();
            NotebookEntry {
                size: metadata.as_ref().map(|m| m.len()),
                modified: metadata.and_then(|m| m.modified().ok()),
                path: entry.into_path(),
            }
        })
        .collect();

    entries.sort_by(|a, b| a.path.to_string_lossy().cmp(&b.path.to_string_lossy()));
    entries
}

fn is_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

fn is_notebook_name(name: &std::ffi::OsStr) -> bool {
    let name = name.to_string_lossy();
    name.ends_with(".ipynb") && !name.starts_with('.')
}

pub fn format_size(size: u64) -> String {
    if size < MIB {
        format!("{:.1} KB", size as f64 / KIB as f64)
    } else {
        format!("{:.1} MB", size as f64 / MIB as f64)
    }
}

fn format_modified(modified: SystemTime) -> String {
    let modified: DateTime<Local> = modified.into();
    modified.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "0.5 KB");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * MIB / 2), "1.5 MB");
    }

    #[test]
    fn test_discovers_nested_notebooks_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("b/nested")).unwrap();
        fs::write(dir.path().join("b/nested/z.ipynb"), "{}").unwrap();
        fs::write(dir.path().join("a.ipynb"), "{}").unwrap();
        fs::write(dir.path().join(".hidden.ipynb"), "{}").unwrap();
        fs::write(dir.path().join("notes.md"), "# no").unwrap();

        let found: Vec<_> = discover_notebooks(dir.path())
            .into_iter()
            .map(|entry| entry.path.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            found,
            [PathBuf::from("a.ipynb"), PathBuf::from("b/nested/z.ipynb")]
        );
    }

    fn relative_paths(root: &Path) -> Vec<String> {
        discover_notebooks(root)
            .into_iter()
            .map(|entry| {
                entry
                    .path
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect()
    }

    #[test]
    fn test_sorted_as_path_strings() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::create_dir_all(dir.path().join("a-b")).unwrap();
        fs::write(dir.path().join("a/x.ipynb"), "{}").unwrap();
        fs::write(dir.path().join("a-b/x.ipynb"), "{}").unwrap();

        assert_eq!(relative_paths(dir.path()), ["a-b/x.ipynb", "a/x.ipynb"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_notebooks_are_listed() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("real.ipynb");
        fs::write(&target, "{\"cells\": []}").unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("link.ipynb")).unwrap();
        fs::create_dir(dir.path().join("inner")).unwrap();
        fs::write(dir.path().join("inner/deep.ipynb"), "{}").unwrap();
        std::os::unix::fs::symlink(dir.path().join("inner"), dir.path().join("alias")).unwrap();

        assert_eq!(
            relative_paths(dir.path()),
            ["inner/deep.ipynb", "link.ipynb", "real.ipynb"]
        );
        let link = &discover_notebooks(dir.path())[1];
        assert_eq!(link.size, Some(13));
    }

    #[test]
    fn test_entry_labels() {
        let entry = NotebookEntry {
            path: PathBuf::from("x.ipynb"),
            size: None,
            modified: None,
        };
        assert_eq!(entry.size_label(), "Unknown");
        assert_eq!(entry.modified_label(), "Unknown");
    }
}
