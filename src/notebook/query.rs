//! Section extraction and outline operations
//!
//! This module provides read-only operations over a loaded notebook: splitting
//! its cells into sections at a chosen heading depth, and listing its headings.

use tracing::debug;

use super::models::*;
use super::parsing::heading::detect_heading_marker;
use super::parsing::source::markdown_text;
use crate::error::ExtractError;

/// Partition the notebook's cells into sections
///
/// A markdown heading at or above `split_level` closes the open section and
/// starts a new one with the heading cell as its first cell. Deeper headings
/// and all other cells join the open section. Cells before the first split
/// heading form an "Introduction" section, dropped when empty.
pub fn extract_sections(
    notebook: &Notebook,
    split_level: SplitLevel,
) -> Result<Vec<Section>, ExtractError> {
    let mut sections = Vec::new();
    let mut current = Section::introduction();

    for (index, cell) in notebook.cells.iter().enumerate() {
        let heading = markdown_text(index, cell)?
            .as_deref()
            .and_then(detect_heading_marker)
            .filter(|heading| split_level.splits_at(heading.level));

        match heading {
            Some(HeadingMarker { level, title }) => {
                debug!(index, level, title = %title, "section boundary");
                let next = Section {
                    title,
                    level,
                    cells: vec![cell.clone()],
                };
                let finished = std::mem::replace(&mut current, next);
                if !finished.cells.is_empty() {
                    sections.push(finished);
                }
            }
            None => current.cells.push(cell.clone()),
        }
    }

    if !current.cells.is_empty() {
        sections.push(current);
    }

    Ok(sections)
}

/// Every heading marker in document order, regardless of split level
pub fn generate_outline(notebook: &Notebook) -> Result<Vec<OutlineItem>, ExtractError> {
    let mut outline = Vec::new();

    for (index, cell) in notebook.cells.iter().enumerate() {
        let Some(text) = markdown_text(index, cell)? else {
            continue;
        };
        if let Some(HeadingMarker { level, title }) = detect_heading_marker(&text) {
            outline.push(OutlineItem {
                title,
                level,
                cell_index: index,
            });
        }
    }

    Ok(outline)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(n: u8) -> SplitLevel {
        SplitLevel::new(n).unwrap()
    }

    #[test]
    fn test_empty_notebook_has_no_sections() {
        let notebook = Notebook::new(Vec::new());
        assert!(extract_sections(&notebook, level(1)).unwrap().is_empty());
    }

    #[test]
    fn test_leading_heading_drops_empty_introduction() {
        let notebook = Notebook::new(vec![Cell::markdown("# Start"), Cell::code("x = 1")]);
        let sections = extract_sections(&notebook, level(1)).unwrap();

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Start");
        assert_eq!(sections[0].level, 1);
    }

    #[test]
    fn test_consecutive_headings_each_get_a_section() {
        let notebook = Notebook::new(vec![Cell::markdown("# One"), Cell::markdown("# Two")]);
        let sections = extract_sections(&notebook, level(1)).unwrap();

        let titles: Vec<_> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["One", "Two"]);
        assert!(sections.iter().all(|s| s.cells.len() == 1));
    }

    #[test]
    fn test_headings_in_code_cells_are_ignored() {
        let notebook = Notebook::new(vec![Cell::code("# just a comment"), Cell::code("y = 2")]);
        let sections = extract_sections(&notebook, level(6)).unwrap();

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, INTRODUCTION_TITLE);
        assert_eq!(sections[0].level, 0);
    }

    #[test]
    fn test_outline_lists_all_levels() {
        let notebook = Notebook::new(vec![
            Cell::markdown("# A"),
            Cell::code("pass"),
            Cell::markdown("### B"),
            Cell::markdown("plain text"),
        ]);
        let outline = generate_outline(&notebook).unwrap();

        assert_eq!(
            outline,
            vec![
                OutlineItem {
                    title: "A".to_string(),
                    level: 1,
                    cell_index: 0,
                },
                OutlineItem {
                    title: "B".to_string(),
                    level: 3,
                    cell_index: 2,
                },
            ]
        );
    }
}
