//! Property-Based Tests
//!
//! Invariants of section extraction over generated notebooks:
//! - Sections cover every cell exactly once, in order
//! - Headings at or above the split level start sections, deeper ones never do
//! - Notebooks without split headings stay whole

use nbsplit::notebook::{Cell, INTRODUCTION_TITLE, Notebook, SplitLevel, extract_sections};
use proptest::prelude::*;

/// A markdown heading, plain markdown, or a code cell
fn cell_strategy() -> impl Strategy<Value = Cell> {
    prop_oneof![
        (1u8..=6, "[A-Za-z][A-Za-z0-9 ]{0,12}")
            .prop_map(|(level, title)| Cell::markdown(&format!("{} {title}", "#".repeat(level.into())))),
        "[a-z ]{0,20}".prop_map(|text| Cell::markdown(&text)),
        "[a-z =0-9]{0,20}".prop_map(|text| Cell::code(&text)),
    ]
}

fn notebook_strategy() -> impl Strategy<Value = Notebook> {
    prop::collection::vec(cell_strategy(), 0..40).prop_map(Notebook::new)
}

fn heading_level(cell: &Cell) -> Option<u8> {
    let source = cell.as_value()["source"].as_array()?;
    let text: String = source.iter().filter_map(|s| s.as_str()).collect();
    if cell.as_value()["cell_type"] != "markdown" {
        return None;
    }
    let hashes = text.chars().take_while(|&c| c == '#').count();
    (hashes > 0 && text[hashes..].starts_with(' ')).then_some(hashes as u8)
}

// ============================================================================
// Coverage
// ============================================================================

/// Property: concatenated sections reproduce the notebook's cells
#[test]
fn proptest_sections_cover_all_cells() {
    proptest!(|(notebook in notebook_strategy(), level in 1u8..=6)| {
        let sections = extract_sections(&notebook, SplitLevel::new(level).unwrap()).unwrap();

        let rejoined: Vec<Cell> = sections.iter().flat_map(|s| s.cells.clone()).collect();
        prop_assert_eq!(rejoined, notebook.cells.clone());
        prop_assert!(sections.iter().all(|s| !s.cells.is_empty()));
    });
}

// ============================================================================
// Boundaries
// ============================================================================

/// Property: section starts are exactly the split headings
#[test]
fn proptest_boundaries_follow_split_level() {
    proptest!(|(notebook in notebook_strategy(), level in 1u8..=6)| {
        let split = SplitLevel::new(level).unwrap();
        let sections = extract_sections(&notebook, split).unwrap();

        let mut index = 0;
        for (position, section) in sections.iter().enumerate() {
            for (offset, cell) in section.cells.iter().enumerate() {
                let starts_section = heading_level(cell).is_some_and(|l| l <= level);
                if offset == 0 && section.level > 0 {
                    prop_assert!(starts_section, "section {} must open on a split heading", position);
                    prop_assert_eq!(heading_level(cell), Some(section.level));
                } else {
                    prop_assert!(!starts_section, "cell {} should have opened a section", index);
                }
                index += 1;
            }
        }
    });
}

/// Property: no split heading means one introduction section
#[test]
fn proptest_no_split_heading_keeps_notebook_whole() {
    let plain = prop::collection::vec(
        prop_oneof![
            "[a-z ]{0,20}".prop_map(|text| Cell::markdown(&text)),
            "[a-z =0-9]{0,20}".prop_map(|text| Cell::code(&text)),
        ],
        1..20,
    );
    proptest!(|(cells in plain)| {
        let notebook = Notebook::new(cells);
        let sections = extract_sections(&notebook, SplitLevel::new(6).unwrap()).unwrap();

        prop_assert_eq!(sections.len(), 1);
        prop_assert_eq!(sections[0].title.as_str(), INTRODUCTION_TITLE);
        prop_assert_eq!(sections[0].level, 0);
        prop_assert_eq!(&sections[0].cells, &notebook.cells);
    });
}
