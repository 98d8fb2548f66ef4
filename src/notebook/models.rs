//! Core data structures for notebook representation
//!
//! This module defines the public types used to represent a parsed notebook,
//! the sections derived from it, and the split level that drives extraction.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;
use std::str::FromStr;

use crate::error::SplitLevelError;

/// Title of the implicit section holding everything before the first split heading
pub const INTRODUCTION_TITLE: &str = "Introduction";

/// Deepest markdown heading level
pub const MAX_HEADING_LEVEL: u8 = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    pub cells: Vec<Cell>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Format versions are carried exactly as read, whatever their type
    #[serde(default = "default_nbformat")]
    pub nbformat: Value,
    #[serde(default = "default_nbformat_minor")]
    pub nbformat_minor: Value,
}

fn default_nbformat() -> Value {
    json!(4)
}

fn default_nbformat_minor() -> Value {
    json!(2)
}

impl Notebook {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            metadata: Map::new(),
            nbformat: default_nbformat(),
            nbformat_minor: default_nbformat_minor(),
        }
    }

    /// Standalone notebook holding one section's cells and this notebook's
    /// metadata and format versions
    pub fn for_section(&self, section: &Section) -> Notebook {
        Notebook {
            cells: section.cells.clone(),
            metadata: self.metadata.clone(),
            nbformat: self.nbformat.clone(),
            nbformat_minor: self.nbformat_minor.clone(),
        }
    }
}

/// One notebook cell, kept exactly as it was read
///
/// Outputs, ids, execution counts and any other keys travel through a split
/// untouched; only `cell_type` and `source` are ever inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cell(Value);

impl Cell {
    pub fn from_value(value: Value) -> Self {
        Cell(value)
    }

    /// Markdown cell whose source is split into lines the way Jupyter stores it
    pub fn markdown(text: &str) -> Self {
        Cell(json!({
            "cell_type": "markdown",
            "metadata": {},
            "source": split_source(text),
        }))
    }

    pub fn code(text: &str) -> Self {
        Cell(json!({
            "cell_type": "code",
            "execution_count": null,
            "metadata": {},
            "outputs": [],
            "source": split_source(text),
        }))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn kind(&self) -> CellKind {
        match self.0.get("cell_type").and_then(Value::as_str) {
            Some("markdown") => CellKind::Markup,
            _ => CellKind::Other,
        }
    }
}

fn split_source(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Markdown; the only kind inspected for headings
    Markup,
    Other,
}

/// Heading found at the start of a markdown cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingMarker {
    pub level: u8,
    pub title: String,
}

/// Contiguous run of cells grouped under one heading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub title: String,
    /// 0 for the implicit introduction, 1-6 otherwise
    pub level: u8,
    pub cells: Vec<Cell>,
}

impl Section {
    pub(crate) fn introduction() -> Self {
        Self {
            title: INTRODUCTION_TITLE.to_string(),
            level: 0,
            cells: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineItem {
    pub title: String,
    pub level: u8,
    pub cell_index: usize,
}

/// Deepest heading level that still opens a new section
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SplitLevel(u8);

impl SplitLevel {
    pub fn new(level: u8) -> Result<Self, SplitLevelError> {
        if (1..=MAX_HEADING_LEVEL).contains(&level) {
            Ok(SplitLevel(level))
        } else {
            Err(SplitLevelError::OutOfRange(i64::from(level)))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Whether a heading at `level` opens a new section
    pub fn splits_at(self, level: u8) -> bool {
        level <= self.0
    }

    pub fn all() -> impl Iterator<Item = SplitLevel> {
        (1..=MAX_HEADING_LEVEL).map(SplitLevel)
    }
}

impl Default for SplitLevel {
    fn default() -> Self {
        SplitLevel(1)
    }
}

impl TryFrom<u8> for SplitLevel {
    type Error = SplitLevelError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        SplitLevel::new(level)
    }
}

impl FromStr for SplitLevel {
    type Err = SplitLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix(&['H', 'h'][..]).unwrap_or(s);
        let level: i64 = s
            .parse()
            .map_err(|_| SplitLevelError::NotANumber(s.to_string()))?;
        u8::try_from(level)
            .ok()
            .and_then(|level| SplitLevel::new(level).ok())
            .ok_or(SplitLevelError::OutOfRange(level))
    }
}

impl fmt::Display for SplitLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_level_bounds() {
        assert!(SplitLevel::new(0).is_err());
        assert!(SplitLevel::new(7).is_err());
        assert_eq!(SplitLevel::new(3).unwrap().get(), 3);
        assert_eq!(SplitLevel::all().count(), 6);
    }

    #[test]
    fn test_split_level_parsing() {
        assert_eq!("2".parse::<SplitLevel>().unwrap().get(), 2);
        assert_eq!("H4".parse::<SplitLevel>().unwrap().get(), 4);
        assert_eq!(
            "9".parse::<SplitLevel>(),
            Err(SplitLevelError::OutOfRange(9))
        );
        assert_eq!(
            "-1".parse::<SplitLevel>(),
            Err(SplitLevelError::OutOfRange(-1))
        );
        assert!(matches!(
            "deep".parse::<SplitLevel>(),
            Err(SplitLevelError::NotANumber(_))
        ));
    }

    #[test]
    fn test_cell_kind() {
        assert_eq!(Cell::markdown("# Title").kind(), CellKind::Markup);
        assert_eq!(Cell::code("x = 1").kind(), CellKind::Other);
        assert_eq!(
            Cell::from_value(json!({"cell_type": "raw"})).kind(),
            CellKind::Other
        );
    }

    #[test]
    fn test_markdown_source_keeps_line_breaks() {
        let cell = Cell::markdown("# Title\nbody");
        assert_eq!(cell.as_value()["source"], json!(["# Title\n", "body"]));
    }
}
