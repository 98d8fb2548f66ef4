use anyhow::Result;
use crossterm::style::{Attribute, Color, ResetColor, SetAttribute, SetForegroundColor};
use std::collections::BTreeMap;
use std::fmt::Write;
use std::io::IsTerminal;

use crate::ColorMode;
use crate::notebook::{OutlineItem, SplitLevel};

pub struct PreviewOptions {
    pub terminal_width: usize,
    pub color: bool,
}

impl PreviewOptions {
    pub fn for_mode(mode: ColorMode) -> Self {
        let color = match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
            }
        };
        Self {
            color,
            ..Self::default()
        }
    }
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            terminal_width: std::env::var("COLUMNS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(80),
            color: false,
        }
    }
}

/// Heading tree of a notebook with the points where it will be split
pub fn render_preview(
    name: &str,
    outline: &[OutlineItem],
    split_level: SplitLevel,
    options: &PreviewOptions,
) -> Result<String> {
    let mut output = String::new();
    let separator = "=".repeat(std::cmp::min(50, options.terminal_width));

    writeln!(output, "{}", styled(&format!("Structure: {name}"), true, None, options))?;
    writeln!(output, "Split level: {split_level}")?;
    writeln!(output, "{separator}")?;

    if outline.is_empty() {
        writeln!(output, "No headings found.")?;
        return Ok(output);
    }

    for item in outline {
        let is_split = split_level.splits_at(item.level);
        let marker = if is_split { "> " } else { "  " };
        let indent = "  ".repeat(usize::from(item.level.saturating_sub(1)));
        let heading = format!("{} {}", "#".repeat(usize::from(item.level)), item.title);
        let color = is_split.then_some(Color::Green);
        writeln!(
            output,
            "{marker}{indent}{}",
            styled(&heading, is_split, color, options)
        )?;
    }

    let split_points = outline
        .iter()
        .filter(|item| split_level.splits_at(item.level))
        .count();
    let mut level_counts: BTreeMap<u8, usize> = BTreeMap::new();
    for item in outline {
        *level_counts.entry(item.level).or_default() += 1;
    }

    writeln!(output)?;
    writeln!(output, "{separator}")?;
    writeln!(output, "{}", styled("Summary:", true, None, options))?;
    writeln!(output, "  - Headings: {}", outline.len())?;
    writeln!(output, "  - Split points: {split_points}")?;
    writeln!(output, "  - Notebooks: ~{split_points}")?;
    writeln!(output, "  - Levels:")?;
    for (level, count) in &level_counts {
        let split_marker = if split_level.splits_at(*level) {
            " (SPLIT)"
        } else {
            ""
        };
        writeln!(output, "      H{level}: {count}{split_marker}")?;
    }
    writeln!(output, "{separator}")?;

    Ok(output)
}

fn styled(text: &str, bold: bool, color: Option<Color>, options: &PreviewOptions) -> String {
    if !options.color || (!bold && color.is_none()) {
        return text.to_string();
    }

    let mut result = String::new();
    if bold {
        result.push_str(&format!("{}", SetAttribute(Attribute::Bold)));
    }
    if let Some(color) = color {
        result.push_str(&format!("{}", SetForegroundColor(color)));
    }
    result.push_str(text);

    // Reset so styling does not bleed into the next line
    result.push_str(&format!("{}{ResetColor}", SetAttribute(Attribute::Reset)));
    result
}
