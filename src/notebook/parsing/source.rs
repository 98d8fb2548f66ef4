//! Rendering a markdown cell's source text

use serde_json::Value;

use super::super::models::{Cell, CellKind};
use crate::error::ExtractError;

/// Rendered text of a markdown cell, or `None` for any other kind of cell
///
/// `source` may be a list of fragments or a single string; fragments are
/// joined with no separator. A missing `source` renders as empty text.
pub(crate) fn markdown_text(index: usize, cell: &Cell) -> Result<Option<String>, ExtractError> {
    let fields = cell
        .as_value()
        .as_object()
        .ok_or(ExtractError::MalformedCell {
            index,
            reason: "expected a mapping",
        })?;

    if cell.kind() != CellKind::Markup {
        return Ok(None);
    }

    let text = match fields.get("source") {
        None => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Array(fragments)) => {
            let mut text = String::new();
            for fragment in fragments {
                let fragment = fragment.as_str().ok_or(ExtractError::MalformedCell {
                    index,
                    reason: "source fragments must be strings",
                })?;
                text.push_str(fragment);
            }
            text
        }
        Some(_) => {
            return Err(ExtractError::MalformedCell {
                index,
                reason: "source must be a string or a list of strings",
            });
        }
    };

    Ok(Some(text))
}
