//! Interactive prompts for the command line
//!
//! Prompts read from any `BufRead` and write to any `Write`, so the CLI passes
//! stdin/stdout and tests pass in-memory buffers.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::discovery::NotebookEntry;
use crate::notebook::SplitLevel;

fn read_answer<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// List the notebooks and ask for a 1-based choice
///
/// Returns `None` for an out-of-range or non-numeric answer.
pub fn select_notebook<R: BufRead, W: Write>(
    entries: &[NotebookEntry],
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<PathBuf>> {
    writeln!(output, "\nFound {} notebook(s):", entries.len())?;
    writeln!(output, "{}", "-".repeat(40))?;
    for (index, entry) in entries.iter().enumerate() {
        writeln!(output, "{:2}. {}", index + 1, entry.path.display())?;
        writeln!(
            output,
            "     {} | {}",
            entry.size_label(),
            entry.modified_label()
        )?;
        writeln!(output)?;
    }
    writeln!(output, "{}", "-".repeat(40))?;
    write!(output, "Select (1-{}): ", entries.len())?;
    output.flush()?;

    let Some(answer) = read_answer(input)? else {
        return Ok(None);
    };
    match answer.parse::<usize>() {
        Ok(choice) if (1..=entries.len()).contains(&choice) => {
            Ok(Some(entries[choice - 1].path.clone()))
        }
        Ok(_) => {
            writeln!(output, "Invalid selection.")?;
            Ok(None)
        }
        Err(_) => {
            writeln!(output, "Enter a number.")?;
            Ok(None)
        }
    }
}

/// Ask for a split level, re-prompting until the answer is valid
///
/// An empty answer, or end of input, picks `default`.
pub fn select_split_level<R: BufRead, W: Write>(
    default: SplitLevel,
    input: &mut R,
    output: &mut W,
) -> io::Result<SplitLevel> {
    writeln!(output, "\nSplit level:")?;
    for level in SplitLevel::all() {
        let range = if level.get() == 1 {
            "H1 only".to_string()
        } else {
            format!("H1-{level}")
        };
        writeln!(output, "  {}. {range}", level.get())?;
    }

    loop {
        write!(output, "\nSelect (1-6, default {}): ", default.get())?;
        output.flush()?;

        let answer = match read_answer(input)? {
            None => return Ok(default),
            Some(answer) if answer.is_empty() => return Ok(default),
            Some(answer) => answer,
        };
        match answer.parse::<SplitLevel>() {
            Ok(level) => return Ok(level),
            Err(err) => writeln!(output, "{err}")?,
        }
    }
}

/// Yes/no question; only `y` or `yes` (any case) count as yes
pub fn confirm<R: BufRead, W: Write>(
    question: &str,
    input: &mut R,
    output: &mut W,
) -> io::Result<bool> {
    write!(output, "{question} (y/N): ")?;
    output.flush()?;

    let answer = read_answer(input)?.unwrap_or_default().to_lowercase();
    Ok(matches!(answer.as_str(), "y" | "yes"))
}

/// Ask for the output directory, keeping `default` on an empty answer
pub fn output_dir<R: BufRead, W: Write>(
    default: &Path,
    input: &mut R,
    output: &mut W,
) -> io::Result<PathBuf> {
    write!(output, "Output dir (default: {}): ", default.display())?;
    output.flush()?;

    match read_answer(input)? {
        Some(answer) if !answer.is_empty() => Ok(PathBuf::from(answer)),
        _ => Ok(default.to_path_buf()),
    }
}
