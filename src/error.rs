//! Error types for each stage of a notebook split
//!
//! Every stage reports its own error type. The workflow wraps whichever one
//! fired in a [`SplitError`] whose message names the failing stage.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::workflow::WorkflowState;

/// Reading or parsing the input notebook failed
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{} is not a notebook: {source}", .path.display())]
    Shape {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The loaded cells could not be walked
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("cell {index} is malformed: {reason}")]
    MalformedCell { index: usize, reason: &'static str },
    #[error("no notebook has been loaded")]
    NotLoaded,
}

/// Writing one of the section notebooks failed
#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error("cannot create output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot serialize section {title:?}: {source}")]
    Serialize {
        title: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no notebook has been loaded")]
    NotLoaded,
}

/// A split level outside `1..=6`
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SplitLevelError {
    #[error("split level must be between 1 and 6, got {0}")]
    OutOfRange(i64),
    #[error("split level must be a number, got {0:?}")]
    NotANumber(String),
}

/// Terminal failure of a split run
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("Load error: {0}")]
    Load(#[from] LoadError),
    #[error("Extract error: {0}")]
    Extract(#[from] ExtractError),
    #[error("Create error: {0}")]
    Materialize(#[from] MaterializeError),
}

impl SplitError {
    /// The working state that failed
    pub fn stage(&self) -> WorkflowState {
        match self {
            SplitError::Load(_) => WorkflowState::Loading,
            SplitError::Extract(_) => WorkflowState::Extracting,
            SplitError::Materialize(_) => WorkflowState::Materializing,
        }
    }
}
