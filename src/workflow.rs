//! Split workflow state machine
//!
//! A run moves through `Start -> Loading -> Extracting -> Materializing ->
//! Success`. Each working state runs one stage to completion; if that stage
//! recorded an error the run goes straight to `Error`. Both terminal states
//! have no outgoing transitions and no stage is ever retried.

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::error::{ExtractError, MaterializeError, SplitError};
use crate::materialize::{MaterializeOptions, materialize_sections};
use crate::notebook::{Notebook, Section, SplitLevel, extract_sections, load_notebook};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowState {
    Start,
    Loading,
    Extracting,
    Materializing,
    Success,
    Error,
}

/// Condition attached to a transition in the workflow graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Always,
    Ok,
    Failed,
}

impl WorkflowState {
    pub fn is_terminal(self) -> bool {
        matches!(self, WorkflowState::Success | WorkflowState::Error)
    }

    /// State entered after this one completes, given whether it failed
    pub fn next(self, failed: bool) -> Option<WorkflowState> {
        use WorkflowState::*;

        match self {
            Start => Some(Loading),
            Loading | Extracting | Materializing if failed => Some(Error),
            Loading => Some(Extracting),
            Extracting => Some(Materializing),
            Materializing => Some(Success),
            Success | Error => None,
        }
    }

    /// Every edge of the workflow graph
    pub fn transitions() -> Vec<(WorkflowState, Edge, WorkflowState)> {
        use WorkflowState::*;

        let mut edges = vec![(Start, Edge::Always, Loading)];
        for state in [Loading, Extracting, Materializing] {
            if let Some(next) = state.next(false) {
                edges.push((state, Edge::Ok, next));
            }
            edges.push((state, Edge::Failed, Error));
        }
        edges
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowState::Start => "start",
            WorkflowState::Loading => "load_notebook",
            WorkflowState::Extracting => "extract_sections",
            WorkflowState::Materializing => "create_notebooks",
            WorkflowState::Success => "finalize_success",
            WorkflowState::Error => "handle_error",
        };
        f.write_str(name)
    }
}

/// Text rendering of the workflow graph, one edge per line
pub fn render_workflow_graph() -> String {
    let mut graph = String::new();
    for (from, edge, to) in WorkflowState::transitions() {
        let label = match edge {
            Edge::Always => String::new(),
            Edge::Ok => " [success]".to_string(),
            Edge::Failed => " [error]".to_string(),
        };
        graph.push_str(&format!("{from} -> {to}{label}\n"));
    }
    graph
}

/// Everything one split run owns
#[derive(Debug)]
pub struct WorkflowContext {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub split_level: SplitLevel,
    pub notebook: Option<Notebook>,
    pub sections: Vec<Section>,
    pub created: Vec<PathBuf>,
    pub error: Option<SplitError>,
    pub state: WorkflowState,
}

impl WorkflowContext {
    pub fn new(input_path: &Path, output_dir: &Path, split_level: SplitLevel) -> Self {
        Self {
            input_path: input_path.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            split_level,
            notebook: None,
            sections: Vec::new(),
            created: Vec::new(),
            error: None,
            state: WorkflowState::Start,
        }
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

/// Outcome of a successful split
#[derive(Debug, Clone, PartialEq)]
pub struct SplitReport {
    pub created: Vec<PathBuf>,
    pub output_dir: PathBuf,
    /// Section titles in notebook order
    pub sections: Vec<String>,
}

impl SplitReport {
    pub fn count(&self) -> usize {
        self.created.len()
    }
}

pub struct Workflow {
    context: WorkflowContext,
    options: MaterializeOptions,
}

impl Workflow {
    pub fn new(input_path: &Path, output_dir: &Path, split_level: SplitLevel) -> Self {
        Self {
            context: WorkflowContext::new(input_path, output_dir, split_level),
            options: MaterializeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: MaterializeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn state(&self) -> WorkflowState {
        self.context.state
    }

    pub fn context(&self) -> &WorkflowContext {
        &self.context
    }

    pub fn into_context(self) -> WorkflowContext {
        self.context
    }

    /// Run the current state to completion and move to the next one
    ///
    /// Does nothing once a terminal state has been reached.
    pub async fn step(&mut self) -> WorkflowState {
        let state = self.context.state;
        match state {
            WorkflowState::Start | WorkflowState::Success | WorkflowState::Error => {}
            WorkflowState::Loading => self.load().await,
            WorkflowState::Extracting => self.extract(),
            WorkflowState::Materializing => self.materialize().await,
        }

        if let Some(next) = state.next(self.context.error.is_some()) {
            self.context.state = next;
            match next {
                WorkflowState::Success => info!(
                    created = self.context.created.len(),
                    output = %self.context.output_dir.display(),
                    "split finished"
                ),
                WorkflowState::Error => {
                    if let Some(message) = self.context.error_message() {
                        error!(stage = %state, "{message}");
                    }
                }
                _ => {}
            }
        }
        self.context.state
    }

    /// Drive the workflow until it reaches `Success` or `Error`
    pub async fn run_to_end(&mut self) -> WorkflowState {
        while !self.context.state.is_terminal() {
            self.step().await;
        }
        self.context.state
    }

    pub async fn run(mut self) -> Result<SplitReport, SplitError> {
        self.run_to_end().await;

        let context = self.context;
        if let Some(err) = context.error {
            return Err(err);
        }
        Ok(SplitReport {
            created: context.created,
            output_dir: context.output_dir,
            sections: context.sections.into_iter().map(|s| s.title).collect(),
        })
    }

    async fn load(&mut self) {
        match load_notebook(&self.context.input_path).await {
            Ok(notebook) => self.context.notebook = Some(notebook),
            Err(err) => self.context.error = Some(err.into()),
        }
    }

    fn extract(&mut self) {
        let result = self
            .context
            .notebook
            .as_ref()
            .ok_or(ExtractError::NotLoaded)
            .and_then(|notebook| extract_sections(notebook, self.context.split_level));

        match result {
            Ok(sections) => {
                info!(
                    sections = sections.len(),
                    level = %self.context.split_level,
                    "found sections"
                );
                self.context.sections = sections;
            }
            Err(err) => self.context.error = Some(err.into()),
        }
    }

    async fn materialize(&mut self) {
        let Some(notebook) = self.context.notebook.as_ref() else {
            self.context.error = Some(MaterializeError::NotLoaded.into());
            return;
        };

        match materialize_sections(
            notebook,
            &self.context.sections,
            &self.context.output_dir,
            &self.options,
        )
        .await
        {
            Ok(created) => self.context.created = created,
            Err(err) => self.context.error = Some(err.into()),
        }
    }
}

/// Split the notebook at `input_path` into `output_dir`, one notebook per section
pub async fn split_notebook(
    input_path: &Path,
    output_dir: &Path,
    split_level: SplitLevel,
) -> Result<SplitReport, SplitError> {
    Workflow::new(input_path, output_dir, split_level).run().await
}
