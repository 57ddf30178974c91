//! The scaffold pipeline
//!
//! This module provides:
//! - [`Scaffolder`], which runs checkout, install, modules, materialization,
//!   formatting and the final report in a fixed order
//! - [`ScaffoldError`], the fatal failures that stop a run
//! - [`Reporter`], the progress sink the pipeline writes to

mod orchestrator;
pub mod report;

pub use orchestrator::{Scaffolder, TEMPLATE_FORMAT_SCRIPT};
pub use report::{Degradation, ScaffoldReport};

use crate::modules::{Module, StepError};
use crate::template::TemplateError;
use crate::workspace::WorkspaceError;
use thiserror::Error;

/// A failure that aborts the run
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("Failed to create the project: `{command}` failed")]
    Checkout { command: String },

    #[error("Failed to install dependencies: `{command}` failed")]
    Install { command: String },

    #[error("{module} setup failed: {source}")]
    Module {
        module: Module,
        #[source]
        source: StepError,
    },

    #[error(transparent)]
    Materialize(#[from] WorkspaceError),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Process exit status of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
        }
    }
}

impl<T, E> From<&Result<T, E>> for ExitStatus {
    fn from(result: &Result<T, E>) -> Self {
        if result.is_ok() {
            ExitStatus::Success
        } else {
            ExitStatus::Failure
        }
    }
}

/// Receives progress from the pipeline
pub trait Reporter {
    /// A step is starting
    fn step(&mut self, message: &str);

    /// A non-fatal step failed
    fn warn(&mut self, message: &str);

    /// The run completed; called before the editor is launched
    fn finish(&mut self, report: &ScaffoldReport);
}

/// Reports through the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn step(&mut self, message: &str) {
        log::info!("{}", message);
    }

    fn warn(&mut self, message: &str) {
        log::warn!("{}", message);
    }

    fn finish(&mut self, report: &ScaffoldReport) {
        println!("{}", report.render());
    }
}
