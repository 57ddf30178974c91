//! Optional project modules layered onto the checked-out template
//!
//! Modules run in the order of [`Module::ORDER`]. Each one is gated by a pure
//! precondition over the [`Configuration`] and receives everything it may
//! touch through a [`StepContext`].

mod container;
mod cors;
mod document_db;
mod entry_point;
mod libraries;
mod orm;

use crate::config::Configuration;
use crate::runtime::{CommandRunner, ShellCommand};
use crate::template::{TemplateContext, TemplateError};
use crate::workspace::{Workspace, WorkspaceError};
use std::fmt;
use thiserror::Error;

/// Why a module step stopped the pipeline
#[derive(Debug, Error)]
pub enum StepError {
    #[error("`{command}` failed")]
    Command { command: String },

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// State handed to a module step
pub struct StepContext<'a, R> {
    pub config: &'a Configuration,
    pub workspace: &'a mut Workspace,
    pub template: &'a mut TemplateContext,
    pub runner: &'a mut R,
}

impl<R: CommandRunner> StepContext<'_, R> {
    /// Run a command whose failure aborts the pipeline
    pub async fn run_fatal(&mut self, command: ShellCommand) -> Result<(), StepError> {
        if self.runner.execute(&command).await {
            Ok(())
        } else {
            Err(StepError::Command {
                command: command.to_string(),
            })
        }
    }
}

/// A module the generator knows how to install
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Module {
    Container,
    DocumentDatabase,
    Orm,
    EntryPoint,
    ExtraLibraries,
    CrossOrigin,
}

impl Module {
    /// Declaration order, which is also execution order
    pub const ORDER: [Module; 6] = [
        Module::Container,
        Module::DocumentDatabase,
        Module::Orm,
        Module::EntryPoint,
        Module::ExtraLibraries,
        Module::CrossOrigin,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Module::Container => "Docker",
            Module::DocumentDatabase => "MongoDB (Mongoose)",
            Module::Orm => "Prisma",
            Module::EntryPoint => "Server entry point",
            Module::ExtraLibraries => "Extra libraries",
            Module::CrossOrigin => "CORS",
        }
    }

    /// Whether this module runs for `config`
    pub fn applies(&self, config: &Configuration) -> bool {
        match self {
            Module::Container => config.use_container(),
            Module::DocumentDatabase => config.use_document_database(),
            Module::Orm => config.use_orm(),
            Module::EntryPoint => true,
            Module::ExtraLibraries => config.extra_libraries().is_some(),
            Module::CrossOrigin => config.cors_origins().is_some(),
        }
    }

    pub async fn apply<R: CommandRunner>(&self, step: &mut StepContext<'_, R>) -> Result<(), StepError> {
        match self {
            Module::Container => container::apply(step).await,
            Module::DocumentDatabase => document_db::apply(step).await,
            Module::Orm => orm::apply(step).await,
            Module::EntryPoint => entry_point::apply(step),
            Module::ExtraLibraries => libraries::apply(step).await,
            Module::CrossOrigin => cors::apply(step).await,
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
