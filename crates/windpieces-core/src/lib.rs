//! Windpieces Core - scaffolding library for windpieces backend projects
//!
//! This library turns a set of answers into a ready-to-run Express/TypeScript
//! backend: it clones the starter repository, installs dependencies, layers
//! optional modules on top and writes the files those modules contribute to.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - [`config`], [`runtime`], [`template`] and
//!   [`workspace`]: validated answers, external commands, placeholder buffers
//!   and the project directory
//! - **Layer 2: Workflow Orchestration** - [`modules`] and [`scaffold`]: the
//!   ordered module steps and the fail-fast [`Scaffolder`]
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use windpieces_core::{Answers, Configuration, LogReporter, Scaffolder, ShellRunner};
//!
//! let config = Configuration::try_from(Answers {
//!     project_name: Some("api".into()),
//!     ..Answers::default()
//! })?;
//! let mut scaffolder = Scaffolder::from_product(MyProduct, ShellRunner, ".")?;
//! scaffolder.run(&config, &mut LogReporter).await?;
//! ```

pub mod config;
pub mod modules;
pub mod product;
pub mod runtime;
pub mod scaffold;
pub mod template;
pub mod workspace;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(test)]
mod testing;

// Re-export main types for convenience
pub use config::{Answers, ConfigError, Configuration, OrmDatabase, PackageManager};
pub use modules::Module;
pub use product::ProductConfig;
pub use runtime::{CommandRunner, ShellCommand, ShellRunner};
pub use scaffold::{ExitStatus, LogReporter, Reporter, ScaffoldError, ScaffoldReport, Scaffolder};
pub use template::TemplateContext;
pub use workspace::Workspace;

#[cfg(feature = "tui")]
pub use tui::run;
