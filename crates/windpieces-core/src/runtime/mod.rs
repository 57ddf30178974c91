//! Process execution and tool detection
//!
//! This module provides:
//! - The [`CommandRunner`] seam every external command goes through
//! - Package manager command lines
//! - Advisory detection of git, Node.js and the package manager

pub mod check;
pub mod package_manager;
pub mod runner;

pub use check::{check_tools, ToolInfo};
pub use runner::{CommandRunner, ShellCommand, ShellRunner};
