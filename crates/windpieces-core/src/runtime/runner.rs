//! External command execution
//!
//! The pipeline only ever sees a success flag. Whatever the command prints goes
//! straight to the inherited terminal streams so interactive prompts from
//! `git`, `npm` or `prisma` stay visible.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command as TokioCommand;

/// A program invocation with an optional working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
}

impl ShellCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn get_current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// Program and arguments joined by spaces, without the working directory
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn to_tokio(&self) -> TokioCommand {
        // npm, yarn and pnpm are batch shims on Windows
        let mut cmd = if cfg!(windows) {
            let mut cmd = TokioCommand::new("cmd");
            cmd.arg("/C").arg(&self.program);
            cmd
        } else {
            TokioCommand::new(&self.program)
        };
        cmd.args(&self.args);
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.current_dir {
            Some(dir) => write!(f, "cd {} && {}", dir.display(), self.command_line()),
            None => write!(f, "{}", self.command_line()),
        }
    }
}

/// Runs external commands to completion.
///
/// Implementations report failure (non-zero exit, spawn error) as `false` and
/// never return an error.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn execute(&mut self, command: &ShellCommand) -> bool;
}

/// Runs commands as child processes with inherited standard streams
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    async fn execute(&mut self, command: &ShellCommand) -> bool {
        log::debug!("Running: {}", command);

        let status = command
            .to_tokio()
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await;

        match status {
            Ok(status) if status.success() => true,
            Ok(status) => {
                log::warn!("`{}` failed with {}", command, status);
                false
            }
            Err(e) => {
                log::warn!("Failed to start `{}`: {}", command, e);
                false
            }
        }
    }
}
