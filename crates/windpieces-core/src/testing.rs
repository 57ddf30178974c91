//! Test doubles shared by the unit tests

use crate::config::{Answers, Configuration};
use crate::runtime::{CommandRunner, ShellCommand};
use crate::scaffold::Reporter;
use crate::workspace::Workspace;
use std::path::Path;

/// Records every command and pretends to succeed, except for scripted failures.
///
/// `git clone` is simulated by creating the target directory with a `src/`
/// folder and a `.git` directory, like a real shallow clone of the starter.
/// Like git, the clone fails when the target directory already exists.
#[derive(Debug, Default)]
pub(crate) struct FakeRunner {
    pub executed: Vec<ShellCommand>,
    failing: Vec<String>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any command whose command line equals `line`
    pub fn failing_on(mut self, line: &str) -> Self {
        self.failing.push(line.to_string());
        self
    }

    pub fn lines(&self) -> Vec<String> {
        self.executed.iter().map(ShellCommand::command_line).collect()
    }

    fn simulate_clone(command: &ShellCommand) -> bool {
        let args = command.get_args();
        if command.program() != "git" || args.first().map(String::as_str) != Some("clone") {
            return true;
        }
        if let (Some(dir), Some(name)) = (command.get_current_dir(), args.last()) {
            let root = dir.join(name);
            if root.exists() {
                return false;
            }
            std::fs::create_dir_all(root.join("src")).unwrap();
            std::fs::create_dir_all(root.join(".git/refs")).unwrap();
            std::fs::write(root.join(".git/HEAD"), "ref: refs/heads/main\n").unwrap();
            std::fs::write(root.join("package.json"), "{}\n").unwrap();
        }
        true
    }
}

impl CommandRunner for FakeRunner {
    async fn execute(&mut self, command: &ShellCommand) -> bool {
        self.executed.push(command.clone());
        if self.failing.contains(&command.command_line()) {
            return false;
        }
        Self::simulate_clone(command)
    }
}

/// Collects everything the pipeline reports
#[derive(Debug, Default)]
pub(crate) struct RecordingReporter {
    pub steps: Vec<String>,
    pub warnings: Vec<String>,
    pub finished: bool,
}

impl Reporter for RecordingReporter {
    fn step(&mut self, message: &str) {
        self.steps.push(message.to_string());
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn finish(&mut self, _report: &crate::scaffold::ScaffoldReport) {
        self.finished = true;
    }
}

/// Build a configuration for project `api`, customised by `edit`
pub(crate) fn config_with(edit: impl FnOnce(&mut Answers)) -> Configuration {
    let mut answers = Answers {
        project_name: Some("api".to_string()),
        ..Answers::default()
    };
    edit(&mut answers);
    Configuration::try_from(answers).unwrap()
}

/// A workspace that looks freshly checked out (it has `src/`)
pub(crate) fn checked_out_workspace(base: &Path) -> Workspace {
    let workspace = Workspace::new(base, "api");
    std::fs::create_dir_all(workspace.path("src")).unwrap();
    workspace
}
