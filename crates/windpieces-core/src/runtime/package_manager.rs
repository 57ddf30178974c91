//! Package manager command lines

use super::runner::ShellCommand;
use crate::config::PackageManager;
use std::path::Path;

impl PackageManager {
    /// Install everything listed in `package.json`
    pub fn install_all(&self, dir: &Path) -> ShellCommand {
        let cmd = ShellCommand::new(self.binary()).current_dir(dir);
        match self {
            PackageManager::Yarn => cmd,
            PackageManager::Npm | PackageManager::Pnpm => cmd.arg("install"),
        }
    }

    /// Add runtime dependencies
    pub fn add<I, S>(&self, dir: &Path, packages: I) -> ShellCommand
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let verb = match self {
            PackageManager::Npm => "install",
            PackageManager::Yarn | PackageManager::Pnpm => "add",
        };
        ShellCommand::new(self.binary())
            .current_dir(dir)
            .arg(verb)
            .args(packages)
    }

    /// Add development dependencies
    pub fn add_dev<I, S>(&self, dir: &Path, packages: I) -> ShellCommand
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cmd = ShellCommand::new(self.binary()).current_dir(dir);
        let cmd = match self {
            PackageManager::Npm => cmd.args(["install", "--save-dev"]),
            PackageManager::Yarn | PackageManager::Pnpm => cmd.args(["add", "-D"]),
        };
        cmd.args(packages)
    }

    /// Run a `package.json` script
    pub fn run_script(&self, dir: &Path, script: &str) -> ShellCommand {
        let cmd = ShellCommand::new(self.binary()).current_dir(dir);
        match self {
            PackageManager::Npm => cmd.args(["run", script]),
            PackageManager::Yarn | PackageManager::Pnpm => cmd.arg(script),
        }
    }

    /// Run a binary installed in the project's `node_modules`
    pub fn exec<I, S>(&self, dir: &Path, binary: &str, args: I) -> ShellCommand
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cmd = match self {
            PackageManager::Npm => ShellCommand::new("npx").arg(binary),
            PackageManager::Yarn => ShellCommand::new("yarn").arg(binary),
            PackageManager::Pnpm => ShellCommand::new("pnpm").args(["exec", binary]),
        };
        cmd.current_dir(dir).args(args)
    }

    /// Command a user types to start the dev server
    pub fn dev_command(&self) -> String {
        match self {
            PackageManager::Npm => "npm run dev".to_string(),
            PackageManager::Yarn | PackageManager::Pnpm => format!("{} dev", self.binary()),
        }
    }
}
