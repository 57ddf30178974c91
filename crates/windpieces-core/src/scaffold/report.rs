//! Summary of a finished run

use crate::modules::Module;
use colored::Colorize;
use std::fmt;
use std::path::PathBuf;

/// A non-fatal step that did not complete
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Degradation {
    /// `.git` could not be removed from the clone
    GitMetadata(String),
    /// The formatter script failed
    Formatter,
    /// Neither the editor nor the system handler could open the project
    Editor(String),
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degradation::GitMetadata(reason) => write!(
                f,
                "Could not remove the .git folder ({}). This step is optional",
                reason
            ),
            Degradation::Formatter => write!(f, "Formatting the generated files failed"),
            Degradation::Editor(reason) => write!(f, "Could not open the editor ({})", reason),
        }
    }
}

/// Everything the user needs to know once the pipeline has finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub project_dir: PathBuf,
    pub applied: Vec<Module>,
    pub skipped: Vec<Module>,
    /// Files written by the generator, relative to `project_dir`
    pub files: Vec<PathBuf>,
    pub degraded: Vec<Degradation>,
    pub next_steps: Vec<String>,
    pub support_url: String,
}

impl ScaffoldReport {
    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }

    /// Plain-text rendering for terminals without the interactive UI
    pub fn render(&self) -> String {
        let rule = "-".repeat(50);
        let mut out = String::new();

        out.push_str(&format!("{}\n\n", rule));
        out.push_str(&format!("{}\n", "Your project is ready!".green().bold()));
        out.push_str(&format!("  {}\n", self.project_dir.display()));

        if !self.applied.is_empty() {
            let names: Vec<&str> = self.applied.iter().map(Module::display_name).collect();
            out.push_str(&format!("{} {}\n", "Modules:".dimmed(), names.join(", ")));
        }

        for degradation in &self.degraded {
            out.push_str(&format!("{} {}\n", "Warning:".yellow(), degradation));
        }

        out.push_str("\n  Next steps\n\n");
        for (i, step) in self.next_steps.iter().enumerate() {
            out.push_str(&format!("  {}.  {}\n", i + 1, step));
        }

        out.push_str(&format!(
            "\nSupport me on GitHub: {}\n\n",
            self.support_url.green()
        ));
        out.push_str("Happy coding!\n\n");
        out.push_str(&rule);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lists_steps_and_warnings() {
        colored::control::set_override(false);
        let report = ScaffoldReport {
            project_dir: PathBuf::from("/tmp/api"),
            applied: vec![Module::Container, Module::EntryPoint],
            skipped: vec![Module::Orm],
            files: vec![PathBuf::from(".env")],
            degraded: vec![Degradation::Formatter],
            next_steps: vec!["cd api && npm run dev".to_string()],
            support_url: "https://example.com".to_string(),
        };

        let text = report.render();

        assert!(report.is_degraded());
        assert!(text.contains("Modules: Docker, Server entry point"));
        assert!(text.contains("Warning: Formatting the generated files failed"));
        assert!(text.contains("1.  cd api && npm run dev"));
        assert!(text.contains("https://example.com"));
    }
}
