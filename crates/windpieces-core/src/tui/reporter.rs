//! Pipeline progress rendered with cliclack

use crate::scaffold::{Reporter, ScaffoldReport};
use std::io;

/// Progress output is best effort; a broken terminal must not fail the run
fn log_write_error(result: io::Result<()>) {
    if let Err(e) = result {
        log::debug!("Failed to write progress to the terminal: {}", e);
    }
}

/// Prints pipeline progress as cliclack log lines.
///
/// Commands run with inherited output, so no spinner is kept alive while a
/// step is in progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClackReporter;

impl Reporter for ClackReporter {
    fn step(&mut self, message: &str) {
        log_write_error(cliclack::log::step(message));
    }

    fn warn(&mut self, message: &str) {
        log_write_error(cliclack::log::warning(message));
    }

    fn finish(&mut self, report: &ScaffoldReport) {
        log_write_error(cliclack::log::success(format!(
            "Your project is ready in {}",
            report.project_dir.display()
        )));

        if !report.applied.is_empty() {
            let names: Vec<&str> = report.applied.iter().map(|m| m.display_name()).collect();
            log_write_error(cliclack::log::info(format!("Modules: {}", names.join(", "))));
        }

        println!();
        println!("  Next steps");
        println!();

        for (i, step) in report.next_steps.iter().enumerate() {
            println!("  {}.  {}", i + 1, step);
        }

        println!();
        println!("  Support me on GitHub: {}", report.support_url);
        println!();

        log_write_error(cliclack::outro("Happy coding!"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_errors_are_swallowed() {
        log_write_error(Ok(()));
        log_write_error(Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed")));
    }
}
