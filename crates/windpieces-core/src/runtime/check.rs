//! Tool detection for git, Node.js and package managers

use crate::config::PackageManager;
use semver::Version;
use std::process::Command;

/// Lowest Node.js major version the starter template supports
pub const MIN_NODE_MAJOR: u64 = 18;

/// Tool detection result
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

/// Run `<binary> --version` and capture the trimmed output
fn probe(name: &'static str, binary: &str) -> ToolInfo {
    let mut cmd = if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(binary);
        cmd
    } else {
        Command::new(binary)
    };

    match cmd.arg("--version").output() {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            ToolInfo {
                name,
                version: Some(version),
                available: true,
            }
        }
        _ => ToolInfo {
            name,
            version: None,
            available: false,
        },
    }
}

pub fn check_git() -> ToolInfo {
    probe("git", "git")
}

pub fn check_node() -> ToolInfo {
    probe("Node.js", "node")
}

pub fn check_package_manager(package_manager: PackageManager) -> ToolInfo {
    probe(package_manager.binary(), package_manager.binary())
}

/// Parse `node --version` output such as `v20.11.1`
pub fn parse_node_version(output: &str) -> Option<Version> {
    let cleaned = output.trim();
    let cleaned = cleaned.strip_prefix('v').unwrap_or(cleaned);
    Version::parse(cleaned).ok()
}

/// Check every tool the pipeline shells out to.
///
/// Returns the detected tools and a list of human-readable warnings. Nothing
/// here is fatal: a missing tool surfaces later as a failed command.
pub fn check_tools(package_manager: PackageManager) -> (Vec<ToolInfo>, Vec<String>) {
    let tools = vec![
        check_git(),
        check_node(),
        check_package_manager(package_manager),
    ];
    let warnings = tool_warnings(&tools);
    (tools, warnings)
}

fn tool_warnings(tools: &[ToolInfo]) -> Vec<String> {
    let mut warnings = Vec::new();

    for tool in tools {
        if !tool.available {
            warnings.push(format!("{} was not found on PATH", tool.name));
            continue;
        }

        if tool.name == "Node.js" {
            match tool.version.as_deref().and_then(parse_node_version) {
                Some(version) if version.major < MIN_NODE_MAJOR => warnings.push(format!(
                    "Node.js {} detected, version {} or newer is recommended",
                    version, MIN_NODE_MAJOR
                )),
                Some(_) => {}
                None => warnings.push("Could not determine the Node.js version".to_string()),
            }
        }
    }

    warnings
}
