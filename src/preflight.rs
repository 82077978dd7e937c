//! Preflight checks for the external packaging tools.
//!
//! Every artifact this crate produces depends on an external program or
//! script. Checking them up front gives a much better failure than a spawn
//! error halfway through a provisioning run.

use crate::config::Config;
use crate::process;

/// Result of a single preflight check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check
    pub name: String,
    /// Whether the check passed
    pub passed: bool,
    /// Human-readable message
    pub message: String,
    /// Optional suggestion for fixing the issue
    pub suggestion: Option<String>,
}

impl CheckResult {
    /// Create a passing check result.
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Create a failing check result with a fix suggestion.
    pub fn fail(
        name: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            passed: false,
            message: message.into(),
            suggestion: Some(suggestion.into()),
        }
    }
}

/// Check that all external tools and creator scripts are available.
pub fn check_tools(config: &Config) -> Vec<CheckResult> {
    vec![
        check_program(&config.ssh_keygen, "Generate SSH key pairs", "install openssh"),
        check_program(
            &config.makensis,
            "Compile Windows installers",
            "install nsis",
        ),
        check_script(config, crate::config::RPM_CREATOR, "Build RPM packages"),
        check_script(config, crate::config::DEB_CREATOR, "Build DEB packages"),
    ]
}

/// Check a single external program on the PATH.
fn check_program(program: &str, purpose: &str, install_cmd: &str) -> CheckResult {
    match process::which(program) {
        Some(path) => CheckResult::pass(
            format!("{} tool", program),
            format!("Found at {} ({})", path.display(), purpose),
        ),
        None => CheckResult::fail(
            format!("{} tool", program),
            format!("Not found (needed for: {})", purpose),
            install_cmd,
        ),
    }
}

/// Check a creator script inside the data directory.
fn check_script(config: &Config, name: &str, purpose: &str) -> CheckResult {
    let path = config.data_dir.join(name);
    if path.is_file() {
        CheckResult::pass(name, format!("Found at {} ({})", path.display(), purpose))
    } else {
        CheckResult::fail(
            name,
            format!("Not found at {} (needed for: {})", path.display(), purpose),
            format!(
                "install the creator scripts, or point {} at them",
                crate::config::DATA_DIR_ENV
            ),
        )
    }
}
