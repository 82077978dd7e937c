//! Subprocess invocation for external packaging tools.
//!
//! All tools are invoked with argument vectors, never shell strings, so
//! usernames and comments cannot smuggle shell syntax into a command line.
//! Output is captured and logged; callers only see pass/fail plus the exit
//! status.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

use crate::error::{LscError, Result};

/// Builder for an external tool invocation.
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    display: Vec<String>,
    cwd: Option<PathBuf>,
    error_msg: Option<String>,
}

impl Cmd {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            display: Vec::new(),
            cwd: None,
            error_msg: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<str>) -> Self {
        self.display.push(arg.as_ref().to_string());
        self.args.push(OsString::from(arg.as_ref()));
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            self = self.arg(arg);
        }
        self
    }

    pub fn arg_path(mut self, path: &Path) -> Self {
        self.display.push(path.display().to_string());
        self.args.push(path.as_os_str().to_os_string());
        self
    }

    /// Pass a sensitive value as an argument. The value reaches the tool
    /// unchanged but is masked in log output.
    pub fn arg_secret(mut self, arg: impl AsRef<str>) -> Self {
        self.display.push("********".to_string());
        self.args.push(OsString::from(arg.as_ref()));
        self
    }

    /// Run the tool with this working directory.
    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    /// Hint appended to the error when the tool fails.
    pub fn error_msg(mut self, msg: impl Into<String>) -> Self {
        self.error_msg = Some(msg.into());
        self
    }

    fn program_name(&self) -> String {
        Path::new(&self.program).display().to_string()
    }

    /// Run the tool to completion, capturing its output.
    ///
    /// Fails if the process cannot be spawned or does not exit with status
    /// zero; abnormal termination counts as failure. Captured output goes
    /// to the debug log, never to the caller.
    pub fn run(self) -> Result<()> {
        let program = self.program_name();
        debug!(
            command = %format!("{} {}", program, self.display.join(" ")),
            cwd = ?self.cwd,
            "spawning"
        );

        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(dir) = &self.cwd {
            command.current_dir(dir);
        }

        let output = command.output().map_err(|source| LscError::Spawn {
            program: program.clone(),
            source,
        })?;

        if !output.status.success() {
            debug!(status = %output.status, "{} failed", program);
            debug!("stdout: {}", String::from_utf8_lossy(&output.stdout));
            debug!("stderr: {}", String::from_utf8_lossy(&output.stderr));
            let mut detail = match output.status.code() {
                Some(code) => format!("exit status {code}"),
                None => "terminated abnormally".to_string(),
            };
            if let Some(msg) = self.error_msg {
                detail = format!("{detail}. {msg}");
            }
            return Err(LscError::Tool { program, detail });
        }

        Ok(())
    }
}

/// Check whether `program` resolves on the PATH.
pub fn exists(program: &str) -> bool {
    which(program).is_some()
}

/// Resolve `program` on the PATH.
pub fn which(program: &str) -> Option<PathBuf> {
    ::which::which(program).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_success() {
        Cmd::new("true").run().unwrap();
    }

    #[test]
    fn test_run_nonzero_exit() {
        let err = Cmd::new("false").error_msg("expected").run().unwrap_err();
        match err {
            LscError::Tool { detail, .. } => {
                assert!(detail.contains("exit status 1"));
                assert!(detail.contains("expected"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_run_spawn_failure() {
        let err = Cmd::new("definitely_not_a_real_command_12345")
            .run()
            .unwrap_err();
        assert!(matches!(err, LscError::Spawn { .. }));
    }

    #[test]
    fn test_secret_args_masked_in_display() {
        let cmd = Cmd::new("ssh-keygen").arg("-P").arg_secret("hunter42");
        assert_eq!(cmd.display, vec!["-P", "********"]);
        assert_eq!(cmd.args, vec!["-P", "hunter42"]);
    }

    #[test]
    fn test_exists() {
        assert!(exists("ls"));
        assert!(!exists("definitely_not_a_real_command_12345"));
    }
}
