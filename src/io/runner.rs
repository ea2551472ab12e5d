//! Launching resolved script commands.
//!
//! Launches are fire-and-forget: the child is handed to a reaper thread that
//! only logs its exit status. Nothing about completion flows back to the UI.

use std::cell::RefCell;
use std::io;
use std::process::{Command, Stdio};
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::model::RunnerConfig;

/// Error type for launching commands
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("nothing to run: command is empty")]
    EmptyCommand,
    #[error("could not start `{command}`: {source}")]
    Spawn { command: String, source: io::Error },
}

/// Starts a command without waiting for it
pub trait Launcher {
    fn launch(&mut self, command: &str) -> Result<(), RunError>;
}

/// Runs commands through a shell, optionally inside a new terminal window
#[derive(Debug, Clone)]
pub struct ShellLauncher {
    shell: String,
    terminal: Vec<String>,
}

impl ShellLauncher {
    pub fn from_config(config: &RunnerConfig) -> Self {
        ShellLauncher {
            shell: config.shell.clone(),
            terminal: config.terminal.clone(),
        }
    }

    /// Program and arguments used to run `command`
    pub fn invocation(&self, command: &str) -> (String, Vec<String>) {
        if cfg!(windows) {
            // A new PowerShell window that stays open until Enter
            let wrapped = format!(
                "{command}; Write-Host -ForegroundColor Green \"`n[Process completed]\"; Read-Host \"Press Enter to exit...\""
            );
            return (
                "cmd".to_string(),
                vec![
                    "/c".into(),
                    "start".into(),
                    "Zenith Script".into(),
                    "powershell".into(),
                    "-NoProfile".into(),
                    "-Command".into(),
                    wrapped,
                ],
            );
        }
        let mut argv: Vec<String> = self.terminal.clone();
        argv.push(self.shell.clone());
        argv.push("-c".into());
        argv.push(command.to_string());
        let program = argv.remove(0);
        (program, argv)
    }
}

impl Launcher for ShellLauncher {
    fn launch(&mut self, command: &str) -> Result<(), RunError> {
        if command.trim().is_empty() {
            return Err(RunError::EmptyCommand);
        }
        let (program, args) = self.invocation(command);
        let mut child = Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| RunError::Spawn {
                command: command.to_string(),
                source,
            })?;

        let pid = child.id();
        info!(pid, program = %program, command, "launched script");

        let reaper = std::thread::Builder::new()
            .name(format!("reap-{pid}"))
            .spawn(move || match child.wait() {
                Ok(status) => debug!(pid, %status, "script exited"),
                Err(e) => warn!(pid, error = %e, "could not wait for script"),
            });
        if let Err(e) = reaper {
            warn!(pid, error = %e, "could not start reaper thread");
        }
        Ok(())
    }
}

/// Launcher that only records what it was asked to run
#[derive(Debug, Clone, Default)]
pub struct RecordingLauncher {
    launched: Rc<RefCell<Vec<String>>>,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        RecordingLauncher::default()
    }

    /// Every command launched so far, oldest first
    pub fn launched(&self) -> Vec<String> {
        self.launched.borrow().clone()
    }
}

impl Launcher for RecordingLauncher {
    fn launch(&mut self, command: &str) -> Result<(), RunError> {
        if command.trim().is_empty() {
            return Err(RunError::EmptyCommand);
        }
        self.launched.borrow_mut().push(command.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(windows))]
    #[test]
    fn invocation_uses_shell_dash_c() {
        let launcher = ShellLauncher::from_config(&RunnerConfig::default());
        let (program, args) = launcher.invocation("echo hi");
        assert_eq!(program, "sh");
        assert_eq!(args, vec!["-c", "echo hi"]);
    }

    #[cfg(not(windows))]
    #[test]
    fn invocation_with_terminal_prefix() {
        let launcher = ShellLauncher::from_config(&RunnerConfig {
            shell: "bash".into(),
            terminal: vec!["xterm".into(), "-hold".into(), "-e".into()],
        });
        let (program, args) = launcher.invocation("make all");
        assert_eq!(program, "xterm");
        assert_eq!(args, vec!["-hold", "-e", "bash", "-c", "make all"]);
    }

    #[test]
    fn empty_command_is_rejected() {
        let mut launcher = ShellLauncher::from_config(&RunnerConfig::default());
        assert!(matches!(launcher.launch("  "), Err(RunError::EmptyCommand)));
    }

    #[cfg(unix)]
    #[test]
    fn spawn_failure_is_reported() {
        let mut launcher = ShellLauncher::from_config(&RunnerConfig {
            shell: "/definitely/not/a/shell".into(),
            terminal: Vec::new(),
        });
        assert!(matches!(
            launcher.launch("true"),
            Err(RunError::Spawn { .. })
        ));
    }

    #[test]
    fn recording_launcher_shares_history_between_clones() {
        let handle = RecordingLauncher::new();
        let mut launcher = handle.clone();
        launcher.launch("echo one").unwrap();
        assert_eq!(handle.launched(), vec!["echo one"]);
    }
}
