//! External-process stage.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use std::thread;

use tracing::debug;

use super::stage::Stage;
use crate::error::{AkusentoError, Result};

/// Runs a program once per call, feeding the input on stdin and returning
/// everything it writes to stdout.
///
/// Every call spawns its own child process with no temporary files, so
/// concurrent calls do not interfere. A program that cannot be started or
/// that exits non-zero fails the call with its stderr text.
#[derive(Clone, Debug)]
pub struct CommandStage {
    label: &'static str,
    program: String,
    args: Vec<String>,
}

impl CommandStage {
    /// Create a stage running `program` with `args`.
    pub fn new<S: Into<String>>(program: S, args: Vec<String>) -> Self {
        CommandStage {
            label: "command",
            program: program.into(),
            args,
        }
    }

    /// Build a stage from a `[program, arg, ...]` vector.
    pub fn from_argv(argv: &[String]) -> Result<Self> {
        match argv.split_first() {
            Some((program, args)) if !program.trim().is_empty() => {
                Ok(Self::new(program.clone(), args.to_vec()))
            }
            _ => Err(AkusentoError::config("command must name a program")),
        }
    }

    /// Set the name reported in errors and logs.
    pub fn with_label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn failure<M: Into<String>>(&self, message: M) -> AkusentoError {
        AkusentoError::external_stage(self.label, message)
    }
}

impl Stage for CommandStage {
    fn run(&self, input: &str) -> Result<String> {
        debug!(stage = self.label, program = %self.program, bytes = input.len(), "spawning");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.failure(format!("failed to start {}: {e}", self.program)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| self.failure("stdin of child process is not available"))?;

        // stdin is written from a second thread so a child that fills its
        // stdout pipe before reading all input cannot deadlock us.
        let (written, output) = thread::scope(|scope| {
            let writer = scope.spawn(move || stdin.write_all(input.as_bytes()));
            let output = child.wait_with_output();
            (writer.join(), output)
        });

        let output = output?;
        match written {
            Ok(Ok(())) => {}
            Ok(Err(e)) if e.kind() == ErrorKind::BrokenPipe => {}
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => return Err(self.failure("stdin writer panicked")),
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = if stderr.trim().is_empty() {
                format!("{} exited with {}", self.program, output.status)
            } else {
                stderr.trim_end().to_string()
            };
            return Err(self.failure(message));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| self.failure(format!("{} wrote invalid UTF-8: {e}", self.program)))
    }

    fn name(&self) -> &'static str {
        self.label
    }
}
