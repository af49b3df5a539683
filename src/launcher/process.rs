//! Spawning the framework and relaying its stdio

use std::io::{self, Read, Write};
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use super::command::LaunchCommand;
use super::pipe::Pipe;
use crate::error::{Result, platform};

/// Runs a command with its stdio relayed through [`Pipe`] threads
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }

    /// Run `command` attached to this process's stdio
    pub fn run(&self, command: &LaunchCommand) -> Result<i32> {
        info!(command = %command, "launching framework");
        self.run_with(
            command.to_command(),
            Some(Box::new(io::stdin())),
            io::stdout(),
            io::stderr(),
        )
    }

    /// Run `command`, feeding `stdin` and collecting output into the writers
    ///
    /// Returns the exit code; a child killed by a signal reports 1. The stdin
    /// relay is left running detached since a blocking read cannot be
    /// interrupted.
    pub fn run_with<O, E>(
        &self,
        mut command: Command,
        stdin: Option<Box<dyn Read + Send>>,
        stdout: O,
        stderr: E,
    ) -> Result<i32>
    where
        O: Write + Send + 'static,
        E: Write + Send + 'static,
    {
        let program = command.get_program().to_string_lossy().into_owned();
        let mut child = command
            .stdin(if stdin.is_some() { Stdio::piped() } else { Stdio::null() })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| platform::process_failed(&program, e.to_string()))?;
        debug!(pid = child.id(), %program, "spawned");

        let stop = Arc::new(AtomicBool::new(false));
        let spawn_failed = |e: io::Error| platform::process_failed(&program, e.to_string());

        if let (Some(input), Some(child_stdin)) = (stdin, child.stdin.take()) {
            // Detached; ends on the first read after the child exits
            Pipe::new("stdin")
                .with_stop(Arc::clone(&stop))
                .start(input, child_stdin)
                .map_err(spawn_failed)?;
        }

        let mut relays = Vec::new();
        if let Some(out) = child.stdout.take() {
            relays.push(
                Pipe::new("stdout")
                    .start(out, stdout)
                    .map_err(spawn_failed)?,
            );
        }
        if let Some(err) = child.stderr.take() {
            relays.push(
                Pipe::new("stderr")
                    .start(err, stderr)
                    .map_err(spawn_failed)?,
            );
        }

        let status = child
            .wait()
            .map_err(|e| platform::process_failed(&program, e.to_string()))?;
        stop.store(true, Ordering::SeqCst);

        // Output relays drain to EOF once the child is gone
        for relay in relays {
            if relay.join().is_err() {
                warn!(%program, "output relay panicked");
            }
        }

        let code = status.code().unwrap_or(1);
        info!(%program, code, "framework exited");
        Ok(code)
    }
}
