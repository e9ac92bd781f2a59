//! Parallel execution of engine processes
//!
//! A batch is a set of [`ProcessHandle`]s created together and run through
//! [`ParallelExecutor::run_all`], which bounds concurrency to the logical
//! CPU count. Each worker owns one child process at a time: it spawns the
//! process, waits for exit, marks the handle completed, then claims the next
//! queued handle. Completion order across handles is not guaranteed.

use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::engine::ENGINE_BIN;
use crate::error::{BatchCutError, BatchCutResult};

/// Poll interval while waiting for a child process to exit
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// One engine invocation: the command string, the child process, and the
/// completion flag.
///
/// The child is owned exclusively by this handle; the worker that starts the
/// process is the only writer of `completed`, which the progress tracker
/// reads concurrently. The flag is atomic so the cross-thread read is
/// well-defined.
pub struct ProcessHandle {
    program: String,
    command: String,
    child: Mutex<Option<Child>>,
    completed: AtomicBool,
    killed: AtomicBool,
}

impl ProcessHandle {
    /// Create a handle for the default engine executable
    pub fn new(command: impl Into<String>) -> Self {
        Self::with_program(ENGINE_BIN, command)
    }

    /// Create a handle for an explicit executable (used by tests)
    pub fn with_program(program: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            command: command.into(),
            child: Mutex::new(None),
            completed: AtomicBool::new(false),
            killed: AtomicBool::new(false),
        }
    }

    /// The argument string this handle was built from
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Whether the process has been observed to exit
    pub fn is_completed(&self) -> bool {
        self.completed.load(Ordering::SeqCst)
    }

    /// Whether this handle has been marked for termination
    pub fn is_killed(&self) -> bool {
        self.killed.load(Ordering::SeqCst)
    }

    /// Spawn the underlying process
    fn start(&self) -> BatchCutResult<()> {
        let args = split_command_args(&self.command);
        let child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| BatchCutError::SpawnError {
                message: format!("{}: {}", self.program, e),
            })?;

        if let Ok(mut guard) = self.child.lock() {
            *guard = Some(child);
        }
        Ok(())
    }

    /// Block until the spawned process exits, then set the completion flag.
    ///
    /// Polls rather than holding a blocking `wait`, so a concurrent
    /// [`ParallelExecutor::kill_all`] can reach the child through the same
    /// handle.
    fn wait_for_exit(&self) {
        loop {
            let Ok(mut guard) = self.child.lock() else {
                return;
            };
            let Some(child) = guard.as_mut() else {
                return;
            };
            match child.try_wait() {
                Ok(Some(status)) => {
                    if !status.success() {
                        debug!(command = %self.command, %status, "engine process exited abnormally");
                    }
                    *guard = None;
                    // Exit observed, success or not: the handle completed.
                    self.completed.store(true, Ordering::SeqCst);
                    return;
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(command = %self.command, error = %e, "failed waiting on engine process");
                    *guard = None;
                    return;
                }
            }
            drop(guard);
            thread::sleep(WAIT_POLL_INTERVAL);
        }
    }

    /// Forcefully terminate the process if it is still running, and mark
    /// the handle so a not-yet-started process is never spawned.
    ///
    /// Errors from already-exited processes are swallowed; kill is
    /// best-effort and does not wait for the child to actually die.
    fn kill(&self) {
        // The mark must land whether or not a child exists yet: workers
        // check it before and after spawning, so a queued handle stays
        // unstarted and a handle spawned concurrently is killed right away.
        self.killed.store(true, Ordering::SeqCst);
        if let Ok(mut guard) = self.child.lock() {
            if let Some(child) = guard.as_mut() {
                if let Err(e) = child.kill() {
                    debug!(command = %self.command, error = %e, "kill on exited process ignored");
                }
            }
        }
    }
}

/// Bounded-parallelism batch runner
pub struct ParallelExecutor;

impl ParallelExecutor {
    /// Start every handle's process and wait for all of them, with at most
    /// `num_cpus::get()` processes running concurrently.
    ///
    /// A handle whose process fails to spawn is logged and skipped; its
    /// completion flag stays false and the rest of the batch still runs.
    /// Blocks until every handle either completed or failed to start.
    pub fn run_all(handles: &[Arc<ProcessHandle>]) {
        Self::run_all_with_limit(handles, num_cpus::get());
    }

    /// Like [`run_all`](Self::run_all) with an explicit concurrency limit
    pub fn run_all_with_limit(handles: &[Arc<ProcessHandle>], limit: usize) {
        if handles.is_empty() {
            return;
        }

        let workers = limit.max(1).min(handles.len());
        let next_index = AtomicUsize::new(0);

        thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| loop {
                    let index = next_index.fetch_add(1, Ordering::SeqCst);
                    let Some(handle) = handles.get(index) else {
                        break;
                    };
                    if handle.is_killed() {
                        debug!(command = %handle.command(), "skipping killed handle");
                        continue;
                    }
                    match handle.start() {
                        Ok(()) => {
                            // A kill issued between the check above and the
                            // spawn would miss the child; re-check and
                            // terminate it ourselves.
                            if handle.is_killed() {
                                handle.kill();
                            }
                            handle.wait_for_exit();
                        }
                        Err(e) => {
                            warn!(command = %handle.command(), error = %e, "engine process failed to start");
                        }
                    }
                });
            }
        });
    }

    /// Forcefully terminate every handle's process and prevent queued
    /// handles from being started.
    ///
    /// Idempotent against processes that already exited; never raises.
    /// Partially written output of killed processes is not removed.
    pub fn kill_all(handles: &[Arc<ProcessHandle>]) {
        for handle in handles {
            handle.kill();
        }
    }
}

/// Split a command string into arguments, honoring double-quoted sections
/// so quoted paths stay one argument.
fn split_command_args(command: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in command.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        args.push(current);
    }
    args
}
