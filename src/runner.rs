//! Executing a test case as a subprocess.
//!
//! The runner spawns the tool with its standard output redirected to the
//! case's capture file, waits for it, and then evaluates every golden
//! comparison. Anything that goes wrong inside a case is logged and turned
//! into a failed outcome; it never aborts the run.

use crate::case::TestCase;
use crate::compare::{compare, Outcome};
use crate::error::{RegressError, Result};
use log::{debug, error, info};
use std::fs::File;
use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Interval between exit checks while a timeout is armed.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How long to wait for stderr after killing a tool that timed out.
const STDERR_GRACE: Duration = Duration::from_secs(1);

/// Something that can execute a [`TestCase`] and judge its outputs.
pub trait CaseRunner {
    /// Runs `case` and returns whether every comparison passed.
    fn run(&mut self, case: &TestCase) -> bool;
}

/// Runs cases as real subprocesses.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    timeout: Option<Duration>,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill tools that run longer than `timeout` and fail their case.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Spawns the tool and waits for it to exit.
    pub fn execute(&self, case: &TestCase) -> Result<()> {
        if let Some(parent) = case.captured_output.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let stdout = File::create(&case.captured_output)?;

        let mut cmd = Command::new(&case.program);
        cmd.args(&case.args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::piped());

        debug!("Executing: {cmd:?}");

        let child = cmd.spawn().map_err(|e| {
            RegressError::ExecutionFailed(format!(
                "Failed to run {}: {e}",
                case.program.display()
            ))
        })?;

        let (status, stderr) = match self.timeout {
            Some(timeout) => wait_with_timeout(child, timeout, case)?,
            None => {
                let output = child.wait_with_output()?;
                (output.status, output.stderr)
            }
        };

        if !stderr.is_empty() {
            debug!(
                "{} stderr:\n{}",
                case.program.display(),
                String::from_utf8_lossy(&stderr)
            );
        }

        if !status.success() {
            return Err(RegressError::ExecutionFailed(format!(
                "{} exited with {status}",
                case.program.display()
            )));
        }
        Ok(())
    }
}

impl CaseRunner for ProcessRunner {
    fn run(&mut self, case: &TestCase) -> bool {
        if let Err(e) = self.execute(case) {
            error!("{e}");
            return false;
        }

        // Evaluate every comparison so each mismatch gets logged.
        let mut passed = true;
        for comparison in &case.comparisons {
            match compare(comparison) {
                Ok(Outcome::Match) => {}
                Ok(Outcome::Mismatch(details)) => {
                    info!("{details}");
                    passed = false;
                }
                Err(e) => {
                    error!("{e}");
                    passed = false;
                }
            }
        }
        passed
    }
}

fn wait_with_timeout(
    mut child: Child,
    timeout: Duration,
    case: &TestCase,
) -> Result<(ExitStatus, Vec<u8>)> {
    // Drain stderr on a separate thread so a chatty tool cannot block on a full pipe.
    let (tx, rx) = mpsc::channel();
    let pipe = child.stderr.take();
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        let _ = tx.send(buf);
    });

    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok((status, rx.recv().unwrap_or_default()));
        }
        if start.elapsed() >= timeout {
            let _ = child.kill();
            let _ = child.wait();
            // A grandchild may still hold the pipe open; don't wait on it for long.
            if let Ok(stderr) = rx.recv_timeout(STDERR_GRACE) {
                if !stderr.is_empty() {
                    debug!(
                        "{} stderr:\n{}",
                        case.program.display(),
                        String::from_utf8_lossy(&stderr)
                    );
                }
            }
            return Err(RegressError::Timeout {
                program: case.program.display().to_string(),
                timeout,
            });
        }
        thread::sleep(POLL_INTERVAL);
    }
}
