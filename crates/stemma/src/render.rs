//! External layout-process invocation for graph rendering.
//!
//! [`GraphvizRenderer`] pipes a DOT description through an external layout
//! process (Graphviz `dot` by default) and returns the rendered bytes. The
//! protocol per call: spawn the process with all three standard streams
//! piped, write the whole description from a dedicated thread and close
//! stdin, drain stdout and stderr concurrently, then reap the child. All
//! three pipes are drained and the child is reaped on every path, including
//! errors and timeouts.
//!
//! Failure policy: any output on stderr fails the call regardless of exit
//! status, carrying the diagnostic text. Graphviz reports real problems on
//! stderr while still exiting zero in some versions, so exit status alone is
//! not trusted. [`RendererConfig::tolerate_warnings`](crate::config::RendererConfig)
//! relaxes this for warning-only output when the exit status is zero.

use std::{
    io::{self, Read, Write},
    process::{Child, Command, ExitStatus, Stdio},
    thread,
    time::{Duration, Instant},
};

use log::{debug, info, warn};
use thiserror::Error;

use crate::config::RendererConfig;

/// Poll interval of the deadline loop while waiting for process exit.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Errors reported by the layout-process invocation.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The layout process could not be started at all.
    #[error("Failed to launch layout process `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The layout process wrote diagnostics to its error stream.
    #[error("Layout process reported: {diagnostics}")]
    LayoutEngine { diagnostics: String },

    /// The layout process failed without diagnostics.
    #[error("Layout process exited with {status} and no diagnostics")]
    ExitStatus { status: ExitStatus },

    /// The layout process exceeded the configured time budget and was
    /// killed.
    #[error("Layout process timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    /// Pipe I/O towards the layout process failed.
    #[error("I/O error while driving layout process: {0}")]
    Io(#[from] io::Error),
}

/// Renders DOT descriptions through an external layout process.
#[derive(Debug, Clone, Default)]
pub struct GraphvizRenderer {
    config: RendererConfig,
}

impl GraphvizRenderer {
    /// Creates a renderer with the given configuration.
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    /// Renders a graph description to image bytes.
    ///
    /// # Arguments
    ///
    /// * `description` - The DOT text to lay out
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when the process cannot be spawned, writes
    /// diagnostics to stderr, exits non-zero, exceeds the configured
    /// timeout, or pipe I/O fails.
    pub fn render(&self, description: &str) -> Result<Vec<u8>, RenderError> {
        let program = self.config.program();
        let format_flag = format!("-T{}", self.config.format());

        info!(program = program, format:% = self.config.format(); "Invoking layout process");

        let mut child = Command::new(program)
            .arg(&format_flag)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RenderError::Spawn {
                program: program.to_string(),
                source,
            })?;

        let mut stdin = child.stdin.take().expect("Child stdin should be piped");
        let mut stdout = child.stdout.take().expect("Child stdout should be piped");
        let mut stderr = child.stderr.take().expect("Child stderr should be piped");

        // Write from a dedicated thread so a process that fills its output
        // pipe before consuming all input cannot deadlock against us.
        // Dropping the handle closes the pipe and signals EOF.
        let payload = description.as_bytes().to_vec();
        let writer = thread::spawn(move || -> io::Result<()> { stdin.write_all(&payload) });

        let stdout_reader = thread::spawn(move || -> io::Result<Vec<u8>> {
            let mut rendered = Vec::new();
            stdout.read_to_end(&mut rendered)?;
            Ok(rendered)
        });
        let stderr_reader = thread::spawn(move || -> io::Result<Vec<u8>> {
            let mut diagnostics = Vec::new();
            stderr.read_to_end(&mut diagnostics)?;
            Ok(diagnostics)
        });

        // Reap first, then join the drains; on the timeout path the child
        // has been killed, so the readers see EOF and finish.
        let waited = match self.config.timeout() {
            Some(timeout) => wait_with_deadline(&mut child, timeout),
            None => child.wait().map_err(RenderError::Io),
        };

        let rendered = stdout_reader
            .join()
            .expect("Stdout reader thread should not panic")?;
        let diagnostics = stderr_reader
            .join()
            .expect("Stderr reader thread should not panic")?;
        if let Err(err) = writer.join().expect("Writer thread should not panic") {
            // A process that exits without reading all input breaks the
            // pipe; the real failure surfaces through stderr or the exit
            // status below.
            debug!(err:? = err; "Layout process closed stdin early");
        }

        let status = waited?;
        let diagnostics = String::from_utf8_lossy(&diagnostics).trim().to_string();

        if !diagnostics.is_empty() {
            if self.config.tolerate_warnings() && status.success() {
                warn!(diagnostics = diagnostics; "Layout process warnings tolerated");
            } else {
                return Err(RenderError::LayoutEngine { diagnostics });
            }
        }
        if !status.success() {
            return Err(RenderError::ExitStatus { status });
        }

        debug!(rendered_bytes = rendered.len(); "Layout process finished");
        Ok(rendered)
    }
}

/// Waits for the child within the time budget, killing and reaping it on
/// expiry.
fn wait_with_deadline(child: &mut Child, timeout: Duration) -> Result<ExitStatus, RenderError> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            // The kill can race a natural exit; reap either way.
            if let Err(err) = child.kill() {
                debug!(err:? = err; "Kill after timeout failed");
            }
            child.wait()?;
            return Err(RenderError::Timeout { timeout });
        }
        thread::sleep(POLL_INTERVAL);
    }
}
