// sispmctl runner implementation
// reason: tokio::process for non-blocking spawn and stream capture
use async_trait::async_trait;
use std::io;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, info};

use gembird_core::port::{TimeProvider, ToolError, ToolOutput, ToolRunner};

/// Default executable name, resolved through `PATH`
pub const DEFAULT_PROGRAM: &str = "sispmctl";

const READ_CHUNK_SIZE: usize = 4096;

/// Runs the power strip control utility as a child process
///
/// Standard output and standard error are read concurrently, chunk by chunk,
/// until both close; the exit status is collected afterwards.
pub struct SispmctlRunner {
    program: PathBuf,
    display_name: String,
    time_provider: Arc<dyn TimeProvider>,
    debug: bool,
}

impl SispmctlRunner {
    /// Create a runner for `program`
    ///
    /// # Example
    /// ```ignore
    /// let runner = SispmctlRunner::new("sispmctl", Arc::new(SystemTimeProvider));
    /// ```
    pub fn new(program: impl Into<PathBuf>, time_provider: Arc<dyn TimeProvider>) -> Self {
        let program = program.into();
        let display_name = program
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| program.to_string_lossy().into_owned());
        Self {
            program,
            display_name,
            time_provider,
            debug: false,
        }
    }

    /// Log every captured output chunk
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    fn classify_spawn_error(&self, err: io::Error) -> ToolError {
        match err.kind() {
            io::ErrorKind::NotFound => ToolError::NotFound {
                program: self.display_name.clone(),
            },
            io::ErrorKind::PermissionDenied => ToolError::NotRunnable {
                program: self.display_name.clone(),
            },
            _ => ToolError::SpawnFailed(err.to_string()),
        }
    }

    async fn spawn_and_wait(&self, args: &[String]) -> Result<(Option<i32>, String, String), ToolError> {
        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.classify_spawn_error(e))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ToolError::IoError("stdout not captured".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| ToolError::IoError("stderr not captured".to_string()))?;

        let (out, err, status) = tokio::try_join!(
            drain(stdout, "stdout", self.debug),
            drain(stderr, "stderr", self.debug),
            child.wait(),
        )
        .map_err(|e| ToolError::IoError(e.to_string()))?;

        Ok((status.code(), out, err))
    }
}

/// Append chunks in arrival order until EOF
async fn drain<R>(mut reader: R, stream: &'static str, debug: bool) -> io::Result<String>
where
    R: AsyncRead + Unpin,
{
    let mut buf = [0u8; READ_CHUNK_SIZE];
    let mut captured = Vec::new();
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        if debug {
            debug!(stream = stream, chunk = %String::from_utf8_lossy(&buf[..n]), "{}", stream);
        }
        captured.extend_from_slice(&buf[..n]);
    }
    // Decode once so multi-byte characters split across chunks survive
    Ok(String::from_utf8_lossy(&captured).into_owned())
}

#[async_trait]
impl ToolRunner for SispmctlRunner {
    async fn run(&self, args: &[String]) -> Result<ToolOutput, ToolError> {
        let start_time = self.time_provider.now_millis();

        if self.debug {
            debug!(program = %self.program.display(), args = ?args, "Spawning tool");
        }

        let (exit_code, stdout, stderr) = self.spawn_and_wait(args).await?;
        let duration_ms = self.time_provider.now_millis() - start_time;

        info!(
            program = %self.display_name,
            args = ?args,
            exit_code = ?exit_code,
            duration_ms = %duration_ms,
            "Tool execution completed"
        );

        Ok(ToolOutput {
            exit_code,
            stdout,
            stderr,
            duration_ms,
        })
    }

    fn program(&self) -> &str {
        &self.display_name
    }
}
