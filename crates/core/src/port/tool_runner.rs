// Tool Runner Port
// Abstraction for invoking the external power strip control utility

use async_trait::async_trait;
use thiserror::Error;

/// Captured result of one finished tool process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: i64,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Process-level failures: the tool never produced a completion
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    #[error("{program} not found")]
    NotFound { program: String },

    #[error("cannot run {program}")]
    NotRunnable { program: String },

    #[error("Spawn failed: {0}")]
    SpawnFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Tool Runner trait
///
/// Implementations:
/// - SispmctlRunner: spawns the real utility (infra-system)
/// - MockToolRunner: scripted responses for tests
#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Run the tool with `args` and wait for it to exit
    ///
    /// A non-zero exit is a successful `run`; only failures to start or
    /// observe the process are errors.
    async fn run(&self, args: &[String]) -> Result<ToolOutput, ToolError>;

    /// Display name of the tool, used in fault messages
    fn program(&self) -> &str;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Mock runner replaying scripted responses in order
    #[derive(Clone)]
    pub struct MockToolRunner {
        responses: Arc<Mutex<VecDeque<Result<ToolOutput, ToolError>>>>,
        calls: Arc<Mutex<Vec<Vec<String>>>>,
        delay: Option<Duration>,
    }

    impl MockToolRunner {
        pub fn new() -> Self {
            Self {
                responses: Arc::new(Mutex::new(VecDeque::new())),
                calls: Arc::new(Mutex::new(Vec::new())),
                delay: None,
            }
        }

        /// Sleep before answering each call
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub fn push_output(&self, exit_code: i32, stdout: &str, stderr: &str) -> &Self {
            self.responses.lock().unwrap().push_back(Ok(ToolOutput {
                exit_code: Some(exit_code),
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
                duration_ms: 1,
            }));
            self
        }

        pub fn push_error(&self, error: ToolError) -> &Self {
            self.responses.lock().unwrap().push_back(Err(error));
            self
        }

        /// Argument lists of every call so far
        pub fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl Default for MockToolRunner {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl ToolRunner for MockToolRunner {
        async fn run(&self, args: &[String]) -> Result<ToolOutput, ToolError> {
            self.calls.lock().unwrap().push(args.to_vec());

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            let next = self.responses.lock().unwrap().pop_front();
            next.unwrap_or_else(|| Err(ToolError::IoError("no scripted response".to_string())))
        }

        fn program(&self) -> &str {
            "sispmctl"
        }
    }
}
