// Worker constants (No magic values)
use std::time::Duration;

/// Default depth of the per-device command queue
pub const DEFAULT_QUEUE_CAPACITY: usize = 32;

/// How long shutdown waits for an in-flight command chain
pub const GRACEFUL_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);
