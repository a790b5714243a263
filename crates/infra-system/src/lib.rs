// Gembird Infrastructure - System Adapters
// Implements: ToolRunner

pub mod sispmctl_runner;

pub use sispmctl_runner::{SispmctlRunner, DEFAULT_PROGRAM};
