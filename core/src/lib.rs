//! Stage an executable payload read from stdin, run it, and relay its stdout.
//!
//! No isolation is applied: the payload runs with the caller's privileges,
//! filesystem and resource limits.

pub mod config;
pub mod engine;
pub mod error;
pub mod payload;
pub mod runner;
pub mod state;

pub use engine::{run_pipeline, PipelineRun, RunReport};
pub use error::SandboxError;
