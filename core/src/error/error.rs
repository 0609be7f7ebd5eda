use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SandboxError {
    #[error("config error: {0}")]
    Config(String),
    #[error("failed to open payload file {} for writing: {source}", path.display())]
    StorageOpen {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write payload file {}: {source}", path.display())]
    StorageWrite {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read payload from stdin: {0}")]
    InputRead(std::io::Error),
    #[error("failed to execute payload {}: {source}", path.display())]
    Spawn {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read payload output: {0}")]
    OutputRead(std::io::Error),
    #[error("failed to write payload output: {0}")]
    OutputWrite(std::io::Error),
    #[error("failed to wait for payload process: {0}")]
    Wait(std::io::Error),
    #[error("payload timed out after {secs}s")]
    Timeout { secs: u64 },
}

impl SandboxError {
    /// Short label of the failing stage, used in logs and run reports.
    pub fn kind(&self) -> &'static str {
        match self {
            SandboxError::Config(_) => "config",
            SandboxError::StorageOpen { .. } => "storage.open",
            SandboxError::StorageWrite { .. } => "storage.write",
            SandboxError::InputRead(_) => "input.read",
            SandboxError::Spawn { .. } => "spawn",
            SandboxError::OutputRead(_) => "output.read",
            SandboxError::OutputWrite(_) => "output.write",
            SandboxError::Wait(_) => "wait",
            SandboxError::Timeout { .. } => "timeout",
        }
    }
}
