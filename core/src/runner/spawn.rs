use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::{Child, ChildStdout, Command};

use crate::config::StderrMode;
use crate::error::SandboxError;

use super::types::ChildExit;

/// A running payload with its stdout attached to a pipe.
pub struct PayloadProcess {
    child: Child,
    path: PathBuf,
}

/// Launch the payload directly, without a shell and without arguments.
///
/// Stdin is closed for the child: ours was drained during capture.
pub fn spawn_payload(path: &Path, stderr: StderrMode) -> Result<PayloadProcess, SandboxError> {
    let stderr = match stderr {
        StderrMode::Inherit => Stdio::inherit(),
        StderrMode::Discard => Stdio::null(),
    };

    let child = Command::new(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(stderr)
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| SandboxError::Spawn {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::info!(path = %path.display(), pid = ?child.id(), "payload spawned");

    Ok(PayloadProcess {
        child,
        path: path.to_path_buf(),
    })
}

impl PayloadProcess {
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    pub fn take_stdout(&mut self) -> Result<ChildStdout, SandboxError> {
        self.child.stdout.take().ok_or_else(|| SandboxError::Spawn {
            path: self.path.clone(),
            source: std::io::Error::other("payload stdout was not piped"),
        })
    }

    pub async fn wait(&mut self) -> Result<ChildExit, SandboxError> {
        let status = self.child.wait().await.map_err(SandboxError::Wait)?;
        Ok(ChildExit::from_status(status))
    }

    pub async fn kill(&mut self) {
        if let Err(e) = self.child.kill().await {
            tracing::warn!(error = %e, "failed to kill payload process");
        }
    }
}
