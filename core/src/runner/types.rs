use serde::Serialize;

/// How the payload process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChildExit {
    pub code: Option<i32>,
    /// Terminating signal, unix only.
    pub signal: Option<i32>,
}

impl ChildExit {
    pub fn from_status(status: std::process::ExitStatus) -> Self {
        #[cfg(unix)]
        let signal = {
            use std::os::unix::process::ExitStatusExt;
            status.signal()
        };
        #[cfg(not(unix))]
        let signal = None;

        Self {
            code: status.code(),
            signal,
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Shell-style exit code: the child's own code, or 128 + signal.
    pub fn exit_code(&self) -> i32 {
        match (self.code, self.signal) {
            (Some(code), _) => code,
            (None, Some(sig)) => 128 + sig,
            (None, None) => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub bytes_relayed: u64,
    pub exit: ChildExit,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Nothing was captured, so nothing was executed.
    SkippedEmpty,
    Completed(RunSummary),
}

impl RunOutcome {
    pub fn summary(&self) -> Option<&RunSummary> {
        match self {
            RunOutcome::SkippedEmpty => None,
            RunOutcome::Completed(s) => Some(s),
        }
    }
}
