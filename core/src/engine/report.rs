use std::path::Path;

use serde::Serialize;

use crate::error::SandboxError;
use crate::runner::RunOutcome;
use crate::state::Stage;

/// Machine-readable summary of one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub success: bool,
    pub skipped: bool,
    pub stage: Stage,
    pub payload_path: String,
    pub bytes_captured: u64,
    pub bytes_relayed: Option<u64>,
    pub exit_code: Option<i32>,
    pub signal: Option<i32>,
    pub execution_time_ms: u64,
    pub error_kind: Option<String>,
    pub error: Option<String>,
}

impl RunReport {
    pub fn new(
        payload_path: &Path,
        bytes_captured: u64,
        result: &Result<RunOutcome, SandboxError>,
        stage: Stage,
        execution_time_ms: u64,
    ) -> Self {
        let summary = result.as_ref().ok().and_then(RunOutcome::summary);
        let err = result.as_ref().err();

        Self {
            success: result.is_ok(),
            skipped: matches!(result, Ok(RunOutcome::SkippedEmpty)),
            stage,
            payload_path: payload_path.to_string_lossy().to_string(),
            bytes_captured,
            bytes_relayed: summary.map(|s| s.bytes_relayed),
            exit_code: summary.and_then(|s| s.exit.code),
            signal: summary.and_then(|s| s.exit.signal),
            execution_time_ms,
            error_kind: err.map(|e| e.kind().to_string()),
            error: err.map(|e| e.to_string()),
        }
    }
}

pub async fn write_report(path: &Path, report: &RunReport) -> anyhow::Result<()> {
    let json = serde_json::to_vec_pretty(report)?;
    tokio::fs::write(path, json)
        .await
        .map_err(|e| anyhow::anyhow!("write report {} failed: {e}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{ChildExit, RunSummary};

    #[tokio::test]
    async fn completed_run_is_written_as_json() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report.json");
        let result = Ok(RunOutcome::Completed(RunSummary {
            bytes_relayed: 42,
            exit: ChildExit {
                code: Some(0),
                signal: None,
            },
            duration_ms: 7,
        }));

        let report = RunReport::new(Path::new("/w/binary"), 100, &result, Stage::Done, 9);
        write_report(&out, &report).await.unwrap();

        let v: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(v["success"], true);
        assert_eq!(v["skipped"], false);
        assert_eq!(v["stage"], "done");
        assert_eq!(v["bytes_captured"], 100);
        assert_eq!(v["bytes_relayed"], 42);
        assert_eq!(v["exit_code"], 0);
        assert!(v["error"].is_null());
    }

    #[test]
    fn failed_run_carries_error_kind() {
        let result = Err(SandboxError::Timeout { secs: 3 });
        let report = RunReport::new(Path::new("binary"), 5, &result, Stage::Aborted, 3000);
        assert!(!report.success);
        assert_eq!(report.error_kind.as_deref(), Some("timeout"));
        assert_eq!(report.error.as_deref(), Some("payload timed out after 3s"));
        assert!(report.exit_code.is_none());
    }
}
