use std::path::Path;
use std::time::Instant;

use tokio::io::{AsyncRead, AsyncWrite};

use crate::config::AppConfig;
use crate::error::SandboxError;
use crate::payload::{capture, remove_payload};
use crate::runner::{run_and_relay, RunOutcome};
use crate::state::{Stage, StageTracker};

use super::report::RunReport;

#[derive(Debug)]
pub struct PipelineRun {
    pub result: Result<RunOutcome, SandboxError>,
    pub report: RunReport,
}

/// Capture `input` into `payload_path`, then run it and relay its stdout to `out`.
///
/// The two stages never overlap: execution starts only after the capture hit
/// EOF and the payload file was closed.
pub async fn run_pipeline<R, W>(
    input: &mut R,
    out: &mut W,
    cfg: &AppConfig,
    payload_path: &Path,
) -> PipelineRun
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let started_at = Instant::now();
    let mut stages = StageTracker::new();
    let mut bytes_captured = 0u64;

    let result = drive(
        input,
        out,
        cfg,
        payload_path,
        &mut stages,
        &mut bytes_captured,
    )
    .await;

    match &result {
        Ok(_) => stages.enter(Stage::Done),
        Err(e) => {
            tracing::error!(error.kind = e.kind(), error.message = %e, stage = %stages.current(), "run aborted");
            stages.abort();
        }
    }

    if cfg.payload.remove_after_run {
        remove_payload(payload_path).await;
    }

    let report = RunReport::new(
        payload_path,
        bytes_captured,
        &result,
        stages.current(),
        started_at.elapsed().as_millis() as u64,
    );

    PipelineRun { result, report }
}

async fn drive<R, W>(
    input: &mut R,
    out: &mut W,
    cfg: &AppConfig,
    payload_path: &Path,
    stages: &mut StageTracker,
    bytes_captured: &mut u64,
) -> Result<RunOutcome, SandboxError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    cfg.validate()?;

    stages.enter(Stage::Capturing);
    let captured = capture(input, payload_path, cfg.payload.mode, &cfg.capture).await?;
    *bytes_captured = captured.bytes;

    run_and_relay(&captured, &cfg.relay, out, stages).await
}
