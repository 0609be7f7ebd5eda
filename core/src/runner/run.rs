use std::time::{Duration, Instant};

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::process::ChildStdout;

use crate::config::RelayConfig;
use crate::error::SandboxError;
use crate::payload::CapturedPayload;
use crate::state::{Stage, StageTracker};

use super::relay::relay;
use super::spawn::{spawn_payload, PayloadProcess};
use super::types::{ChildExit, RunOutcome, RunSummary};

/// Run the captured payload and stream its stdout into `out`.
///
/// An empty payload is never executed. Otherwise the child is spawned, its
/// stdout relayed until EOF, and the child reaped so its exit status can be
/// reported. With `timeout_secs` set the relay and reap are bounded and the
/// child is killed on expiry.
///
/// `stages` is expected to sit in `Capturing`; it leaves in `SkippedEmpty` or
/// `Relaying`.
pub async fn run_and_relay<W>(
    payload: &CapturedPayload,
    cfg: &RelayConfig,
    out: &mut W,
    stages: &mut StageTracker,
) -> Result<RunOutcome, SandboxError>
where
    W: AsyncWrite + Unpin,
{
    if payload.is_empty() {
        stages.enter(Stage::SkippedEmpty);
        tracing::info!(path = %payload.path.display(), "empty payload, skipping execution");
        return Ok(RunOutcome::SkippedEmpty);
    }

    stages.enter(Stage::Executing);
    let started_at = Instant::now();
    let mut process = spawn_payload(&payload.path, cfg.stderr)?;
    let stdout = process.take_stdout()?;
    stages.enter(Stage::Relaying);

    let (bytes_relayed, exit) = match cfg.timeout_secs {
        Some(secs) => {
            let bounded = tokio::time::timeout(
                Duration::from_secs(secs),
                relay_and_reap(&mut process, stdout, out, cfg.buffer_bytes),
            )
            .await;
            match bounded {
                Ok(res) => res?,
                Err(_) => {
                    tracing::warn!(pid = ?process.id(), secs, "payload timed out, killing");
                    process.kill().await;
                    let _ = out.flush().await;
                    return Err(SandboxError::Timeout { secs });
                }
            }
        }
        None => relay_and_reap(&mut process, stdout, out, cfg.buffer_bytes).await?,
    };

    let duration_ms = started_at.elapsed().as_millis() as u64;
    tracing::info!(
        bytes_relayed,
        exit_code = ?exit.code,
        signal = ?exit.signal,
        duration_ms,
        "payload finished"
    );

    Ok(RunOutcome::Completed(RunSummary {
        bytes_relayed,
        exit,
        duration_ms,
    }))
}

async fn relay_and_reap<W>(
    process: &mut PayloadProcess,
    mut stdout: ChildStdout,
    out: &mut W,
    buffer_bytes: usize,
) -> Result<(u64, ChildExit), SandboxError>
where
    W: AsyncWrite + Unpin,
{
    let relayed = relay(&mut stdout, out, buffer_bytes).await?;
    drop(stdout);
    let exit = process.wait().await?;
    Ok((relayed, exit))
}
