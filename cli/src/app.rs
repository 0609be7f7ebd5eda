//! Wires config, stdin/stdout and the core pipeline together for one run.
use std::io::Write;
use std::path::Path;

use sandbox_core::config::AppConfig;
use sandbox_core::engine::write_report;
use sandbox_core::payload::resolve_payload_path;
use sandbox_core::runner::RunOutcome;

use crate::error::CliError;

pub const EMPTY_PAYLOAD_NOTICE: &str = "empty payload, nothing to execute";

#[tracing::instrument(name = "cli.run_app", skip(cfg))]
pub async fn run_app(cfg: AppConfig) -> Result<i32, CliError> {
    cfg.validate()?;

    let cwd = std::env::current_dir()?;
    let payload_path = resolve_payload_path(&cfg.payload, &cwd);
    tracing::debug!(path = %payload_path.display(), "payload path resolved");

    let mut stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();

    let run = sandbox_core::run_pipeline(&mut stdin, &mut stdout, &cfg, &payload_path).await;

    if let Some(report_path) = cfg.report.path.as_deref() {
        if let Err(e) = write_report(Path::new(report_path), &run.report).await {
            tracing::warn!(error = %e, "run report not written");
        }
    }

    match run.result? {
        RunOutcome::SkippedEmpty => {
            let mut out = std::io::stdout().lock();
            writeln!(out, "{EMPTY_PAYLOAD_NOTICE}")?;
            out.flush()?;
            Ok(0)
        }
        RunOutcome::Completed(summary) => {
            if cfg.relay.propagate_exit_code {
                Ok(summary.exit.exit_code())
            } else {
                Ok(0)
            }
        }
    }
}
