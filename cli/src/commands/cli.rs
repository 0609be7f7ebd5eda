use std::path::PathBuf;

use clap::Parser;
use sandbox_core::config::AppConfig;

/// Read an executable from stdin, run it, and stream its stdout to stdout.
///
/// The payload runs with this process's privileges; nothing is isolated.
#[derive(Parser, Debug)]
#[command(name = "sandbox", version)]
pub struct Args {
    /// Config file (defaults to $SANDBOX_CONFIG, then ./sandbox.toml).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Where to stage the payload.
    #[arg(long)]
    pub payload_path: Option<String>,

    /// Kill the payload if it has not finished after this many seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Exit with the payload's exit code instead of 0.
    #[arg(long)]
    pub propagate_exit_code: bool,

    /// Write a JSON run report to this file.
    #[arg(long)]
    pub report: Option<String>,

    /// Anything else on the command line is accepted and ignored.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub ignored: Vec<String>,
}

impl Args {
    /// Flags take precedence over file and environment values.
    pub fn apply_overrides(&self, cfg: &mut AppConfig) {
        if let Some(path) = &self.payload_path {
            cfg.payload.path = path.clone();
        }
        if let Some(secs) = self.timeout_secs {
            cfg.relay.timeout_secs = Some(secs);
        }
        if self.propagate_exit_code {
            cfg.relay.propagate_exit_code = true;
        }
        if let Some(report) = &self.report {
            cfg.report.path = Some(report.clone());
        }
    }
}
