use serde::{Deserialize, Serialize};

use crate::error::SandboxError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub payload: PayloadConfig,

    #[serde(default)]
    pub capture: CaptureConfig,

    #[serde(default)]
    pub relay: RelayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), SandboxError> {
        if self.payload.path.trim().is_empty() {
            return Err(SandboxError::Config("payload.path must not be empty".into()));
        }
        if self.capture.buffer_bytes == 0 {
            return Err(SandboxError::Config(
                "capture.buffer_bytes must be greater than zero".into(),
            ));
        }
        if self.relay.buffer_bytes == 0 {
            return Err(SandboxError::Config(
                "relay.buffer_bytes must be greater than zero".into(),
            ));
        }
        if self.relay.timeout_secs == Some(0) {
            return Err(SandboxError::Config(
                "relay.timeout_secs must be greater than zero when set".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadConfig {
    /// Where the captured payload is staged. Relative paths resolve against the
    /// current working directory.
    #[serde(default = "default_payload_path")]
    pub path: String,

    /// Permission bits applied to the payload file (unix only).
    #[serde(default = "default_payload_mode")]
    pub mode: u32,

    /// Append a random suffix to the file name so concurrent runs in the same
    /// directory never share a payload file.
    #[serde(default)]
    pub unique_name: bool,

    #[serde(default)]
    pub remove_after_run: bool,
}

fn default_payload_path() -> String {
    "./binary".to_string()
}

fn default_payload_mode() -> u32 {
    0o777
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self {
            path: default_payload_path(),
            mode: default_payload_mode(),
            unique_name: false,
            remove_after_run: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    #[serde(default = "default_capture_buffer_bytes")]
    pub buffer_bytes: usize,
}

fn default_capture_buffer_bytes() -> usize {
    4096
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            buffer_bytes: default_capture_buffer_bytes(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StderrMode {
    /// The child writes straight to our stderr.
    #[default]
    Inherit,
    Discard,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default = "default_relay_buffer_bytes")]
    pub buffer_bytes: usize,

    #[serde(default)]
    pub stderr: StderrMode,

    /// Upper bound for relay + reap. Unset means wait forever.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Exit with the child's exit code instead of 0.
    #[serde(default)]
    pub propagate_exit_code: bool,
}

fn default_relay_buffer_bytes() -> usize {
    1024
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            buffer_bytes: default_relay_buffer_bytes(),
            stderr: StderrMode::default(),
            timeout_secs: None,
            propagate_exit_code: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "warn" or "sandbox_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Write a JSON run report here when set.
    #[serde(default)]
    pub path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.payload.path, "./binary");
        assert_eq!(cfg.payload.mode, 0o777);
        assert_eq!(cfg.capture.buffer_bytes, 4096);
        assert_eq!(cfg.relay.buffer_bytes, 1024);
        assert_eq!(cfg.relay.stderr, StderrMode::Inherit);
        assert!(cfg.relay.timeout_secs.is_none());
        assert!(!cfg.relay.propagate_exit_code);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [payload]
            mode = 0o755

            [relay]
            stderr = "discard"
            timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.payload.path, "./binary");
        assert_eq!(cfg.payload.mode, 0o755);
        assert_eq!(cfg.relay.stderr, StderrMode::Discard);
        assert_eq!(cfg.relay.timeout_secs, Some(5));
        assert_eq!(cfg.relay.buffer_bytes, 1024);
    }

    #[test]
    fn zero_buffers_are_rejected() {
        let mut cfg = AppConfig::default();
        cfg.capture.buffer_bytes = 0;
        assert!(matches!(cfg.validate(), Err(SandboxError::Config(_))));

        let mut cfg = AppConfig::default();
        cfg.relay.buffer_bytes = 0;
        assert!(matches!(cfg.validate(), Err(SandboxError::Config(_))));

        let mut cfg = AppConfig::default();
        cfg.relay.timeout_secs = Some(0);
        assert!(matches!(cfg.validate(), Err(SandboxError::Config(_))));
    }
}
