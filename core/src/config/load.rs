use std::path::Path;

use super::types::AppConfig;

/// Names an explicit config file; takes precedence over `./sandbox.toml`.
pub const CONFIG_ENV: &str = "SANDBOX_CONFIG";
pub const LOCAL_CONFIG_FILE: &str = "sandbox.toml";

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: file named by $SANDBOX_CONFIG
    // Priority 2: ./sandbox.toml (current directory)
    let explicit = std::env::var(CONFIG_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty());
    let local_config = Path::new(LOCAL_CONFIG_FILE);

    let mut cfg = if let Some(path) = explicit {
        read_config(Path::new(&path))?
    } else if local_config.exists() {
        read_config(local_config)?
    } else {
        AppConfig::default()
    };

    apply_env_overrides(&mut cfg, |name| std::env::var(name).ok());
    Ok(cfg)
}

/// Load a specific file, then apply environment overrides.
pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let mut cfg = read_config(path)?;
    apply_env_overrides(&mut cfg, |name| std::env::var(name).ok());
    Ok(cfg)
}

fn read_config(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("read {} failed: {e}", path.display()))?;
    let cfg = toml::from_str::<AppConfig>(&s)
        .map_err(|e| anyhow::anyhow!("parse {} failed: {e}", path.display()))?;
    Ok(cfg)
}

fn apply_env_overrides<F>(cfg: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_empty("SANDBOX_PAYLOAD_PATH") {
        cfg.payload.path = v;
    }

    if let Some(v) = non_empty("SANDBOX_TIMEOUT_SECONDS") {
        match v.trim().parse::<u64>() {
            Ok(secs) => cfg.relay.timeout_secs = Some(secs),
            Err(_) => tracing::warn!(value = %v, "ignoring invalid SANDBOX_TIMEOUT_SECONDS"),
        }
    }

    if let Some(v) = non_empty("SANDBOX_PROPAGATE_EXIT") {
        cfg.relay.propagate_exit_code = v == "1" || v.eq_ignore_ascii_case("true");
    }
}
