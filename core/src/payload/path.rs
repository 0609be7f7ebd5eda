use std::path::{Component, Path, PathBuf};

use crate::config::PayloadConfig;

/// Resolve the payload location to an absolute path under `cwd`.
///
/// The result always contains a directory component, so spawning it never
/// falls back to a `PATH` lookup.
pub fn resolve_payload_path(cfg: &PayloadConfig, cwd: &Path) -> PathBuf {
    let mut path: PathBuf = Path::new(cfg.path.trim())
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    if cfg.unique_name {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "binary".to_string());
        path.set_file_name(format!("{name}.{}", uuid::Uuid::new_v4().simple()));
    }

    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

/// Best-effort removal of a staged payload.
pub async fn remove_payload(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::debug!(path = %path.display(), "payload removed"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "payload removal failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(path: &str, unique_name: bool) -> PayloadConfig {
        PayloadConfig {
            path: path.to_string(),
            unique_name,
            ..PayloadConfig::default()
        }
    }

    #[test]
    fn relative_path_joins_cwd() {
        let p = resolve_payload_path(&cfg("./binary", false), Path::new("/work"));
        assert_eq!(p, PathBuf::from("/work/binary"));
    }

    #[test]
    fn absolute_path_is_kept() {
        let p = resolve_payload_path(&cfg("/tmp/stage/bin", false), Path::new("/work"));
        assert_eq!(p, PathBuf::from("/tmp/stage/bin"));
    }

    #[test]
    fn bare_name_still_gets_a_directory() {
        let p = resolve_payload_path(&cfg("binary", false), Path::new("/work"));
        assert_eq!(p.parent(), Some(Path::new("/work")));
    }

    #[test]
    fn unique_names_differ_between_runs() {
        let a = resolve_payload_path(&cfg("./binary", true), Path::new("/work"));
        let b = resolve_payload_path(&cfg("./binary", true), Path::new("/work"));
        assert_ne!(a, b);
        assert_eq!(a.parent(), Some(Path::new("/work")));
        assert!(a
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("binary."));
    }

    #[tokio::test]
    async fn remove_missing_payload_is_quiet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary");
        remove_payload(&path).await;

        std::fs::write(&path, b"x").unwrap();
        remove_payload(&path).await;
        assert!(!path.exists());
    }
}
