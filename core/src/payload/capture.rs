use std::path::{Path, PathBuf};

use tokio::fs::OpenOptions;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};

use crate::config::CaptureConfig;
use crate::error::SandboxError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPayload {
    pub path: PathBuf,
    /// Sum of every successful write to the payload file.
    pub bytes: u64,
}

impl CapturedPayload {
    pub fn is_empty(&self) -> bool {
        self.bytes == 0
    }
}

/// Drain `input` into a freshly truncated payload file at `path`.
///
/// The file is created with `mode` and the same bits are re-applied after the
/// open, so a file left by an earlier run loses its old permissions too. On
/// return the file is flushed, synced and closed.
pub async fn capture<R>(
    input: &mut R,
    path: &Path,
    mode: u32,
    cfg: &CaptureConfig,
) -> Result<CapturedPayload, SandboxError>
where
    R: AsyncRead + Unpin,
{
    let write_err = |source: std::io::Error| SandboxError::StorageWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut opts = OpenOptions::new();
    opts.read(true).write(true).create(true).truncate(true);
    #[cfg(unix)]
    opts.mode(mode);

    let mut file = opts
        .open(path)
        .await
        .map_err(|source| SandboxError::StorageOpen {
            path: path.to_path_buf(),
            source,
        })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(mode))
            .await
            .map_err(write_err)?;
    }
    #[cfg(not(unix))]
    let _ = mode;

    let mut buf = vec![0u8; cfg.buffer_bytes.max(1)];
    let mut total = 0u64;

    loop {
        let n = input.read(&mut buf).await.map_err(SandboxError::InputRead)?;
        if n == 0 {
            break;
        }

        file.write_all(&buf[..n]).await.map_err(write_err)?;
        total += n as u64;
        tracing::trace!(chunk = n, total, "payload chunk written");
    }

    file.flush().await.map_err(write_err)?;
    file.sync_all().await.map_err(write_err)?;

    // Waits for in-flight blocking ops, so the descriptor is really closed
    // before anyone tries to exec the file.
    drop(file.into_std().await);

    tracing::info!(path = %path.display(), bytes = total, "payload captured");

    Ok(CapturedPayload {
        path: path.to_path_buf(),
        bytes: total,
    })
}
