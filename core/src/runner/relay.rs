use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::SandboxError;

/// Copy `rd` to `wr` until `rd` reports EOF, one buffer at a time.
///
/// Bytes are forwarded exactly as read; nothing is decoded or terminated.
/// Each chunk is flushed so output reaches the consumer while the child is
/// still running. Returns the number of bytes relayed.
pub async fn relay<R, W>(rd: &mut R, wr: &mut W, buffer_bytes: usize) -> Result<u64, SandboxError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = vec![0u8; buffer_bytes.max(1)];
    let mut total = 0u64;

    loop {
        let n = rd.read(&mut buf).await.map_err(SandboxError::OutputRead)?;
        if n == 0 {
            break;
        }

        wr.write_all(&buf[..n])
            .await
            .map_err(SandboxError::OutputWrite)?;
        wr.flush().await.map_err(SandboxError::OutputWrite)?;
        total += n as u64;
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    async fn relay_all(input: &[u8], buffer_bytes: usize) -> (u64, Vec<u8>) {
        let mut rd = input;
        let mut out = Vec::new();
        let n = relay(&mut rd, &mut out, buffer_bytes).await.unwrap();
        (n, out)
    }

    #[tokio::test]
    async fn relays_nothing_for_empty_stream() {
        let (n, out) = relay_all(&[], 1024).await;
        assert_eq!(n, 0);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn relays_exactly_one_buffer() {
        let input = vec![0xabu8; 1024];
        let (n, out) = relay_all(&input, 1024).await;
        assert_eq!(n, 1024);
        assert_eq!(out, input);
    }

    #[tokio::test]
    async fn relays_several_buffers_with_partial_tail() {
        let input: Vec<u8> = (0..5000u32).map(|i| (i * 7 % 256) as u8).collect();
        let (n, out) = relay_all(&input, 1024).await;
        assert_eq!(n, 5000);
        assert_eq!(out, input);
    }

    #[tokio::test]
    async fn embedded_nul_bytes_do_not_truncate_chunks() {
        let input = b"before\0after\0\0\xff\xfe end";
        let (n, out) = relay_all(input, 4).await;
        assert_eq!(n, input.len() as u64);
        assert_eq!(out, input.to_vec());
    }

    #[tokio::test]
    async fn relays_from_a_live_pipe_until_writer_closes() {
        let (mut wr, mut rd) = tokio::io::duplex(64);
        let producer = tokio::spawn(async move {
            for chunk in [&b"one "[..], &b"two "[..], &b"three"[..]] {
                wr.write_all(chunk).await.unwrap();
            }
        });

        let mut out = Vec::new();
        let n = relay(&mut rd, &mut out, 3).await.unwrap();
        producer.await.unwrap();

        assert_eq!(n, 13);
        assert_eq!(out, b"one two three".to_vec());
    }

    #[tokio::test]
    async fn read_error_is_output_read() {
        let mut rd = tokio_test::io::Builder::new()
            .read(b"ok")
            .read_error(std::io::Error::other("pipe broke"))
            .build();
        let mut out = Vec::new();

        let err = relay(&mut rd, &mut out, 1024).await.unwrap_err();

        assert!(matches!(err, SandboxError::OutputRead(_)));
        assert_eq!(out, b"ok".to_vec());
    }

    #[tokio::test]
    async fn write_error_is_output_write() {
        let mut rd: &[u8] = b"data";
        let mut wr = tokio_test::io::Builder::new()
            .write_error(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "stdout closed",
            ))
            .build();

        let err = relay(&mut rd, &mut wr, 1024).await.unwrap_err();

        assert!(matches!(err, SandboxError::OutputWrite(_)));
    }
}
