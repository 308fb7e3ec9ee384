//! SMTP capability probe.
//!
//! Opens a plain TCP connection to a mail exchanger, reads the greeting,
//! announces itself with `EHLO` and returns the greeting and EHLO reply
//! as one string. The caller looks for the `STARTTLS` keyword in it.

use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use crate::config::{EHLO_IDENTITY, SMTP_MAX_REPLY_BYTES, SMTP_PORT};
use crate::error_handling::ProbeError;

/// Reads the greeting and EHLO reply of `host` on the SMTP port.
///
/// The whole conversation is bounded by `timeout`.
pub async fn read_capabilities(host: &str, timeout: Duration) -> Result<String, ProbeError> {
    read_capabilities_at(host, SMTP_PORT, timeout).await
}

pub(crate) async fn read_capabilities_at(
    host: &str,
    port: u16,
    timeout: Duration,
) -> Result<String, ProbeError> {
    let target = format!("{host}:{port}");
    match tokio::time::timeout(timeout, converse(host, port, &target)).await {
        Ok(result) => result,
        Err(_) => Err(ProbeError::Timeout {
            target,
            secs: timeout.as_secs(),
        }),
    }
}

async fn converse(host: &str, port: u16, target: &str) -> Result<String, ProbeError> {
    let stream = TcpStream::connect((host, port))
        .await
        .map_err(|source| ProbeError::Connect {
            target: target.to_string(),
            source,
        })?;
    let mut reader = BufReader::new(stream);
    let io_error = |source: std::io::Error| ProbeError::Io {
        target: target.to_string(),
        source,
    };

    let mut transcript = read_reply(&mut reader).await.map_err(io_error)?;

    reader
        .get_mut()
        .write_all(format!("EHLO {EHLO_IDENTITY}\r\n").as_bytes())
        .await
        .map_err(io_error)?;
    transcript.push_str(&read_reply(&mut reader).await.map_err(io_error)?);

    // Best effort; the capabilities are already in hand
    let _ = reader.get_mut().write_all(b"QUIT\r\n").await;

    log::debug!("SMTP transcript from {target}: {transcript:?}");
    Ok(transcript)
}

/// Reads one (possibly multi-line) SMTP reply.
///
/// Stops after the final line (`"250 ..."` rather than `"250-..."`), at end of
/// stream, or once the reply exceeds [`SMTP_MAX_REPLY_BYTES`].
pub(crate) async fn read_reply<R>(reader: &mut R) -> std::io::Result<String>
where
    R: AsyncBufRead + Unpin,
{
    let mut reply = String::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            break;
        }
        reply.push_str(&line);
        if is_final_line(&line) || reply.len() >= SMTP_MAX_REPLY_BYTES {
            break;
        }
    }
    Ok(reply)
}

fn is_final_line(line: &str) -> bool {
    line.as_bytes().get(3) != Some(&b'-')
}
