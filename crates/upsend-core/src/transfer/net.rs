//! Network transport: streaming upload via libcurl.
//!
//! One implementation covers HTTP(S) PUT and FTP(S) STOR; libcurl picks the
//! protocol from the URL scheme. No retry here; failures propagate to the
//! caller.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::time::Duration;

use super::Transport;
use crate::source_file::SourceFile;

#[derive(Debug, Clone)]
pub struct CurlTransport {
    connect_timeout: Duration,
    timeout: Duration,
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            timeout: Duration::from_secs(3600),
        }
    }
}

impl CurlTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeouts(connect_timeout: Duration, timeout: Duration) -> Self {
        Self {
            connect_timeout,
            timeout,
        }
    }
}

impl Transport for CurlTransport {
    fn upload(&self, file: &SourceFile, dest_url: &str) -> Result<()> {
        let mut src = File::open(file.path())
            .with_context(|| format!("failed to open {}", file.path().display()))?;

        let mut easy = curl::easy::Easy::new();
        easy.url(dest_url).context("invalid URL")?;
        easy.upload(true)?;
        easy.in_filesize(file.size())?;
        easy.follow_location(true)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        {
            let mut transfer = easy.transfer();
            transfer.read_function(move |into| {
                src.read(into).map_err(|_| curl::easy::ReadError::Abort)
            })?;
            transfer
                .perform()
                .with_context(|| format!("upload to {} failed", dest_url))?;
        }

        let code = easy.response_code().context("no response code")?;
        // HTTP sets a status code; FTP reports its own reply code (2xx on
        // success) through the same call.
        if code != 0 && !(200..300).contains(&code) {
            anyhow::bail!("upload to {} returned status {}", dest_url, code);
        }

        tracing::debug!(url = dest_url, size = file.size(), "network upload complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_destination_is_a_transport_error() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("x.txt");
        std::fs::write(&src, b"x").unwrap();
        let file = SourceFile::open(&src).unwrap();

        let transport =
            CurlTransport::with_timeouts(Duration::from_millis(200), Duration::from_millis(500));
        // Reserved TEST-NET-1 address; nothing listens there.
        assert!(transport
            .upload(&file, "http://192.0.2.1/upload/x.txt")
            .is_err());
    }
}
