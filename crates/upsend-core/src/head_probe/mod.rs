//! Header inspection: HEAD-style probes of a destination URL.
//!
//! Verification compares the destination's reported `Content-Length` and
//! `Content-Type` against the source file, so all it needs from a probe is
//! the parsed header map. The probe sits behind a trait so tests and
//! local-copy destinations can substitute the HTTP implementation.

mod parse;

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::str;
use std::time::Duration;

/// Canonical key for the destination's reported byte size.
pub const CONTENT_LENGTH: &str = "Content-Length";
/// Canonical key for the destination's reported MIME type.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Header-only lookup against a URL, in parsed associative form.
///
/// Semantics match an HTTP HEAD request: whatever headers the destination
/// reports are returned as-is, status included or not. A reachable
/// destination that lacks the interesting headers is not an error here;
/// the verification protocol turns that into its own failure.
pub trait HeaderInspector {
    fn get_headers(&self, url: &str) -> Result<HashMap<String, String>>;
}

/// Default inspector: HEAD request via libcurl, following redirects.
#[derive(Debug, Clone)]
pub struct HttpHeaderInspector {
    connect_timeout: Duration,
    timeout: Duration,
}

impl Default for HttpHeaderInspector {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(30),
        }
    }
}

impl HttpHeaderInspector {
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

impl HeaderInspector for HttpHeaderInspector {
    fn get_headers(&self, url: &str) -> Result<HashMap<String, String>> {
        let mut lines: Vec<String> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url).context("invalid URL")?;
        easy.nobody(true)?; // HEAD request
        easy.follow_location(true)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    lines.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.perform().context("HEAD request failed")?;
        }

        Ok(parse::parse_header_lines(&lines))
    }
}

/// Inspector for destinations on the local filesystem: reports the file's
/// size and extension-guessed MIME type the way a static file server would.
/// A missing file yields an empty map, which verification reports as
/// "no file found in destination".
#[derive(Debug, Clone, Default)]
pub struct FsHeaderInspector;

impl FsHeaderInspector {
    pub fn new() -> Self {
        Self
    }
}

impl HeaderInspector for FsHeaderInspector {
    fn get_headers(&self, url: &str) -> Result<HashMap<String, String>> {
        let path = url.strip_prefix("file://").unwrap_or(url);
        let mut headers = HashMap::new();
        let meta = match std::fs::metadata(path) {
            Ok(meta) if meta.is_file() => meta,
            _ => return Ok(headers),
        };
        headers.insert(CONTENT_LENGTH.to_string(), meta.len().to_string());
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        headers.insert(CONTENT_TYPE.to_string(), mime.essence_str().to_string());
        Ok(headers)
    }
}
