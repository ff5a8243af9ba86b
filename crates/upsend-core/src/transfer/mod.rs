//! Transfer strategies: how the attached file's bytes reach the destination.
//!
//! The session only depends on the [`Transport`] trait; concrete strategies
//! (local copy, libcurl network upload) are chosen by the caller, usually
//! via [`transport_for_url`].

mod local;
mod net;

pub use local::LocalCopyTransport;
pub use net::CurlTransport;

use crate::source_file::SourceFile;

/// One-shot byte transfer of `file` to `dest_url` (the destination base URL
/// joined with the target filename). Failures are transport-specific and
/// opaque to the orchestrator.
pub trait Transport {
    fn upload(&self, file: &SourceFile, dest_url: &str) -> anyhow::Result<()>;
}

/// Picks a transport from the destination URL: the curl transport for
/// `http(s)` and `ftp(s)` schemes, local copy for everything else
/// (plain paths, `file://`).
pub fn transport_for_url(dest: &str) -> Box<dyn Transport> {
    match url::Url::parse(dest) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https" | "ftp" | "ftps") => {
            Box::new(CurlTransport::new())
        }
        _ => Box::new(LocalCopyTransport::new()),
    }
}

/// True when the URL's scheme routes to the network transport.
pub fn is_remote_url(dest: &str) -> bool {
    matches!(
        url::Url::parse(dest).as_ref().map(url::Url::scheme),
        Ok("http") | Ok("https") | Ok("ftp") | Ok("ftps")
    )
}
