//! Probe command: print a destination's parsed headers.

use anyhow::Result;

use upsend_core::head_probe::{FsHeaderInspector, HeaderInspector, HttpHeaderInspector};
use upsend_core::transfer::is_remote_url;

pub fn run_probe(url: &str) -> Result<()> {
    let headers = if is_remote_url(url) {
        HttpHeaderInspector::new().get_headers(url)?
    } else {
        FsHeaderInspector::new().get_headers(url)?
    };

    if headers.is_empty() {
        println!("no headers for {}", url);
        return Ok(());
    }

    let mut names: Vec<&String> = headers.keys().collect();
    names.sort();
    for name in names {
        println!("{}: {}", name, headers[name]);
    }
    Ok(())
}
