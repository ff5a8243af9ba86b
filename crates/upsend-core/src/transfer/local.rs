//! Local-copy transport: the "destination URL" is a directory on this
//! machine (shared mount, staging dir served by a static file server).

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::Transport;
use crate::source_file::SourceFile;

#[derive(Debug, Clone, Default)]
pub struct LocalCopyTransport;

impl LocalCopyTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Transport for LocalCopyTransport {
    fn upload(&self, file: &SourceFile, dest_url: &str) -> Result<()> {
        let dest = dest_url.strip_prefix("file://").unwrap_or(dest_url);
        let dest = Path::new(dest);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::copy(file.path(), dest).with_context(|| {
            format!(
                "failed to copy {} to {}",
                file.path().display(),
                dest.display()
            )
        })?;
        tracing::debug!(
            from = %file.path().display(),
            to = %dest.display(),
            "local copy complete"
        );
        Ok(())
    }
}
