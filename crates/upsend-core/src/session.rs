//! Upload orchestration: one session per file transfer attempt.
//!
//! Lifecycle: construct with a settings source, `set_upload_dir`, `set_file`
//! (policy checks run here), `upload` through a transport, then
//! `check_if_successful` compares the destination's reported headers
//! against the source file. Sessions are single-use per file and have no
//! internal concurrency; parallel uploads need one session each.

use crate::error::{UploadError, VerifyFailure};
use crate::head_probe::{HeaderInspector, HttpHeaderInspector, CONTENT_LENGTH, CONTENT_TYPE};
use crate::name_changer::NameChanger;
use crate::policy;
use crate::settings::SettingsSource;
use crate::source_file::SourceFile;
use crate::transfer::Transport;
use std::fmt;

pub struct UploadSession {
    settings: SettingsSource,
    inspector: Box<dyn HeaderInspector>,
    upload_url: Option<String>,
    file: Option<SourceFile>,
    filename: Option<String>,
}

impl fmt::Debug for UploadSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadSession")
            .field("settings", &self.settings)
            .field("upload_url", &self.upload_url)
            .field("file", &self.file)
            .field("filename", &self.filename)
            .finish_non_exhaustive()
    }
}

impl UploadSession {
    /// Creates a session with the default HTTP header inspector.
    pub fn new(settings: SettingsSource) -> Self {
        Self {
            settings,
            inspector: Box::new(HttpHeaderInspector::new()),
            upload_url: None,
            file: None,
            filename: None,
        }
    }

    /// Replaces the header inspector (local destinations, tests).
    pub fn with_inspector(mut self, inspector: Box<dyn HeaderInspector>) -> Self {
        self.inspector = inspector;
        self
    }

    /// Resolves the destination base URL from the named setting (lookup
    /// errors propagate, never suppressed) and strips trailing slashes.
    /// Calling again re-configures the destination.
    pub fn set_upload_dir(&mut self, setting_name: &str) -> Result<&mut Self, UploadError> {
        let value = self
            .settings
            .get(setting_name, false)?
            .ok_or_else(|| UploadError::SettingNotFound(setting_name.to_string()))?;
        let url = value.as_str().ok_or_else(|| UploadError::InvalidSetting {
            name: setting_name.to_string(),
            message: "expected a string URL".to_string(),
        })?;
        let url = url.trim_end_matches('/').to_string();
        tracing::debug!(dir = %url, "upload directory configured");
        self.upload_url = Some(url);
        Ok(self)
    }

    /// The configured destination base URL, if set.
    pub fn upload_dir(&self) -> Option<&str> {
        self.upload_url.as_deref()
    }

    /// The decided target filename, if a file has been attached.
    pub fn target_filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Attaches the file and decides its target name (client original name
    /// preferred, optional name changer applied), then runs the policy
    /// checks when `validate` is true.
    ///
    /// The file and filename are assigned before validation on purpose: a
    /// rejected attach leaves the attempted name inspectable on the session.
    pub fn set_file(
        &mut self,
        file: SourceFile,
        name_changer: Option<&dyn NameChanger>,
        validate: bool,
    ) -> Result<&mut Self, UploadError> {
        if self.upload_url.is_none() {
            return Err(UploadError::DestinationNotConfigured);
        }

        let mut filename = file.upload_name().to_string();
        if let Some(changer) = name_changer {
            filename = changer.change_name(&filename);
        }
        tracing::debug!(filename = %filename, size = file.size(), "file attached");
        self.filename = Some(filename);
        self.file = Some(file);

        if validate {
            if let Some(file) = &self.file {
                policy::validate(file, &self.settings)?;
            }
        }
        Ok(self)
    }

    /// Transfers the attached file to `upload_dir/target_filename` through
    /// the given transport. Transport failures propagate opaquely.
    pub fn upload(&mut self, transport: &dyn Transport) -> Result<&mut Self, UploadError> {
        let url = self.destination_url()?;
        let file = self.file.as_ref().ok_or(UploadError::NoFileAttached)?;
        tracing::info!(url = %url, size = file.size(), "starting upload");
        transport.upload(file, &url).map_err(UploadError::Transport)?;
        Ok(self)
    }

    /// The verification protocol: probes the destination URL's headers and
    /// compares `Content-Length` / `Content-Type` against the source file.
    ///
    /// This trusts the destination's reported headers as a proxy for "the
    /// bytes landed correctly" instead of re-downloading and hashing, a
    /// deliberate trade of strong correctness for a cheap check. Idempotent;
    /// may be called repeatedly.
    pub fn check_if_successful(&self) -> Result<(), UploadError> {
        let url = self.destination_url()?;
        let file = self.file.as_ref().ok_or(UploadError::NoFileAttached)?;

        let headers = self
            .inspector
            .get_headers(&url)
            .map_err(|source| UploadError::Probe {
                url: url.clone(),
                source,
            })?;

        let (length, mime) = match (headers.get(CONTENT_LENGTH), headers.get(CONTENT_TYPE)) {
            (Some(length), Some(mime)) => (length, mime),
            _ => {
                return Err(UploadError::VerificationFailed {
                    url,
                    reason: VerifyFailure::NotFound,
                })
            }
        };

        let reported = length.parse::<u64>().unwrap_or(0);
        if reported == 0 || reported != file.size() {
            return Err(UploadError::VerificationFailed {
                url,
                reason: VerifyFailure::SizeMismatch {
                    expected: file.size(),
                    actual: reported,
                },
            });
        }

        if mime.is_empty() || mime != file.mime_type() {
            return Err(UploadError::VerificationFailed {
                url,
                reason: VerifyFailure::TypeMismatch {
                    expected: file.mime_type().to_string(),
                    actual: mime.clone(),
                },
            });
        }

        tracing::debug!(url = %url, "upload verified");
        Ok(())
    }

    fn destination_url(&self) -> Result<String, UploadError> {
        let dir = self
            .upload_url
            .as_deref()
            .ok_or(UploadError::DestinationNotConfigured)?;
        let name = self.filename.as_deref().ok_or(UploadError::NoFileAttached)?;
        Ok(format!("{}/{}", dir, name))
    }
}
