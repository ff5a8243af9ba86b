//! Policy checks applied when a file is attached: MIME allow-list, then
//! size ceiling. Both settings are optional; an absent or empty setting
//! means no restriction.

use crate::error::UploadError;
use crate::settings::{SettingValue, SettingsSource};
use crate::source_file::SourceFile;

/// Setting holding the MIME allow-list: a comma-delimited string or a list.
pub const ALLOWED_TYPES_SETTING: &str = "allowed_upload_types";
/// Setting holding the size ceiling in bytes (integer-coercible).
pub const ALLOWED_SIZE_SETTING: &str = "allowed_upload_size";

/// Runs both policy checks; the first violation short-circuits.
pub fn validate(file: &SourceFile, settings: &SettingsSource) -> Result<(), UploadError> {
    check_mime_type(file, settings)?;
    check_size(file, settings)
}

/// Fails with [`UploadError::DisallowedFileType`] when an allow-list is
/// configured and the file's MIME type is not a member. The string form is
/// split on commas after stripping internal spaces.
pub fn check_mime_type(file: &SourceFile, settings: &SettingsSource) -> Result<(), UploadError> {
    let Some(value) = settings.get(ALLOWED_TYPES_SETTING, true)? else {
        return Ok(());
    };
    let allowed: Vec<String> = match value {
        SettingValue::Str(raw) if !raw.is_empty() => raw
            .replace(' ', "")
            .split(',')
            .map(str::to_string)
            .collect(),
        SettingValue::List(list) => list,
        // Empty string or a non-list, non-string value: no restriction.
        _ => return Ok(()),
    };
    if !allowed.iter().any(|mime| mime == file.mime_type()) {
        tracing::debug!(mime = file.mime_type(), "file type rejected by allow-list");
        return Err(UploadError::DisallowedFileType(file.mime_type().to_string()));
    }
    Ok(())
}

/// Fails with [`UploadError::FileTooLarge`] when a non-zero ceiling is
/// configured and the file is bigger. Unparseable ceilings coerce to 0,
/// which disables the check.
pub fn check_size(file: &SourceFile, settings: &SettingsSource) -> Result<(), UploadError> {
    let Some(value) = settings.get(ALLOWED_SIZE_SETTING, true)? else {
        return Ok(());
    };
    let limit = value.coerce_u64();
    if limit == 0 {
        return Ok(());
    }
    if file.size() > limit {
        tracing::debug!(size = file.size(), limit, "file rejected by size ceiling");
        return Err(UploadError::FileTooLarge {
            limit,
            actual: file.size(),
        });
    }
    Ok(())
}
