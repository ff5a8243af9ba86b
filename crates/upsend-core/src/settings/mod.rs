//! Settings resolution: an in-memory map or a delegated provider.
//!
//! A session is constructed with exactly one active backend. Both backends
//! support suppressed lookups, so optional settings (policy allow-list,
//! size ceiling) can be absent without failing the attach.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::UploadError;

/// A resolved setting value. `allowed_upload_types` may be a delimited
/// string or a list; `allowed_upload_size` may be an integer or an
/// integer-coercible string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Int(u64),
    Str(String),
    List(Vec<String>),
}

impl SettingValue {
    /// The value as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Lenient integer coercion: integers pass through, strings are parsed,
    /// everything else (including unparseable strings) coerces to 0.
    pub fn coerce_u64(&self) -> u64 {
        match self {
            SettingValue::Int(n) => *n,
            SettingValue::Str(s) => s.trim().parse().unwrap_or(0),
            SettingValue::List(_) => 0,
        }
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        SettingValue::Str(s.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(s: String) -> Self {
        SettingValue::Str(s)
    }
}

impl From<u64> for SettingValue {
    fn from(n: u64) -> Self {
        SettingValue::Int(n)
    }
}

impl From<Vec<String>> for SettingValue {
    fn from(list: Vec<String>) -> Self {
        SettingValue::List(list)
    }
}

impl From<Vec<&str>> for SettingValue {
    fn from(list: Vec<&str>) -> Self {
        SettingValue::List(list.into_iter().map(str::to_string).collect())
    }
}

/// Delegated settings backend: an external key-value lookup service.
///
/// A miss should surface as [`UploadError::SettingNotFound`] unless
/// `suppress_errors` is set, in which case it is `Ok(None)` — callers use
/// the suppressed form for optional settings.
pub trait SettingsProvider {
    fn get(&self, name: &str, suppress_errors: bool)
        -> Result<Option<SettingValue>, UploadError>;
}

/// In-memory settings backend, loadable from a TOML table of strings,
/// integers, and string arrays.
#[derive(Debug, Clone, Default)]
pub struct SettingsMap {
    values: HashMap<String, SettingValue>,
}

impl SettingsMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<SettingValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&SettingValue> {
        self.values.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let values: HashMap<String, SettingValue> =
            toml::from_str(raw).context("failed to parse settings TOML")?;
        Ok(Self { values })
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        Self::from_toml_str(&raw)
    }
}

/// The session's settings source: exactly one backend, chosen at
/// construction. A delegated provider wins if given; otherwise a non-empty
/// map is required.
pub enum SettingsSource {
    Provider(Box<dyn SettingsProvider>),
    Map(SettingsMap),
}

impl fmt::Debug for SettingsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsSource::Provider(_) => {
                f.debug_tuple("Provider").field(&"dyn SettingsProvider").finish()
            }
            SettingsSource::Map(map) => f.debug_tuple("Map").field(map).finish(),
        }
    }
}

impl SettingsSource {
    /// Selects the active backend. Fails with [`UploadError::Configuration`]
    /// when no provider is given and the map is empty.
    pub fn new(
        provider: Option<Box<dyn SettingsProvider>>,
        map: SettingsMap,
    ) -> Result<Self, UploadError> {
        if let Some(provider) = provider {
            return Ok(SettingsSource::Provider(provider));
        }
        if map.is_empty() {
            return Err(UploadError::Configuration);
        }
        Ok(SettingsSource::Map(map))
    }

    pub fn from_map(map: SettingsMap) -> Result<Self, UploadError> {
        Self::new(None, map)
    }

    pub fn from_provider(provider: Box<dyn SettingsProvider>) -> Self {
        SettingsSource::Provider(provider)
    }

    /// Resolves `name`. With `suppress_errors`, a miss returns `None`
    /// instead of failing. The delegated provider receives the flag and is
    /// otherwise deferred to entirely, including its error behavior.
    pub fn get(
        &self,
        name: &str,
        suppress_errors: bool,
    ) -> Result<Option<SettingValue>, UploadError> {
        match self {
            SettingsSource::Provider(provider) => provider.get(name, suppress_errors),
            SettingsSource::Map(map) => match map.get(name) {
                Some(value) => Ok(Some(value.clone())),
                None if suppress_errors => Ok(None),
                None => Err(UploadError::SettingNotFound(name.to_string())),
            },
        }
    }
}

/// Default settings file location: `~/.config/upsend/settings.toml`.
pub fn default_settings_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("upsend")?;
    Ok(xdg_dirs.place_config_file("settings.toml")?)
}
