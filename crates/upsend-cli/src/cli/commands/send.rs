//! Send command: load settings, attach the file, upload, verify.

use anyhow::{Context, Result};
use std::path::PathBuf;

use upsend_core::head_probe::FsHeaderInspector;
use upsend_core::name_changer::{NameChanger, PrefixNameChanger, SanitizingNameChanger};
use upsend_core::session::UploadSession;
use upsend_core::settings::{self, SettingValue, SettingsMap, SettingsSource};
use upsend_core::source_file::SourceFile;
use upsend_core::transfer::{is_remote_url, transport_for_url};

pub struct SendArgs {
    pub file: PathBuf,
    pub settings: Option<PathBuf>,
    pub dir_setting: String,
    pub original_name: Option<String>,
    pub prefix: Option<String>,
    pub sanitize: bool,
    pub no_validate: bool,
    pub no_verify: bool,
}

pub fn run_send(args: SendArgs) -> Result<()> {
    let settings_path = match args.settings {
        Some(path) => path,
        None => settings::default_settings_path()?,
    };
    tracing::debug!(path = %settings_path.display(), "loading settings");
    let map = SettingsMap::from_toml_file(&settings_path)?;

    // Decide the inspector from the destination before the map moves into
    // the session; a local destination gets the filesystem inspector.
    let remote = map
        .get(&args.dir_setting)
        .and_then(SettingValue::as_str)
        .map(is_remote_url)
        .unwrap_or(true);

    let source = SettingsSource::from_map(map)?;
    let mut session = if remote {
        UploadSession::new(source)
    } else {
        UploadSession::new(source).with_inspector(Box::new(FsHeaderInspector::new()))
    };

    session.set_upload_dir(&args.dir_setting)?;
    let dir = session
        .upload_dir()
        .map(str::to_string)
        .context("destination not configured")?;
    let transport = transport_for_url(&dir);

    let file = match &args.original_name {
        Some(name) => SourceFile::uploaded(&args.file, name)?,
        None => SourceFile::open(&args.file)?,
    };

    let changer: Option<Box<dyn NameChanger>> = if let Some(prefix) = args.prefix {
        Some(Box::new(PrefixNameChanger::new(prefix)))
    } else if args.sanitize {
        Some(Box::new(SanitizingNameChanger::new()))
    } else {
        None
    };

    session
        .set_file(file, changer.as_deref(), !args.no_validate)?
        .upload(transport.as_ref())?;

    let target = session.target_filename().unwrap_or_default().to_string();
    if args.no_verify {
        println!("uploaded {}/{} (verification skipped)", dir, target);
        return Ok(());
    }

    session.check_if_successful()?;
    println!("uploaded and verified {}/{}", dir, target);
    Ok(())
}
