//! Settings-path command: print where settings are read from by default.

use anyhow::Result;

use upsend_core::settings;

pub fn run_settings_path() -> Result<()> {
    println!("{}", settings::default_settings_path()?.display());
    Ok(())
}
