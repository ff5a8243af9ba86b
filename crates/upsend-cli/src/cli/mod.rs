//! CLI for upsend.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_probe, run_send, run_settings_path};

/// Top-level CLI for upsend.
#[derive(Debug, Parser)]
#[command(name = "upsend")]
#[command(about = "upsend: policy-checked upload with header-based verification", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Upload a file to the configured destination and verify it landed.
    Send {
        /// Path to the file to upload.
        file: PathBuf,

        /// Settings TOML file (default: ~/.config/upsend/settings.toml).
        #[arg(long, value_name = "PATH")]
        settings: Option<PathBuf>,

        /// Name of the setting holding the destination base URL.
        #[arg(long, default_value = "destination_dir", value_name = "NAME")]
        dir_setting: String,

        /// Client-provided original filename to upload under (overrides the
        /// on-disk name).
        #[arg(long, value_name = "NAME")]
        original_name: Option<String>,

        /// Prefix the target filename (wins over --sanitize).
        #[arg(long, value_name = "PREFIX")]
        prefix: Option<String>,

        /// Sanitize the target filename for Linux/URL safety.
        #[arg(long)]
        sanitize: bool,

        /// Skip the MIME/size policy checks.
        #[arg(long)]
        no_validate: bool,

        /// Skip the post-transfer header verification.
        #[arg(long)]
        no_verify: bool,
    },

    /// Probe a URL's headers (HEAD request; local paths are stat'ed).
    Probe {
        /// URL or local path to probe.
        url: String,
    },

    /// Print the default settings file path.
    SettingsPath,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Send {
                file,
                settings,
                dir_setting,
                original_name,
                prefix,
                sanitize,
                no_validate,
                no_verify,
            } => run_send(commands::SendArgs {
                file,
                settings,
                dir_setting,
                original_name,
                prefix,
                sanitize,
                no_validate,
                no_verify,
            }),
            CliCommand::Probe { url } => run_probe(&url),
            CliCommand::SettingsPath => run_settings_path(),
        }
    }
}

#[cfg(test)]
mod tests;
