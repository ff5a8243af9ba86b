use clap::Parser;
use std::path::PathBuf;

use super::{Cli, CliCommand};

#[test]
fn parses_send_with_defaults() {
    let cli = Cli::try_parse_from(["upsend", "send", "report.pdf"]).unwrap();
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
        } => {
            assert_eq!(file, PathBuf::from("report.pdf"));
            assert!(settings.is_none());
            assert_eq!(dir_setting, "destination_dir");
            assert!(original_name.is_none());
            assert!(prefix.is_none());
            assert!(!sanitize);
            assert!(!no_validate);
            assert!(!no_verify);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parses_send_flags() {
    let cli = Cli::try_parse_from([
        "upsend",
        "send",
        "a.txt",
        "--settings",
        "/tmp/settings.toml",
        "--dir-setting",
        "cdn_dir",
        "--original-name",
        "original_a.txt",
        "--prefix",
        "user42_",
        "--no-verify",
    ])
    .unwrap();
    match cli.command {
        CliCommand::Send {
            settings,
            dir_setting,
            original_name,
            prefix,
            no_verify,
            ..
        } => {
            assert_eq!(settings, Some(PathBuf::from("/tmp/settings.toml")));
            assert_eq!(dir_setting, "cdn_dir");
            assert_eq!(original_name.as_deref(), Some("original_a.txt"));
            assert_eq!(prefix.as_deref(), Some("user42_"));
            assert!(no_verify);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parses_probe_and_settings_path() {
    let cli = Cli::try_parse_from(["upsend", "probe", "https://cdn.example.com/a.txt"]).unwrap();
    assert!(matches!(cli.command, CliCommand::Probe { .. }));

    let cli = Cli::try_parse_from(["upsend", "settings-path"]).unwrap();
    assert!(matches!(cli.command, CliCommand::SettingsPath));
}

#[test]
fn send_requires_a_file_argument() {
    assert!(Cli::try_parse_from(["upsend", "send"]).is_err());
}
