//! End-to-end upload flow against a temp-dir destination: attach, local
//! copy, header-based verification.

use std::fs;

use upsend_core::error::{UploadError, VerifyFailure};
use upsend_core::head_probe::FsHeaderInspector;
use upsend_core::name_changer::PrefixNameChanger;
use upsend_core::session::UploadSession;
use upsend_core::settings::{SettingsMap, SettingsSource};
use upsend_core::source_file::SourceFile;
use upsend_core::transfer::{transport_for_url, LocalCopyTransport};

struct Fixture {
    _source_dir: tempfile::TempDir,
    dest_dir: tempfile::TempDir,
    file: SourceFile,
    session: UploadSession,
}

fn fixture() -> Fixture {
    let source_dir = tempfile::tempdir().unwrap();
    let dest_dir = tempfile::tempdir().unwrap();

    let src = source_dir.path().join("test.txt");
    fs::write(&src, b"Hello world\n").unwrap();
    let file = SourceFile::open(&src).unwrap();

    let mut map = SettingsMap::new();
    map.insert(
        "destination_dir",
        dest_dir.path().to_string_lossy().into_owned(),
    );
    map.insert("allowed_upload_size", "1000");
    map.insert("allowed_upload_types", vec!["video/mp4", "text/plain"]);

    let session = UploadSession::new(SettingsSource::from_map(map).unwrap())
        .with_inspector(Box::new(FsHeaderInspector::new()));

    Fixture {
        _source_dir: source_dir,
        dest_dir,
        file,
        session,
    }
}

#[test]
fn round_trip_upload_and_verify() {
    let mut fx = fixture();
    let transport = LocalCopyTransport::new();

    fx.session
        .set_upload_dir("destination_dir")
        .unwrap()
        .set_file(fx.file, None, true)
        .unwrap()
        .upload(&transport)
        .unwrap()
        .check_if_successful()
        .unwrap();

    let landed = fx.dest_dir.path().join("test.txt");
    assert_eq!(fs::read(&landed).unwrap(), b"Hello world\n");
}

#[test]
fn name_changer_moves_the_destination() {
    let mut fx = fixture();
    let transport = LocalCopyTransport::new();
    let changer = PrefixNameChanger::new("changed_");

    fx.session.set_upload_dir("destination_dir").unwrap();
    fx.session
        .set_file(fx.file, Some(&changer), true)
        .unwrap()
        .upload(&transport)
        .unwrap()
        .check_if_successful()
        .unwrap();

    assert!(fx.dest_dir.path().join("changed_test.txt").is_file());
    assert!(!fx.dest_dir.path().join("test.txt").exists());
}

#[test]
fn verification_fails_before_any_transfer_happened() {
    let mut fx = fixture();

    fx.session.set_upload_dir("destination_dir").unwrap();
    fx.session.set_file(fx.file, None, true).unwrap();

    // No upload: the destination file does not exist yet.
    let err = fx.session.check_if_successful().unwrap_err();
    match err {
        UploadError::VerificationFailed { reason, .. } => {
            assert_eq!(reason, VerifyFailure::NotFound);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn verification_catches_a_corrupted_destination() {
    let mut fx = fixture();
    let transport = LocalCopyTransport::new();

    fx.session.set_upload_dir("destination_dir").unwrap();
    fx.session
        .set_file(fx.file, None, true)
        .unwrap()
        .upload(&transport)
        .unwrap();

    // Truncate the destination behind the session's back.
    fs::write(fx.dest_dir.path().join("test.txt"), b"Hello").unwrap();

    let err = fx.session.check_if_successful().unwrap_err();
    match err {
        UploadError::VerificationFailed { reason, .. } => {
            assert_eq!(
                reason,
                VerifyFailure::SizeMismatch {
                    expected: 12,
                    actual: 5
                }
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn transport_is_picked_from_the_destination_scheme() {
    let fx = fixture();
    // A plain path routes to local copy, which must succeed end to end.
    let dest = fx.dest_dir.path().to_string_lossy().into_owned();
    let transport = transport_for_url(&dest);

    let mut session = fx.session;
    session.set_upload_dir("destination_dir").unwrap();
    session
        .set_file(fx.file, None, true)
        .unwrap()
        .upload(transport.as_ref())
        .unwrap()
        .check_if_successful()
        .unwrap();
}
