use std::fs;
use std::path::Path;

use tempfile::tempdir;

use edscout_lib::journal::{cargo_manifest, current_location, main_cargo};
use edscout_lib::Error;

fn write_journal(dir: &Path, name: &str, lines: &[&str]) {
    fs::write(dir.join(name), lines.join("\n")).expect("write journal file");
}

#[test]
fn latest_location_event_wins() {
    let dir = tempdir().expect("create temp dir");
    write_journal(
        dir.path(),
        "Journal.2024-06-01T120000.01.log",
        &[
            r#"{"timestamp":"2024-06-01T12:00:00Z","event":"Fileheader","part":1}"#,
            r#"{"timestamp":"2024-06-01T12:01:00Z","event":"Location","StarSystem":"Yoru","StarPos":[97.875,-86.90625,64.125]}"#,
            r#"{"timestamp":"2024-06-01T12:30:00Z","event":"FSDJump","StarSystem":"HIP 21991","StarPos":[-50.0,12.5,3.0]}"#,
            r#"{"timestamp":"2024-06-01T12:31:00Z","event":"Music","MusicTrack":"NoTrack"}"#,
        ],
    );

    let location = current_location(dir.path()).expect("location found");
    assert_eq!(location.system, "HIP 21991");
    let coords = location.coords.expect("coords present");
    assert!((coords.x - -50.0).abs() < 1e-9);
    assert!(location.timestamp.is_some());
}

#[test]
fn torn_final_line_is_skipped() {
    let dir = tempdir().expect("create temp dir");
    write_journal(
        dir.path(),
        "Journal.2024-06-01T120000.01.log",
        &[
            r#"{"timestamp":"2024-06-01T12:01:00Z","event":"FSDJump","StarSystem":"Yoru","StarPos":[97.875,-86.90625,64.125]}"#,
            r#"{"timestamp":"2024-06-01T12:02:00Z","event":"FSDJump","StarSy"#,
        ],
    );

    let location = current_location(dir.path()).expect("location found");
    assert_eq!(location.system, "Yoru");
}

#[test]
fn newest_journal_file_is_read() {
    let dir = tempdir().expect("create temp dir");
    write_journal(
        dir.path(),
        "Journal.2024-05-01T080000.01.log",
        &[r#"{"timestamp":"2024-05-01T08:00:00Z","event":"Location","StarSystem":"Old Place"}"#],
    );
    // Give the filesystem a distinct modification time for the second file.
    std::thread::sleep(std::time::Duration::from_millis(50));
    write_journal(
        dir.path(),
        "Journal.2024-06-01T080000.01.log",
        &[r#"{"timestamp":"2024-06-01T08:00:00Z","event":"Location","StarSystem":"New Place"}"#],
    );

    let location = current_location(dir.path()).expect("location found");
    assert_eq!(location.system, "New Place");
}

#[test]
fn missing_directory_is_fatal() {
    let err = current_location(Path::new("/definitely/not/a/journal")).unwrap_err();
    assert!(matches!(err, Error::JournalDirNotFound { .. }));
}

#[test]
fn journal_without_location_event_is_fatal() {
    let dir = tempdir().expect("create temp dir");
    write_journal(
        dir.path(),
        "Journal.2024-06-01T120000.01.log",
        &[r#"{"timestamp":"2024-06-01T12:00:00Z","event":"Fileheader","part":1}"#],
    );

    let err = current_location(dir.path()).unwrap_err();
    assert!(matches!(err, Error::LocationNotFound { .. }));
}

#[test]
fn empty_directory_reports_no_journal_files() {
    let dir = tempdir().expect("create temp dir");
    let err = current_location(dir.path()).unwrap_err();
    assert!(matches!(err, Error::NoJournalFiles { .. }));
}

#[test]
fn main_cargo_ignores_limpets() {
    let dir = tempdir().expect("create temp dir");
    fs::write(
        dir.path().join("Cargo.json"),
        r#"{"Inventory":[
            {"Name":"drones","Name_Localised":"Limpet","Count":64},
            {"Name":"lowtemperaturediamond","Name_Localised":"Low Temperature Diamonds","Count":48},
            {"Name":"painite","Count":12}
        ]}"#,
    )
    .expect("write cargo file");

    let main = main_cargo(dir.path()).expect("cargo reads").expect("cargo present");
    assert_eq!(main.name, "Low Temperature Diamonds");
    assert_eq!(main.count, 48);

    let manifest = cargo_manifest(dir.path()).expect("cargo reads");
    assert_eq!(manifest.len(), 2);
    assert!(manifest.iter().all(|item| item.name != "Limpet"));
}

#[test]
fn empty_hold_yields_none() {
    let dir = tempdir().expect("create temp dir");
    fs::write(
        dir.path().join("Cargo.json"),
        r#"{"Inventory":[{"Name":"drones","Name_Localised":"Limpet","Count":64}]}"#,
    )
    .expect("write cargo file");

    assert!(main_cargo(dir.path()).expect("cargo reads").is_none());
}

#[test]
fn missing_cargo_file_is_reported() {
    let dir = tempdir().expect("create temp dir");
    let err = main_cargo(dir.path()).unwrap_err();
    assert!(matches!(err, Error::CargoFileNotFound { .. }));
}
