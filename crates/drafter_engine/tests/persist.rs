use std::fs;

use drafter_engine::{ensure_output_dir, AtomicFileWriter};
use tempfile::TempDir;

#[test]
fn output_dir_is_created_on_demand() {
    let temp = TempDir::new().unwrap();
    let nested = temp.path().join("exports").join("diagrams");

    ensure_output_dir(&nested).unwrap();

    assert!(nested.is_dir());
    // A second call over the existing directory is fine.
    ensure_output_dir(&nested).unwrap();
}

#[test]
fn output_dir_rejects_a_file_path() {
    let temp = TempDir::new().unwrap();
    let occupied = temp.path().join("occupied");
    fs::write(&occupied, "x").unwrap();

    let err = ensure_output_dir(&occupied).unwrap_err();
    assert!(err.to_string().contains("not a directory"));
}

#[test]
fn write_replaces_the_previous_bytes() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("architecture-diagram.png", b"v1").unwrap();
    let second = writer.write("architecture-diagram.png", b"v2").unwrap();

    assert_eq!(first, second);
    assert_eq!(first.file_name().unwrap(), "architecture-diagram.png");
    assert_eq!(fs::read(&second).unwrap(), b"v2");
}

#[test]
fn write_leaves_no_stray_files() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    writer.write("architecture-diagram.svg", b"<svg/>").unwrap();

    let names: Vec<String> = fs::read_dir(temp.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["architecture-diagram.svg".to_string()]);
}

#[test]
fn failed_write_leaves_no_target_file() {
    let temp = TempDir::new().unwrap();
    let blocked = temp.path().join("blocked");
    fs::write(&blocked, "x").unwrap();

    let writer = AtomicFileWriter::new(blocked.clone());

    assert!(writer.write("architecture-diagram.png", b"data").is_err());
    assert!(!blocked.with_file_name("architecture-diagram.png").exists());
}
