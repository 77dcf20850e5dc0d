//! Loading scripts from files

use super::fixtures::Settings;
use super::harness::engine_with;
use hostlua_runtime::RuntimeError;
use std::io::Write;

#[test]
fn test_run_file() {
    let settings = Settings::new("A", 1);
    let engine = engine_with(settings.clone());

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "obj.Value = obj.Value + 41").unwrap();
    writeln!(file, "obj:Log('from file')").unwrap();

    engine.run_file(file.path()).unwrap();
    assert_eq!(*settings.value.lock(), 42);
    assert_eq!(settings.log.lock().as_slice(), ["from file".to_string()]);
}

#[test]
fn test_file_errors_name_the_file() {
    let engine = engine_with(Settings::new("A", 1));
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.lua");
    std::fs::write(&path, "obj.Value = = 1\n").unwrap();

    match engine.run_file(&path) {
        Err(RuntimeError::Script(msg)) => assert!(msg.contains("broken.lua"), "{msg}"),
        other => panic!("expected script error, got {other:?}"),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let engine = engine_with(Settings::new("A", 1));
    let dir = tempfile::tempdir().unwrap();
    let result = engine.run_file(dir.path().join("absent.lua"));
    assert!(matches!(result, Err(RuntimeError::Io(_))));
}
