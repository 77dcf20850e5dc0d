//! Property reads and writes through proxies

use super::fixtures::Settings;
use super::harness::{engine_with, expect_f64, expect_null, expect_script_error, expect_string, run};

// ============================================================================
// Reads
// ============================================================================

#[test]
fn test_read_properties() {
    let engine = engine_with(Settings::new("A", 1));
    expect_string(&engine, "obj.Name", "A");
    expect_f64(&engine, "obj.Value", 1.0);
}

#[test]
fn test_read_unknown_member_is_nil() {
    let engine = engine_with(Settings::new("A", 1));
    expect_null(&engine, "obj.Missing");
    expect_null(&engine, "obj[42]");
}

#[test]
fn test_tostring_uses_host_display() {
    let engine = engine_with(Settings::new("A", 1));
    expect_string(&engine, "tostring(obj)", "Settings(A)");
}

// ============================================================================
// Writes
// ============================================================================

#[test]
fn test_increment_property() {
    let settings = Settings::new("A", 1);
    let engine = engine_with(settings.clone());
    run(&engine, "obj.Value = obj.Value + 1");
    assert_eq!(*settings.value.lock(), 2);
}

#[test]
fn test_write_unknown_or_readonly_is_silent() {
    let settings = Settings::new("A", 1);
    let engine = engine_with(settings.clone());
    run(&engine, "obj.Missing = 5\nobj.LogCount = 9");
    expect_null(&engine, "obj.Missing");
    expect_f64(&engine, "obj.LogCount", 0.0);
}

#[test]
fn test_write_wrong_kind_raises() {
    let settings = Settings::new("A", 1);
    let engine = engine_with(settings.clone());
    expect_script_error(&engine, "obj.Value = 'two'", "cannot assign to 'Value'");
    expect_script_error(&engine, "obj.Value = 2.5", "cannot assign to 'Value'");
    assert_eq!(*settings.value.lock(), 1);
}

#[test]
fn test_write_failure_is_catchable() {
    let engine = engine_with(Settings::new("A", 1));
    expect_string(
        &engine,
        "(function() local ok = pcall(function() obj.Value = {} end) return tostring(ok) end)()",
        "false",
    );
}
