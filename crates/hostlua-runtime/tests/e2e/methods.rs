//! Method calls, overloads and errors

use super::fixtures::Settings;
use super::harness::{
    engine_with, expect_f64, expect_script_error, expect_string, expect_value, run,
};
use hostlua_runtime::HostValue;
use hostlua_sdk::same_object;

// ============================================================================
// Root object scenario
// ============================================================================

#[test]
fn test_update_and_log_once() {
    let settings = Settings::new("A", 1);
    let engine = engine_with(settings.clone());

    run(&engine, "obj.Value = obj.Value + 1\nobj:Log()");

    assert_eq!(*settings.value.lock(), 2);
    let log = settings.log.lock();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0], "A=2");
}

// ============================================================================
// Overloads
// ============================================================================

#[test]
fn test_overload_selected_by_arity() {
    let settings = Settings::new("A", 1);
    let engine = engine_with(settings.clone());
    run(&engine, "obj:Log()\nobj:Log('custom')");
    assert_eq!(*settings.log.lock(), vec!["A=1".to_string(), "custom".to_string()]);
}

#[test]
fn test_no_overload_for_arity() {
    let engine = engine_with(Settings::new("A", 1));
    expect_script_error(&engine, "obj:Log(1, 2, 3)", "no overload of 'Log' accepts 3 argument(s)");
}

#[test]
fn test_argument_kind_must_match() {
    let engine = engine_with(Settings::new("A", 1));
    expect_script_error(&engine, "obj:Greet(5)", "no overload of 'Greet' accepts 1 argument(s)");
    expect_string(&engine, "obj:Greet('B')", "A greets B");
}

#[test]
fn test_integer_argument_widens_to_float() {
    let engine = engine_with(Settings::new("A", 4));
    expect_f64(&engine, "obj:Scale(2)", 8.0);
    expect_f64(&engine, "obj:Scale(0.5)", 2.0);
}

// ============================================================================
// Objects crossing the boundary
// ============================================================================

#[test]
fn test_returned_objects_are_proxies() {
    let engine = engine_with(Settings::new("A", 1));
    expect_string(&engine, "obj:Child('kid').Name", "kid");
    expect_string(&engine, "obj:Adopt(obj:Child('kid'))", "kid");
    expect_string(&engine, "obj:Adopt(nil)", "nobody");
}

#[test]
fn test_eval_returns_original_object() {
    let settings = Settings::new("A", 1);
    let engine = engine_with(settings.clone());
    let value = engine.eval("obj").unwrap();
    let obj = value.as_object().expect("expected an object");
    let root: hostlua_runtime::HostRef = settings;
    assert!(same_object(obj, &root));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_method_is_an_error() {
    let engine = engine_with(Settings::new("A", 1));
    expect_script_error(&engine, "obj:Missing()", "attempt to call a nil value");
}

#[test]
fn test_invocation_error_keeps_message() {
    let engine = engine_with(Settings::new("A", 1));
    expect_script_error(&engine, "obj:Fail()", "disk full");
}

#[test]
fn test_pcall_observes_host_errors() {
    let engine = engine_with(Settings::new("A", 1));
    expect_value(&engine, "(pcall(obj.Fail, obj))", HostValue::Bool(false));
    let message = engine
        .eval("tostring(select(2, pcall(obj.Fail, obj)))")
        .unwrap();
    assert!(message.as_str().is_some_and(|m| m.contains("disk full")), "{message:?}");
}

#[test]
fn test_released_handle_is_invalid_object() {
    let engine = engine_with(Settings::new("A", 1));
    let handle = engine.register_global("other", Settings::new("B", 2)).unwrap();
    run(&engine, "log = other.Log");

    assert!(engine.registry().release(handle));
    expect_string(&engine, "tostring(other)", "invalid object");
    expect_script_error(&engine, "log(other)", "invalid object reference");
}
