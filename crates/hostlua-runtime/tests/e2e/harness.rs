//! Test harness for end-to-end script execution
//!
//! Provides utilities for creating engines around fixtures and checking
//! script results and errors.

use hostlua_runtime::{init_tracing, Engine, HostRef, HostValue, RuntimeError};

/// Create an engine with `obj` registered as the global `obj`
pub fn engine_with(obj: HostRef) -> Engine {
    init_tracing();
    let engine = Engine::new().expect("engine creation failed");
    engine
        .register_global("obj", obj)
        .expect("global registration failed");
    engine
}

/// Run a script, panicking with the script text on failure
pub fn run(engine: &Engine, source: &str) {
    if let Err(e) = engine.run(source) {
        panic!("Execution failed: {}\nSource:\n{}", e, source);
    }
}

/// Evaluate an expression, expecting a specific value
pub fn expect_value(engine: &Engine, expr: &str, expected: HostValue) {
    match engine.eval(expr) {
        Ok(actual) => assert_eq!(actual, expected, "Wrong result for:\n{}", expr),
        Err(e) => panic!("Evaluation failed: {}\nSource:\n{}", e, expr),
    }
}

/// Evaluate an expression, expecting a number
pub fn expect_f64(engine: &Engine, expr: &str, expected: f64) {
    match engine.eval(expr) {
        Ok(value) => {
            let actual = value
                .as_f64()
                .unwrap_or_else(|| panic!("Expected number, got {:?}\nSource:\n{}", value, expr));
            assert!(
                (actual - expected).abs() < 1e-10,
                "Expected {}, got {} for:\n{}",
                expected, actual, expr
            );
        }
        Err(e) => panic!("Evaluation failed: {}\nSource:\n{}", e, expr),
    }
}

/// Evaluate an expression, expecting a string
pub fn expect_string(engine: &Engine, expr: &str, expected: &str) {
    expect_value(engine, expr, HostValue::String(expected.to_string()));
}

/// Evaluate an expression, expecting nil
pub fn expect_null(engine: &Engine, expr: &str) {
    match engine.eval(expr) {
        Ok(value) => assert!(value.is_null(), "Expected null, got {:?}\nSource:\n{}", value, expr),
        Err(e) => panic!("Evaluation failed: {}\nSource:\n{}", e, expr),
    }
}

/// Run a script, expecting a script error whose message contains `pattern`
pub fn expect_script_error(engine: &Engine, source: &str, pattern: &str) {
    match engine.run(source) {
        Ok(()) => panic!(
            "Expected script error containing '{}', but the script succeeded\nSource:\n{}",
            pattern, source
        ),
        Err(RuntimeError::Script(msg)) => assert!(
            msg.contains(pattern),
            "Expected script error containing '{}', got: {}\nSource:\n{}",
            pattern, msg, source
        ),
        Err(e) => panic!("Expected script error, got: {}\nSource:\n{}", e, source),
    }
}
