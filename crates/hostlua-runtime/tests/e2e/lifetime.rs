//! Proxy lifetime: finalization, teardown and shared registries

use super::fixtures::Settings;
use super::harness::{engine_with, run};
use hostlua_runtime::{Engine, EngineOptions, HandleRegistry, HostRef};
use std::sync::Arc;

// ============================================================================
// Finalization
// ============================================================================

#[test]
fn test_unreachable_proxies_are_released() {
    let engine = engine_with(Settings::new("A", 1));
    assert_eq!(engine.live_handles(), 1);

    run(&engine, "for i = 1, 10 do local c = obj:Child('c' .. i) end");
    assert_eq!(engine.live_handles(), 11);

    engine.collect_garbage().unwrap();
    engine.collect_garbage().unwrap();
    assert_eq!(engine.live_handles(), 1);
}

#[test]
fn test_registry_entry_keeps_host_object_alive() {
    let settings = Settings::new("A", 1);
    let engine = engine_with(settings.clone());
    assert_eq!(Arc::strong_count(&settings), 2);

    run(&engine, "obj = nil");
    engine.collect_garbage().unwrap();
    engine.collect_garbage().unwrap();
    assert_eq!(engine.live_handles(), 0);
    assert_eq!(Arc::strong_count(&settings), 1);
}

#[test]
fn test_same_object_registered_twice() {
    let settings = Settings::new("A", 1);
    let engine = engine_with(settings.clone());
    let second = engine.register_global("again", settings.clone()).unwrap();
    assert_eq!(engine.live_handles(), 2);

    run(&engine, "again.Value = 5");
    assert_eq!(*settings.value.lock(), 5);

    engine.registry().release(second);
    assert_eq!(engine.live_handles(), 1);
    run(&engine, "obj.Value = 6");
    assert_eq!(*settings.value.lock(), 6);
}

// ============================================================================
// Teardown
// ============================================================================

#[test]
fn test_drop_clears_registry() {
    let settings = Settings::new("A", 1);
    let registry = {
        let engine = engine_with(settings.clone());
        run(&engine, "keep = obj:Child('kept')");
        Arc::clone(engine.registry())
    };
    assert!(registry.is_empty());
    assert_eq!(Arc::strong_count(&settings), 1);
}

#[test]
fn test_shared_registry_survives_one_engine() {
    let registry = Arc::new(HandleRegistry::new());
    let options = EngineOptions::default();
    let first = Engine::with_registry(options.clone(), Arc::clone(&registry)).unwrap();
    let second = Engine::with_registry(options, Arc::clone(&registry)).unwrap();

    let outside = registry.register(Settings::new("host", 0));
    let a = first.register_global("obj", Settings::new("A", 1)).unwrap();
    let b = second.register_global("obj", Settings::new("B", 2)).unwrap();
    assert_ne!(a, b);
    assert_eq!(registry.len(), 3);

    drop(first);
    assert_eq!(registry.len(), 2);
    assert!(!registry.contains(a));
    assert!(registry.contains(b));
    run(&second, "obj.Value = obj.Value * 10");
    assert_eq!(second.eval("obj.Value").unwrap().as_f64(), Some(20.0));

    drop(second);
    assert_eq!(registry.len(), 1);
    assert!(registry.contains(outside));
}

#[test]
fn test_owned_registry_kept_when_clear_disabled() {
    let options = EngineOptions {
        clear_registry_on_drop: false,
        ..Default::default()
    };
    let engine = Engine::with_options(options).unwrap();
    let registry = Arc::clone(engine.registry());
    let outside = registry.register(Settings::new("host", 0));
    engine.register_global("obj", Settings::new("A", 1)).unwrap();

    drop(engine);
    assert_eq!(registry.len(), 1);
    assert!(registry.contains(outside));
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_host_threads_register_while_scripts_run() {
    let engine = engine_with(Settings::new("A", 0));
    let registry = Arc::clone(engine.registry());

    let handles = std::thread::scope(|s| {
        let workers: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                s.spawn(move || {
                    (0..1250)
                        .map(|_| {
                            let obj: HostRef = Settings::new("t", 0);
                            registry.register(obj)
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for _ in 0..100 {
            run(&engine, "obj.Value = obj.Value + 1");
        }

        workers
            .into_iter()
            .flat_map(|w| w.join().unwrap())
            .collect::<Vec<_>>()
    });

    let mut distinct = handles.clone();
    distinct.sort();
    distinct.dedup();
    assert_eq!(distinct.len(), 10_000);
    assert_eq!(engine.live_handles(), 10_001);
    assert_eq!(engine.eval("obj.Value").unwrap().as_f64(), Some(100.0));
}
