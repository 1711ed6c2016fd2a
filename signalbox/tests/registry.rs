//! Registry tests: named dispatchers, the default dispatcher and binding.

use signalbox::{
    Callback, DEFAULT_DISPATCHER, Dispatcher, DispatcherRegistry,
    testing::{CountingCallback, RecordingCallback},
};
use std::sync::Arc;

mod common;
use common::Greeting;

#[test]
fn test_create_then_get_returns_same_instance() {
    let registry: DispatcherRegistry<Greeting> = DispatcherRegistry::new();
    let created = registry.create_dispatcher("x").unwrap();

    let found = registry.get_dispatcher("x").unwrap();
    assert!(Arc::ptr_eq(&created, &found));
    assert!(registry.get_dispatcher("y").is_none());
}

#[test]
fn test_new_default_is_returned_by_get_default() {
    let registry: DispatcherRegistry<Greeting> = DispatcherRegistry::new();
    assert!(registry.get_default().is_none());

    let dispatcher = Dispatcher::new_default(&registry);
    let found = registry.get_default().unwrap();
    assert!(Arc::ptr_eq(&dispatcher, &found));
    assert!(Arc::ptr_eq(
        &found,
        &registry.get_dispatcher(DEFAULT_DISPATCHER).unwrap()
    ));
}

#[test]
fn test_new_default_replaces_previous_default() {
    let registry: DispatcherRegistry<()> = DispatcherRegistry::with_default();
    let prebuilt = registry.get_default().unwrap();

    let replacement = Dispatcher::new_default(&registry);
    assert!(!Arc::ptr_eq(&prebuilt, &replacement));
    assert!(Arc::ptr_eq(&registry.get_default().unwrap(), &replacement));
}

#[test]
fn test_free_standing_dispatcher_is_not_registered() {
    let registry: DispatcherRegistry<()> = DispatcherRegistry::new();
    let _dispatcher: Dispatcher<()> = Dispatcher::new();
    assert!(registry.is_empty());
}

#[test]
fn test_insert_returns_replaced_dispatcher() {
    let registry: DispatcherRegistry<()> = DispatcherRegistry::new();
    let first = Arc::new(Dispatcher::new());
    let second = Arc::new(Dispatcher::new());

    assert!(registry.insert("net", first.clone()).is_none());
    let replaced = registry.insert("net", second).unwrap();
    assert!(Arc::ptr_eq(&first, &replaced));
}

#[test]
fn test_bind_registers_on_named_dispatcher() {
    let registry: DispatcherRegistry<Greeting> = DispatcherRegistry::with_default();
    let net = registry.create_dispatcher("net").unwrap();
    let recorder = RecordingCallback::new();

    assert!(registry.bind("net", "ping", recorder.callback()));
    assert!(!registry.bind("net", "", recorder.callback()));
    assert!(!registry.bind("missing", "ping", recorder.callback()));

    // Only the named dispatcher sees the binding.
    let default = registry.get_default().unwrap();
    assert!(!default.emit("ping", &Greeting::new("nope")).unwrap());

    assert!(net.emit("ping", &Greeting::new("pong")).unwrap());
    assert_eq!(recorder.calls(), vec![Greeting::new("pong")]);
}

#[test]
fn test_bind_to_closed_dispatcher_fails() {
    let registry: DispatcherRegistry<()> = DispatcherRegistry::new();
    let ui = registry.create_dispatcher("ui").unwrap();
    ui.close();

    assert!(!registry.bind("ui", "click", Callback::infallible(|_| {})));
}

#[test]
fn test_names_sorted() {
    let registry: DispatcherRegistry<()> = DispatcherRegistry::with_default();
    registry.create_dispatcher("net");
    registry.create_dispatcher("audio");

    assert_eq!(registry.names(), vec!["audio", "default", "net"]);
    assert_eq!(registry.len(), 3);
}

#[test]
fn test_dispatchers_are_independent() {
    let registry: DispatcherRegistry<()> = DispatcherRegistry::new();
    let a = registry.create_dispatcher("a").unwrap();
    let b = registry.create_dispatcher("b").unwrap();
    let counter = CountingCallback::new();

    a.register("tick", [counter.callback()]);
    assert!(!b.emit("tick", &()).unwrap());
    assert!(a.emit("tick", &()).unwrap());
    assert_eq!(counter.count(), 1);
}

#[test]
fn test_registry_shared_across_threads() {
    let registry: Arc<DispatcherRegistry<usize>> = Arc::new(DispatcherRegistry::new());
    let counter = CountingCallback::new();

    let threads: Vec<_> = (0..4)
        .map(|n| {
            let registry = registry.clone();
            let cb = counter.callback();
            std::thread::spawn(move || {
                let name = format!("worker-{n}");
                let dispatcher = registry.create_dispatcher(&name).unwrap();
                dispatcher.register("done", [cb]);
                dispatcher.emit("done", &n).unwrap();
            })
        })
        .collect();
    for thread in threads {
        thread.join().unwrap();
    }

    assert_eq!(registry.len(), 4);
    assert_eq!(counter.count(), 4);
}
