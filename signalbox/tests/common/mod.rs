#![allow(dead_code)]

use signalbox::{Callback, Dispatcher};
use std::sync::{Arc, Mutex};

// ============================================================================
// Test Payloads
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct Greeting {
    pub text: String,
}

impl Greeting {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

// ============================================================================
// Test Callbacks
// ============================================================================

/// A callback that appends `"{tag}({text})"` to a shared transcript.
pub fn transcript_callback(tag: &'static str, log: &Arc<Mutex<Vec<String>>>) -> Callback<Greeting> {
    let log = log.clone();
    Callback::infallible(move |greeting: &Greeting| {
        log.lock()
            .unwrap()
            .push(format!("{tag}({})", greeting.text));
    })
}

/// A dispatcher paired with the transcript its callbacks write to.
pub fn greeting_dispatcher() -> (Dispatcher<Greeting>, Arc<Mutex<Vec<String>>>) {
    (Dispatcher::new(), Arc::new(Mutex::new(Vec::new())))
}
