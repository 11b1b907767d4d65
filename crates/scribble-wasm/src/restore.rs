//! Restore completion as seen from JavaScript.
//!
//! Wraps the sketchpad's `RestoreHandle`. The host settles it after each
//! decode callback; JS waiters are resolved with the outcome label.

use js_sys::Function;
use scribble_editor::RestoreHandle;
use wasm_bindgen::JsValue;

pub struct RestoreSignal {
    handle: RestoreHandle,
    outcome: Option<&'static str>,
    waiters: Vec<Function>,
}

impl RestoreSignal {
    pub fn new(handle: RestoreHandle) -> Self {
        let mut signal = Self {
            handle,
            outcome: None,
            waiters: Vec::new(),
        };
        signal.settle();
        signal
    }

    /// The outcome label once the restore has finished.
    pub fn outcome(&self) -> Option<&'static str> {
        self.outcome
    }

    /// Pick up a finished restore and resolve everyone waiting on it.
    pub fn settle(&mut self) {
        if self.outcome.is_some() {
            return;
        }
        if let Some(outcome) = self.handle.try_outcome() {
            let label = outcome.label();
            log::debug!("restore settled: {label}");
            self.outcome = Some(label);
            self.resolve_all(label);
        }
    }

    /// Resolve `resolve` now if settled, otherwise once settled.
    pub fn wait(&mut self, resolve: Function) {
        match self.outcome {
            Some(label) => call(&resolve, label),
            None => self.waiters.push(resolve),
        }
    }

    fn resolve_all(&mut self, label: &str) {
        for resolve in self.waiters.drain(..) {
            call(&resolve, label);
        }
    }
}

impl Drop for RestoreSignal {
    fn drop(&mut self) {
        if self.outcome.is_none() {
            self.resolve_all("abandoned");
        }
    }
}

fn call(resolve: &Function, label: &str) {
    if let Err(e) = resolve.call1(&JsValue::NULL, &JsValue::from_str(label)) {
        log::warn!("restore waiter threw: {e:?}");
    }
}
