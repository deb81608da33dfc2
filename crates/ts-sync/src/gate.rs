//! One-shot start signal.

use std::sync::{Condvar, Mutex};

/// Closed until [`open`][Self::open] is called once; afterwards every
/// [`wait`][Self::wait] returns immediately.
///
/// Workers park here so the orchestrator can finish building shared state
/// before the first round begins.
#[derive(Debug, Default)]
pub struct StartGate {
    open: Mutex<bool>,
    cvar: Condvar,
}

impl StartGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Release every current and future waiter.  Idempotent.
    pub fn open(&self) {
        let mut open = self
            .open
            .lock()
            .unwrap_or_else(|_| panic!("start gate lock poisoned"));
        *open = true;
        drop(open);
        self.cvar.notify_all();
    }

    /// Block until the gate is open.
    pub fn wait(&self) {
        let open = self
            .open
            .lock()
            .unwrap_or_else(|_| panic!("start gate lock poisoned"));
        let _open = self
            .cvar
            .wait_while(open, |open| !*open)
            .unwrap_or_else(|_| panic!("start gate lock poisoned"));
    }

    pub fn is_open(&self) -> bool {
        *self
            .open
            .lock()
            .unwrap_or_else(|_| panic!("start gate lock poisoned"))
    }
}
