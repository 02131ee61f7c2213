//! Loading flags that reset themselves.

use dioxus::prelude::*;

/// Runs a closure when dropped, so it fires on every exit path of the scope
/// that holds it, early returns included.
pub struct OnExit<F: FnOnce()> {
    action: Option<F>,
}

impl<F: FnOnce()> OnExit<F> {
    pub fn new(action: F) -> Self {
        Self {
            action: Some(action),
        }
    }
}

impl<F: FnOnce()> Drop for OnExit<F> {
    fn drop(&mut self) {
        if let Some(action) = self.action.take() {
            action();
        }
    }
}

/// Raise `flag` until the returned guard is dropped.
pub fn busy(mut flag: Signal<bool>) -> OnExit<impl FnOnce()> {
    flag.set(true);
    OnExit::new(move || flag.set(false))
}
