//! Debounced lookups where only the newest request may land.
//!
//! Every lookup takes a [`Ticket`] from a shared [`RequestGeneration`]. A
//! result is applied only if its ticket is still the newest when it arrives;
//! anything older was superseded by later typing and is dropped.
//!
//! [`SuggestionList`] holds what the dropdown under the field shows.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::timer;

/// Wait after the last keystroke before asking for suggestions.
pub const SUGGEST_DEBOUNCE: Duration = Duration::from_millis(1000);
/// Delay before hiding suggestions on blur, so a click on one still lands.
pub const BLUR_HIDE_DELAY: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Monotonic request counter shared by a component's lookups.
#[derive(Debug, Clone, Default)]
pub struct RequestGeneration(Arc<AtomicU64>);

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding all earlier ones.
    pub fn next(&self) -> Ticket {
        Ticket(self.0.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.0.load(Ordering::SeqCst) == ticket.0
    }

    /// Supersede whatever is in flight without starting anything.
    pub fn cancel(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Suggestions for a text field, shown only while the field has focus.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionList<T> {
    items: Vec<T>,
    focused: bool,
    loading: bool,
}

impl<T> Default for SuggestionList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            focused: false,
            loading: false,
        }
    }
}

impl<T> SuggestionList<T> {
    /// A lookup for the field's current input has been scheduled.
    pub fn searching(&mut self) {
        self.focused = true;
        self.loading = true;
    }

    /// The newest lookup answered.
    pub fn land(&mut self, items: Vec<T>) {
        self.loading = false;
        self.items = items;
    }

    /// The field lost focus.
    pub fn blur(&mut self) {
        self.focused = false;
        self.loading = false;
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.focused && self.loading
    }

    /// Items to render; empty while a lookup is pending or the field is blurred.
    pub fn visible(&self) -> &[T] {
        if self.focused && !self.loading {
            &self.items
        } else {
            &[]
        }
    }
}

/// Wait `delay`, then run `lookup` unless a newer request started meanwhile.
///
/// Returns `None` when superseded, before or after the lookup ran.
pub async fn latest<F, Fut, T>(generation: &RequestGeneration, delay: Duration, lookup: F) -> Option<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    let ticket = generation.next();
    if !delay.is_zero() {
        timer::sleep(delay).await;
    }
    if !generation.is_current(ticket) {
        return None;
    }
    let result = lookup().await;
    generation.is_current(ticket).then_some(result)
}
