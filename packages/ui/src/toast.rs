//! Toast notifications.
//!
//! [`Toasts`] is a plain queue; [`ToastProvider`] puts it in context and renders
//! it, and each rendered toast dismisses itself after [`TOAST_LIFETIME`].

use std::time::Duration;

use dioxus::prelude::*;

use crate::timer;

/// Older toasts are dropped once this many are visible.
pub const MAX_TOASTS: usize = 5;
pub const TOAST_LIFETIME: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    fn class(self) -> &'static str {
        match self {
            Self::Info => "toast toast-info",
            Self::Success => "toast toast-success",
            Self::Warning => "toast toast-warning",
            Self::Error => "toast toast-error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Toasts {
    next_id: u64,
    items: Vec<Toast>,
}

impl Toasts {
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast {
            id,
            kind,
            message: message.into(),
        });
        if self.items.len() > MAX_TOASTS {
            let overflow = self.items.len() - MAX_TOASTS;
            self.items.drain(..overflow);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|toast| toast.id != id);
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

/// Handle for showing toasts from event handlers.
#[derive(Clone, Copy, PartialEq)]
pub struct ToastHandle {
    toasts: Signal<Toasts>,
}

impl ToastHandle {
    pub fn show(mut self, kind: ToastKind, message: impl Into<String>) {
        self.toasts.write().push(kind, message);
    }

    pub fn info(self, message: impl Into<String>) {
        self.show(ToastKind::Info, message);
    }

    pub fn success(self, message: impl Into<String>) {
        self.show(ToastKind::Success, message);
    }

    pub fn warning(self, message: impl Into<String>) {
        self.show(ToastKind::Warning, message);
    }

    pub fn error(self, message: impl Into<String>) {
        self.show(ToastKind::Error, message);
    }
}

pub fn use_toast() -> ToastHandle {
    use_context::<ToastHandle>()
}

#[component]
pub fn ToastProvider(children: Element) -> Element {
    let toasts = use_signal(Toasts::default);
    use_context_provider(|| ToastHandle { toasts });

    rsx! {
        {children}
        div {
            class: "toast-stack",
            for toast in toasts.read().items().iter().cloned() {
                ToastItem { key: "{toast.id}", toast: toast.clone(), toasts: toasts }
            }
        }
    }
}

#[component]
fn ToastItem(toast: Toast, toasts: Signal<Toasts>) -> Element {
    let mut toasts = toasts;
    let id = toast.id;
    use_future(move || async move {
        timer::sleep(TOAST_LIFETIME).await;
        toasts.write().dismiss(id);
    });

    rsx! {
        div {
            class: toast.kind.class(),
            role: "status",
            onclick: move |_| toasts.write().dismiss(id),
            "{toast.message}"
        }
    }
}
