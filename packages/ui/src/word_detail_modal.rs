use api::settle;
use dioxus::prelude::*;

use crate::busy::busy;
use crate::messages::{DELETE_FAILED, DELETE_SUCCEEDED, UNEXPECTED};
use crate::toast::use_toast;

/// A full-screen overlay that centers its children in a modal card.
/// Clicking outside the card triggers `on_close`.
#[component]
pub fn ModalOverlay(on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal-card",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                {children}
            }
        }
    }
}

/// Details of one saved word, fetched when opened. Render it keyed by `id`.
///
/// `on_deleted` fires after a successful delete; the list should reload then.
#[component]
pub fn WordDetailModal(id: String, on_close: EventHandler<()>, on_deleted: EventHandler<()>) -> Element {
    let toast = use_toast();
    let deleting = use_signal(|| false);

    let detail_id = id.clone();
    let detail = use_resource(move || {
        let id = detail_id.clone();
        async move { settle(api::get_word_detail(id).await) }
    });

    let delete = move |_| {
        let id = id.clone();
        async move {
            let _busy = busy(deleting);
            match settle(api::delete_word(id.clone()).await) {
                Ok(()) => {
                    toast.success(DELETE_SUCCEEDED);
                    on_deleted.call(());
                }
                Err(e) => {
                    tracing::warn!(error = %e, word_id = %id, "word deletion failed");
                    toast.error(e.user_message(DELETE_FAILED));
                }
            }
        }
    };

    let body = match &*detail.read() {
        None => rsx! { p { class: "muted", "読み込み中..." } },
        Some(Err(e)) => {
            let message = e.user_message(UNEXPECTED);
            rsx! { p { class: "field-error", "{message}" } }
        }
        Some(Ok(word)) => rsx! {
            h3 { class: "word-spelling", "{word.spelling}" }
            if let Some(meaning) = &word.meaning {
                p { class: "word-meaning", "{meaning}" }
            }
            if let Some(example) = &word.example_sentence {
                p { class: "word-example", "{example}" }
            }
            if let Some(translation) = &word.example_sentence_translation {
                p { class: "word-translation", "{translation}" }
            }
        },
    };

    rsx! {
        ModalOverlay {
            on_close: on_close,
            div {
                class: "modal-body",
                {body}
            }
            div {
                class: "form-actions",
                button {
                    class: "btn",
                    r#type: "button",
                    onclick: move |_| on_close.call(()),
                    "閉じる"
                }
                button {
                    class: "btn btn-danger",
                    r#type: "button",
                    disabled: deleting(),
                    onclick: delete,
                    if deleting() { "削除中..." } else { "削除" }
                }
            }
        }
    }
}
